//! Shared data model for column mapping.

pub mod columns;
pub mod error;
pub mod mapping;
pub mod report;

pub use columns::{ColumnList, quote_literal};
pub use error::{ModelError, Result};
pub use mapping::{NeutralizedToken, ParsedMapping, RejectedMapping, ValidatedMapping};
pub use report::{MappingReport, MappingRow};
