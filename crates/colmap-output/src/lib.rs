//! Writers for colmap results.
//!
//! - [`write_table`]: the projected table, as CSV or XLSX by extension.
//! - [`write_report`]: the mapping report as JSON.

mod common;
pub mod csv;
pub mod error;
pub mod report;
pub mod table;
pub mod xlsx;

pub use csv::write_csv;
pub use error::{OutputError, Result};
pub use report::{report_to_json, write_report};
pub use table::{OutputFormat, write_table};
pub use xlsx::write_xlsx;
