//! Reshapes a to-map table into the reference column layout.

pub mod error;
pub mod projector;
pub mod text;

pub use error::{Result, TransformError};
pub use projector::project_table;
pub use text::{cell_to_text, column_to_text};
