//! Error types for model construction.

use thiserror::Error;

/// Errors raised while building model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A column name appears more than once in one table header.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
