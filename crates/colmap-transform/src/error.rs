//! Error types for table projection.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while assembling the output table.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("polars error while building output table: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
