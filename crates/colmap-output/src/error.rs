//! Error types for export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Could not create the parent directory of an output file.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars failed while serializing the table.
    #[error("failed to write table to {path}: {message}")]
    Table { path: PathBuf, message: String },

    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
