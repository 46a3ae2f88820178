//! Error types for table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the maximum size.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Header Errors ===
    /// File has no header row.
    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// A header cell is blank.
    #[error("blank column name at position {position} in {path}")]
    EmptyColumnName { path: PathBuf, position: usize },

    /// A column name appears twice in the header.
    #[error("duplicate column name '{column}' in {path}")]
    DuplicateColumn { path: PathBuf, column: String },

    // === Parsing Errors ===
    /// Polars could not parse the file body.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The spreadsheet workbook could not be opened or read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },
}

impl IngestError {
    /// Path of the file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileNotFound { path }
            | Self::FileRead { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::UnsupportedEncoding { path, .. }
            | Self::EmptyFile { path }
            | Self::EmptyColumnName { path, .. }
            | Self::DuplicateColumn { path, .. }
            | Self::Parse { path, .. }
            | Self::Workbook { path, .. } => path,
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;
