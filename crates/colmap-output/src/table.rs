//! Output table format selection.

use std::path::Path;

use polars::prelude::DataFrame;

use crate::csv::write_csv;
use crate::error::Result;
use crate::xlsx::write_xlsx;

/// Output file layout, chosen from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// `.xlsx` writes a workbook; anything else writes CSV.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("xlsx") => Self::Xlsx,
            _ => Self::Csv,
        }
    }
}

/// Writes the output table in the format named by the path's extension.
pub fn write_table(frame: &DataFrame, path: &Path) -> Result<()> {
    match OutputFormat::from_path(path) {
        OutputFormat::Csv => write_csv(frame, path),
        OutputFormat::Xlsx => write_xlsx(frame, path),
    }
}
