//! Loaded input tables.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use colmap_model::ColumnList;

use crate::csv::{Delimiter, check_file_size, read_delimited, read_header, validate_encoding};
use crate::error::{IngestError, Result};
use crate::xlsx::read_workbook;

/// Tables wider than this are loaded but logged as unusually wide.
const WIDE_TABLE_COLUMNS: usize = 500;

/// On-disk layout of a table, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Delimited(Delimiter),
    Xlsx,
}

impl TableFormat {
    /// `.xlsx` and `.xlsm` are workbooks; anything else is delimited text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("xlsx" | "xlsm") => Self::Xlsx,
            _ => Self::Delimited(Delimiter::from_path(path)),
        }
    }
}

/// A table read from disk together with its header.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub frame: DataFrame,
    /// Column names in file order.
    pub columns: ColumnList,
}

impl LoadedTable {
    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Loads a header-first CSV, TSV, or XLSX file.
///
/// The format is chosen from the extension. Size, encoding, and header
/// checks run before the body is read. Every column is read as text.
pub fn load_table(path: &Path) -> Result<LoadedTable> {
    check_file_size(path)?;
    let frame = match TableFormat::from_path(path) {
        TableFormat::Delimited(delimiter) => {
            validate_encoding(path)?;
            let header = read_header(path, delimiter)?;
            let frame = read_delimited(path, delimiter)?;
            let parsed: Vec<&str> = frame
                .get_column_names()
                .into_iter()
                .map(|name| name.as_str())
                .collect();
            if parsed != header {
                debug!(
                    path = %path.display(),
                    ?header,
                    ?parsed,
                    "header differs from parsed columns"
                );
            }
            frame
        }
        TableFormat::Xlsx => read_workbook(path)?,
    };

    let names: Vec<String> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let columns = ColumnList::new(names).map_err(|e| IngestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if columns.len() > WIDE_TABLE_COLUMNS {
        warn!(
            path = %path.display(),
            columns = columns.len(),
            "table has more than {WIDE_TABLE_COLUMNS} columns"
        );
    }
    if frame.height() == 0 {
        warn!(path = %path.display(), "table has a header but no data rows");
    }
    info!(
        path = %path.display(),
        rows = frame.height(),
        columns = columns.len(),
        "loaded table"
    );

    Ok(LoadedTable {
        path: path.to_path_buf(),
        frame,
        columns,
    })
}
