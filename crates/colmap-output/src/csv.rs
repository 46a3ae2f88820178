//! CSV export of the output table.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Writes `frame` as comma-separated text with a header row.
///
/// Null cells are written as empty fields. Missing parent directories are
/// created. An existing file is overwritten.
pub fn write_csv(frame: &DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let mut frame = frame.clone();
    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| OutputError::Table {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "wrote output table"
    );
    Ok(())
}
