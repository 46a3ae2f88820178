//! XLSX export of the output table.

use std::path::Path;

use polars::prelude::*;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Sheet name used for the output table.
pub const SHEET_NAME: &str = "Mapped";

/// Writes `frame` as a single-sheet workbook with a bold header row.
///
/// Null cells are left blank; every other cell is written as text.
pub fn write_xlsx(frame: &DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let table_error = |message: String| OutputError::Table {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = Workbook::new();
    fill_sheet(&mut workbook, frame).map_err(|e| table_error(e.to_string()))?;
    workbook
        .save(path)
        .map_err(|e| table_error(e.to_string()))?;

    info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "wrote output workbook"
    );
    Ok(())
}

fn fill_sheet(workbook: &mut Workbook, frame: &DataFrame) -> std::result::Result<(), XlsxError> {
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col_idx, column) in frame.get_columns().iter().enumerate() {
        let col = ColNum::try_from(col_idx)
            .map_err(|_| XlsxError::ParameterError("too many columns".to_string()))?;
        sheet.write_string_with_format(0, col, column.name().as_str(), &header_format)?;

        for row_idx in 0..frame.height() {
            let Some(text) = column.get(row_idx).ok().and_then(cell_text) else {
                continue;
            };
            let row = RowNum::try_from(row_idx + 1)
                .map_err(|_| XlsxError::ParameterError("too many rows".to_string()))?;
            sheet.write_string(row, col, text)?;
        }
    }
    Ok(())
}

fn cell_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(text) => Some(text.to_string()),
        AnyValue::StringOwned(text) => Some(text.to_string()),
        other => Some(other.to_string()),
    }
}
