//! Spreadsheet (`.xlsx`) reading.
//!
//! The first worksheet is read. Its first used row is the header; every
//! other row becomes a data row. Cells are converted to text so the frame
//! has the same shape as one read from a delimited file.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use polars::prelude::*;
use tracing::debug;

use crate::csv::check_header_names;
use crate::error::{IngestError, Result};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Reads the first worksheet of a workbook into a DataFrame of `String`
/// columns, checking the header like a delimited file's.
pub fn read_workbook(path: &Path) -> Result<DataFrame> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| workbook_error("workbook has no worksheets".to_string()))?
        .map_err(|e| workbook_error(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    };
    let header: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    check_header_names(path, &header)?;

    let mut values: Vec<Vec<Option<String>>> =
        vec![Vec::with_capacity(range.height().saturating_sub(1)); header.len()];
    for row in rows {
        for (column, cell) in values.iter_mut().zip(row.iter()) {
            column.push(cell_text(cell));
        }
    }
    debug!(
        path = %path.display(),
        rows = range.height().saturating_sub(1),
        columns = header.len(),
        "read first worksheet"
    );

    let columns: Vec<Column> = header
        .iter()
        .zip(values)
        .map(|(name, cells)| Series::new(name.as_str().into(), cells).into_column())
        .collect();
    DataFrame::new(columns).map_err(|e| IngestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Text of one cell; empty cells and empty strings are null.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(text) if text.is_empty() => None,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            Some(text.clone())
        }
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        Data::DateTime(value) if value.is_datetime() => Some(
            serial_to_datetime(value.as_f64()).unwrap_or_else(|| value.as_f64().to_string()),
        ),
        Data::DateTime(value) => Some(value.as_f64().to_string()),
        Data::Error(error) => Some(error.to_string()),
    }
}

/// Formats an Excel date serial (days since 1899-12-30) as
/// `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM:SS` when it has a time part.
fn serial_to_datetime(serial: f64) -> Option<String> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.floor();
    let seconds = ((serial - days) * SECONDS_PER_DAY).round() as i64;
    let date = NaiveDate::from_ymd_opt(1899, 12, 30)?
        .checked_add_signed(TimeDelta::try_days(days as i64)?)?;
    let datetime = date
        .and_time(NaiveTime::MIN)
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)?;
    if seconds == 0 {
        Some(datetime.format("%Y-%m-%d").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_to_datetime() {
        assert_eq!(serial_to_datetime(43831.0).as_deref(), Some("2020-01-01"));
        assert_eq!(
            serial_to_datetime(43831.5).as_deref(),
            Some("2020-01-01 12:00:00")
        );
        assert_eq!(serial_to_datetime(f64::NAN), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(
            cell_text(&Data::String("00501".to_string())).as_deref(),
            Some("00501")
        );
        assert_eq!(cell_text(&Data::Float(2.0)).as_deref(), Some("2"));
        assert_eq!(cell_text(&Data::Float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(cell_text(&Data::Int(7)).as_deref(), Some("7"));
        assert_eq!(cell_text(&Data::Bool(true)).as_deref(), Some("true"));
    }
}
