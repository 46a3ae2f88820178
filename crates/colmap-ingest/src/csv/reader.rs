//! Delimited file reading with pre-load checks.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::header::{Delimiter, parse_header_line};

/// Maximum file size for loading (500 MB).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// No type inference: every column is read as text so cells keep their
/// exact spelling (`00501`, `2.00`).
const INFER_SCHEMA_ROWS: usize = 0;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects files that start with a UTF-16 byte order mark.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped in read_header)
    Ok(())
}

/// Reads and checks the header row.
///
/// Fails on an empty file, a blank column name, or a repeated column name.
pub fn read_header(path: &Path, delimiter: Delimiter) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let columns = parse_header_line(line, delimiter);
    check_header_names(path, &columns)?;
    Ok(columns)
}

/// Fails on the first blank or repeated column name.
pub fn check_header_names(path: &Path, columns: &[String]) -> Result<()> {
    let mut seen = std::collections::BTreeSet::new();
    for (idx, name) in columns.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                position: idx + 1,
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(IngestError::DuplicateColumn {
                path: path.to_path_buf(),
                column: name.clone(),
            });
        }
    }
    Ok(())
}

/// Reads a delimited file with a header row into a DataFrame of `String`
/// columns. Empty fields are null.
pub fn read_delimited(path: &Path, delimiter: Delimiter) -> Result<DataFrame> {
    let parse_error = |e: PolarsError| IngestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .map_parse_options(|opts| opts.with_separator(delimiter.as_byte()))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)
}
