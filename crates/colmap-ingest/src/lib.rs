//! Table loading for colmap.
//!
//! Reads header-first CSV (comma), TSV (tab), and XLSX (first worksheet)
//! files into polars DataFrames of text columns, rejecting files whose header
//! cannot serve as a column list.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use colmap_ingest::load_table;
//!
//! let table = load_table(Path::new("reference.csv"))?;
//! println!("{}", table.columns);
//! ```

mod csv;
mod error;
mod table;
mod xlsx;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use csv::{Delimiter, MAX_FILE_SIZE, check_file_size_with_limit, parse_header_line};
pub use table::{LoadedTable, TableFormat, load_table};
