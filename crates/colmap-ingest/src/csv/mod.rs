//! Delimited text reading utilities.

mod header;
mod reader;

pub use header::{Delimiter, parse_header_line};
pub use reader::{
    MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, check_header_names,
    read_delimited, read_header, validate_encoding,
};
