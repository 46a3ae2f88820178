//! Header row parsing.

/// Field delimiter of a delimited text table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Picks the delimiter from a file extension: `.tsv` and `.tab` are tab
    /// separated, everything else is comma separated.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("tsv" | "tab") => Self::Tab,
            _ => Self::Comma,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

/// Parses a header line into fields, handling quoted values.
///
/// Field text is kept exactly, without trimming, so names match the columns
/// polars reads from the same line.
pub fn parse_header_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    let separator = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes && current.is_empty() => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == separator && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}
