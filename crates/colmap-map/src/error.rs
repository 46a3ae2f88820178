//! Error types for oracle response parsing.

use thiserror::Error;

/// Reasons an oracle response could not be turned into a mapping.
///
/// Offsets are byte offsets into the response after code fences were
/// stripped and date expressions were replaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing left after stripping formatting.
    #[error("oracle response is empty")]
    Empty,

    /// A token that is not a string, number, or null literal.
    #[error(
        "unsupported token `{token}` at offset {offset}: only string, number, and null literals are accepted"
    )]
    UnsupportedToken { token: String, offset: usize },

    /// Structurally malformed mapping (unbalanced braces, missing colon, ...).
    #[error("malformed mapping at offset {offset}: {message} (near `{near}`)")]
    Syntax {
        message: String,
        offset: usize,
        near: String,
    },
}

impl ParseError {
    /// Byte offset of the failure, when one is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::UnsupportedToken { offset, .. } | Self::Syntax { offset, .. } => Some(*offset),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
