//! Error types for oracle requests.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while asking an oracle for a mapping.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// No API key was configured.
    #[error("no API key configured; set GEMINI_API_KEY or pass --api-key")]
    MissingApiKey,

    /// The request did not complete (connection, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The service rejected the credentials.
    #[error("authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// The service answered with a non-success status.
    #[error("oracle returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The service refused to answer the prompt.
    #[error("oracle blocked the prompt: {reason}")]
    Blocked { reason: String },

    /// The response body did not have the expected shape.
    #[error("unexpected oracle response: {0}")]
    InvalidResponse(String),

    /// A recorded response could not be read.
    #[error("failed to read recorded response {path}: {source}")]
    Replay {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OracleError {
    /// Returns a short message suitable for the operator.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::MissingApiKey => "No API key is configured for the mapping oracle.",
            Self::Network(_) => "Could not reach the mapping oracle. Check your connection.",
            Self::Authentication { .. } => "The mapping oracle rejected the API key.",
            Self::Blocked { .. } => "The mapping oracle declined to answer.",
            Self::Status { .. } | Self::InvalidResponse(_) => "The mapping oracle request failed.",
            Self::Replay { .. } => "The recorded oracle response could not be read.",
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type alias for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = OracleError::Network("connection refused".to_string());
        assert!(err.user_message().contains("connection"));

        let err = OracleError::Authentication {
            status: 403,
            message: "API key not valid".to_string(),
        };
        assert!(err.user_message().contains("API key"));
        assert_eq!(
            err.to_string(),
            "authentication failed (HTTP 403): API key not valid"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: OracleError = json_err.into();
        assert!(matches!(err, OracleError::InvalidResponse(_)));
    }
}
