//! Oracle clients that suggest column mappings.
//!
//! [`MappingOracle`] is the seam the pipeline calls. [`GeminiClient`] talks to
//! the Gemini API over HTTPS; [`ReplayOracle`] answers with recorded text.

pub mod config;
pub mod error;
pub mod gemini;
pub mod oracle;
pub mod replay;

pub use config::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, OracleConfig};
pub use error::{OracleError, Result};
pub use gemini::{GeminiClient, extract_text};
pub use oracle::MappingOracle;
pub use replay::ReplayOracle;
