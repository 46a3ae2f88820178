//! Oracle that answers with a recorded response.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{OracleError, Result};
use crate::oracle::MappingOracle;

/// Returns the same text for every prompt.
///
/// Used to re-run a mapping from a saved response without network access.
#[derive(Debug, Clone)]
pub struct ReplayOracle {
    label: String,
    response: String,
}

impl ReplayOracle {
    pub fn from_text(response: impl Into<String>) -> Self {
        Self {
            label: "replay".to_string(),
            response: response.into(),
        }
    }

    /// Reads the recorded response from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let response = fs::read_to_string(path).map_err(|source| OracleError::Replay {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            label: format!("replay:{}", path.display()),
            response,
        })
    }
}

impl MappingOracle for ReplayOracle {
    fn name(&self) -> &str {
        &self.label
    }

    fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            oracle = %self.label,
            prompt_len = prompt.len(),
            "answering with recorded response"
        );
        Ok(self.response.clone())
    }
}
