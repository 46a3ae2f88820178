//! Oracle connection settings.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Base URL of the Generative Language API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for one oracle client.
///
/// Passed explicitly at construction; nothing is read from the process
/// environment here.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// API key sent with each request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier, with or without a `models/` prefix.
    pub model: String,
    /// API base URL.
    pub endpoint: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling temperature; the service default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: None,
        }
    }
}

impl OracleConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Model name without the `models/` resource prefix.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.strip_prefix("models/").unwrap_or(&self.model)
    }

    /// Full URL of the `generateContent` method for the configured model.
    #[must_use]
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model_name()
        )
    }

    /// Whether a non-blank API key is present.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_strips_prefix() {
        let config = OracleConfig {
            model: "models/gemini-1.5-flash".to_string(),
            endpoint: "https://example.test/v1beta/".to_string(),
            ..OracleConfig::default()
        };
        assert_eq!(
            config.generate_url(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = OracleConfig {
            api_key: Some("secret-key".to_string()),
            ..OracleConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = OracleConfig {
            api_key: Some("  ".to_string()),
            ..OracleConfig::default()
        };
        assert!(!config.has_api_key());
        assert!(!OracleConfig::default().has_api_key());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: OracleConfig = toml::from_str("timeout_secs = 5\n").unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }
}
