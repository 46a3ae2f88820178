//! Oracle settings file loading.
//!
//! Settings come from, in increasing precedence:
//! 1. built-in defaults,
//! 2. a TOML file (`--config PATH`, or `config.toml` in the platform config
//!    directory when present),
//! 3. command-line flags and their environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, info};

use colmap_oracle::OracleConfig;

const APP_QUALIFIER: &str = "";
const APP_ORG: &str = "";
const APP_NAME: &str = "colmap";
const CONFIG_FILENAME: &str = "config.toml";

/// Errors reading a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Values given on the command line; `None` keeps the file or default value.
#[derive(Debug, Clone, Default)]
pub struct OracleOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
}

/// Path of the settings file in the platform config directory.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads oracle settings.
///
/// An explicit path must exist and parse. The default path is optional:
/// when it is missing, built-in defaults are used.
pub fn load_oracle_config(explicit: Option<&Path>) -> Result<OracleConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config_file(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => read_config_file(&path),
        Some(path) => {
            debug!(path = %path.display(), "no config file; using defaults");
            Ok(OracleConfig::default())
        }
        None => {
            debug!("could not determine config directory; using defaults");
            Ok(OracleConfig::default())
        }
    }
}

/// Reads one TOML settings file.
pub fn read_config_file(path: &Path) -> Result<OracleConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loaded oracle config");
    Ok(config)
}

/// Applies command-line values over loaded settings.
pub fn apply_overrides(mut config: OracleConfig, overrides: OracleOverrides) -> OracleConfig {
    if let Some(api_key) = overrides.api_key.filter(|key| !key.trim().is_empty()) {
        config.api_key = Some(api_key);
    }
    if let Some(model) = overrides.model {
        config.model = model;
    }
    if let Some(endpoint) = overrides.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(timeout_secs) = overrides.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    if overrides.temperature.is_some() {
        config.temperature = overrides.temperature;
    }
    config
}
