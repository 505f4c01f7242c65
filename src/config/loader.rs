//! Configuration loading from disk and the command line.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::SyncConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values given on the command line or through the environment. Each one
/// that is set replaces the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_url: Option<String>,
    pub email: Option<String>,
    pub key: Option<String>,
    pub log_level: Option<String>,
}

impl SyncConfig {
    /// Merge overrides on top of this configuration.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(root_url) = overrides.root_url {
            self.api.root_url = root_url;
        }
        if let Some(email) = overrides.email {
            self.auth.email = email;
        }
        if let Some(key) = overrides.key {
            self.auth.key = key;
        }
        if let Some(log_level) = overrides.log_level {
            self.observability.log_level = log_level;
        }
    }
}

/// Parse a TOML settings file without validating it.
pub fn read_config(path: &Path) -> Result<SyncConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Build the effective configuration: file (if any), then overrides, then
/// validation.
pub fn load_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<SyncConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => SyncConfig::default(),
    };
    config.apply_overrides(overrides);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
