use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::LoaderConfig;

/// Upper bound for `settle_delay_ms`.
const MAX_SETTLE_DELAY_MS: u64 = 10_000;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl LoaderConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/loadable/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("loadable").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns `LoaderConfig::default()` when the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(LoaderConfig::default());
        }
        Self::load_from(&path)
    }

    /// Loads, parses and validates the given file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: LoaderConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The settle delay is at most ten seconds
    /// - No label is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "settle_delay_ms must be at most {}, got {}",
                    MAX_SETTLE_DELAY_MS, self.settle_delay_ms
                ),
            });
        }

        let labels = [
            ("loading", &self.labels.loading),
            ("retry", &self.labels.retry),
            ("cancel", &self.labels.cancel),
        ];
        if let Some((name, _)) = labels.iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("Label '{}' must not be empty", name),
            });
        }

        Ok(())
    }
}
