//! Config loading.
//!
//! The config file is TOML and read-only for the lifetime of a run:
//! both binaries load it once at startup and pass the resulting value
//! down by reference. A missing file yields the built-in defaults so a
//! fresh checkout works without any setup.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use super::settings::RenderConfig;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    /// Create an invalid-value error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl RenderConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: RenderConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults if it doesn't exist.
    ///
    /// A file that exists but fails to parse or validate is still an
    /// error; only absence is forgiven.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
