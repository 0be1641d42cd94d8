//! Host configuration: TOML file plus environment override for the API key.
//!
//! The API key is resolved here and nowhere else. The search crate receives
//! it through [`OmdbConfig`] and never reads the environment itself.

use std::path::{Path, PathBuf};

use cine_search::{OmdbConfig, PipelineConfig};
use serde::{Deserialize, Serialize};

use crate::error::{CineError, Result};

/// Environment variable holding the OMDb API key.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Complete host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CineConfig {
    /// Upstream API settings.
    pub omdb: OmdbConfig,
    /// Page bundling and aggregation settings.
    pub pipeline: PipelineConfig,
}

impl CineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CineError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/cine/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cine")
            .join("config.toml")
    }

    /// Resolve the effective configuration.
    ///
    /// Reads `path` if given, otherwise the default path if it exists,
    /// otherwise starts from defaults. A non-empty [`API_KEY_ENV`] then
    /// overrides the file's key, and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`CineError::Config`] if the file is invalid or no API key
    /// is available.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file; using defaults");
                    Self::default()
                }
            }
        };
        config
            .with_api_key_override(std::env::var(API_KEY_ENV).ok())
            .validated()
    }

    /// Replace the API key when `key` is present and non-blank.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.omdb.api_key = key;
        }
        self
    }

    /// Validate both sections.
    ///
    /// # Errors
    ///
    /// Returns [`CineError::Config`] naming the first invalid field.
    pub fn validated(self) -> Result<Self> {
        if self.omdb.api_key.trim().is_empty() {
            return Err(CineError::Config(format!(
                "no API key: set {API_KEY_ENV} or omdb.api_key"
            )));
        }
        self.omdb
            .validate()
            .map_err(|e| CineError::Config(e.to_string()))?;
        self.pipeline
            .validate()
            .map_err(|e| CineError::Config(e.to_string()))?;
        Ok(self)
    }
}
