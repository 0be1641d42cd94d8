//! Client and pipeline configuration with sensible defaults.
//!
//! [`OmdbConfig`] controls how a single page is requested; [`PipelineConfig`]
//! controls how many pages are requested and how many run at once. Neither
//! reads the environment; the host resolves the API key and passes it in.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default upstream endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Configuration for the HTTP page fetcher.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    /// API key sent as the `apikey` query parameter.
    pub api_key: String,
    /// Endpoint the search request is sent to.
    pub base_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent. If `None`, a crate-identifying agent is sent.
    pub user_agent: Option<String>,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

// The API key is deliberately left out of Debug output.
impl std::fmt::Debug for OmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl OmdbConfig {
    /// Create a config for `api_key` with default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `api_key` must not be blank
    /// - `base_url` must parse as an absolute URL
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::Config("api_key must be set".into()));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("base_url is not a valid URL: {e}")))?;
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the multi-page aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of page requests in flight at once (bundle width).
    pub max_concurrency: usize,
    /// Upper bound on the number of pages fetched per search, page 1 included.
    /// `None` fetches every page the API reports.
    pub max_pages: Option<u32>,
    /// Aggregate every page even when no sort is requested.
    pub aggregate_all: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            max_pages: None,
            aggregate_all: false,
        }
    }
}

impl PipelineConfig {
    /// Validates this configuration.
    ///
    /// Checks:
    /// - `max_concurrency` must be greater than 0
    /// - `max_pages`, when set, must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_concurrency == 0 {
            return Err(SearchError::Config(
                "max_concurrency must be greater than 0".into(),
            ));
        }
        if self.max_pages == Some(0) {
            return Err(SearchError::Config(
                "max_pages must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_omdb_config_has_sensible_values() {
        let config = OmdbConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn default_omdb_config_requires_key() {
        let err = OmdbConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn keyed_config_passes_validation() {
        assert!(OmdbConfig::new("k3y").validate().is_ok());
    }

    #[test]
    fn invalid_base_url_rejected() {
        let config = OmdbConfig::new("k3y").with_base_url("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = OmdbConfig {
            timeout_seconds: 0,
            ..OmdbConfig::new("k3y")
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", OmdbConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn default_pipeline_config_has_sensible_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_concurrency, 5);
        assert!(config.max_pages.is_none());
        assert!(!config.aggregate_all);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_concurrency_rejected() {
        let config = PipelineConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_concurrency"));
    }

    #[test]
    fn zero_max_pages_rejected() {
        let config = PipelineConfig {
            max_pages: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pipeline_config_deserializes_partial_toml_style_json() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"max_pages": 10}"#).expect("decode");
        assert_eq!(config.max_pages, Some(10));
        assert_eq!(config.max_concurrency, 5);
    }
}
