//! Page fetching: one request for page N of a query, classified.
//!
//! [`PageFetcher`] is the seam the pipeline depends on. [`OmdbFetcher`] is the
//! `reqwest`-backed implementation; tests substitute scripted fetchers.

use std::future::Future;

use url::Url;

use crate::classify::classify;
use crate::config::OmdbConfig;
use crate::error::SearchError;
use crate::http;
use crate::query::SearchQuery;
use crate::types::PageResult;

/// Fetches and classifies a single result page.
///
/// The result type is exhaustive: implementations map every transport fault
/// to [`PageResult::TransportError`] instead of returning an error, so callers
/// never handle a raw transport failure.
///
/// All implementations must be `Send + Sync` so a bundle of pages can be
/// fetched concurrently through a shared reference.
pub trait PageFetcher: Send + Sync {
    /// Fetch page `page` of `query`. `page` overrides `query.page`.
    fn fetch_page(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> impl Future<Output = PageResult> + Send;
}

/// HTTP fetcher for the OMDb search endpoint.
#[derive(Debug, Clone)]
pub struct OmdbFetcher {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl OmdbFetcher {
    /// Build a fetcher from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &OmdbConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SearchError::Config(format!("base_url is not a valid URL: {e}")))?;
        Ok(Self {
            client: http::build_client(config)?,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Full request URL for `page` of `query`, API key included.
    fn page_url(&self, query: &SearchQuery, page: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.api_key);
            for (key, value) in query.request_params(page) {
                pairs.append_pair(key, &value);
            }
        }
        url
    }
}

impl PageFetcher for OmdbFetcher {
    async fn fetch_page(&self, query: &SearchQuery, page: u32) -> PageResult {
        tracing::trace!(title = %query.title, page, "requesting page");

        let response = match self.client.get(self.page_url(query, page)).send().await {
            Ok(response) => response,
            Err(e) => {
                return PageResult::TransportError {
                    reason: format!("request failed: {}", e.without_url()),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            return PageResult::TransportError {
                reason: format!("HTTP status {status}"),
            };
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => classify(body),
            Err(e) => PageResult::TransportError {
                reason: format!("response body decode failed: {}", e.without_url()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaType;

    fn fetcher() -> OmdbFetcher {
        OmdbFetcher::new(&OmdbConfig::new("k3y").with_base_url("https://omdb.test/"))
            .expect("valid config")
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OmdbFetcher>();
    }

    #[test]
    fn new_rejects_missing_key() {
        let err = OmdbFetcher::new(&OmdbConfig::default()).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn page_url_carries_key_filters_and_page_override() {
        let query = SearchQuery::new("The Dark Knight")
            .with_media_type(MediaType::Movie)
            .with_year("2008")
            .with_page(1);
        let url = fetcher().page_url(&query, 4);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(url.host_str(), Some("omdb.test"));
        assert!(pairs.contains(&("apikey".into(), "k3y".into())));
        assert!(pairs.contains(&("s".into(), "The Dark Knight".into())));
        assert!(pairs.contains(&("type".into(), "movie".into())));
        assert!(pairs.contains(&("y".into(), "2008".into())));
        assert!(pairs.contains(&("page".into(), "4".into())));
        assert!(!pairs.contains(&("page".into(), "1".into())));
    }

    #[tokio::test]
    #[ignore] // Live test: run with `OMDB_API_KEY=... cargo test -- --ignored`
    async fn live_omdb_first_page() {
        let key = std::env::var("OMDB_API_KEY").unwrap_or_default();
        let fetcher = OmdbFetcher::new(&OmdbConfig::new(key)).expect("config");
        let result = fetcher.fetch_page(&SearchQuery::new("Batman"), 1).await;
        assert!(result.is_success(), "unexpected result: {}", result.kind());
    }
}
