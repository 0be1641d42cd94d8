//! # cine-search
//!
//! Paginated movie search against the OMDb search API.
//!
//! ## Design
//!
//! - Every response body is classified into a tagged [`PageResult`]
//! - The first page reveals the total result count; the remaining pages are
//!   fetched in bundles of at most `max_concurrency` concurrent requests
//! - Failed follow-up pages are logged and dropped; the search returns what
//!   succeeded
//! - The merged collection can be sorted by title or year, either direction
//! - The latest result lives in a single observable [`SearchSession`] slot;
//!   results of superseded searches are discarded
//!
//! ## Security
//!
//! - The API key is injected through [`OmdbConfig`]; it never appears in
//!   `Debug` output or error messages
//! - Search titles are logged only at trace level

pub mod classify;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod pipeline;
pub mod query;
pub mod session;
pub mod types;

pub use classify::classify;
pub use config::{OmdbConfig, PipelineConfig};
pub use controller::{SearchController, SearchOutcome};
pub use error::{Result, SearchError};
pub use fetcher::{OmdbFetcher, PageFetcher};
pub use query::SearchQuery;
pub use session::SessionStore;
pub use types::{
    MediaType, Movie, PageResult, SearchSession, SessionMode, SortCategory, SortDirection,
};

/// Run one aggregated search without a session store.
///
/// Validates `query` and both configs, fetches every page (bounded by
/// `pipeline.max_pages`), and returns the merged, optionally sorted session.
///
/// # Errors
///
/// Returns [`SearchError::Validation`] or [`SearchError::Config`] before any
/// request is sent, or a first-page error. Later page failures are logged
/// and skipped.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> cine_search::Result<()> {
/// use cine_search::{OmdbConfig, PipelineConfig, SearchQuery, SortCategory, SortDirection};
///
/// let query = SearchQuery::new("Batman").with_sort(SortCategory::Year, SortDirection::Descending);
/// let session = cine_search::search_all(
///     &query,
///     &OmdbConfig::new("your-api-key"),
///     &PipelineConfig::default(),
/// )
/// .await?;
/// for movie in &session.movies {
///     println!("{} ({})", movie.title, movie.year);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_all(
    query: &SearchQuery,
    omdb: &OmdbConfig,
    pipeline: &PipelineConfig,
) -> Result<SearchSession> {
    query.validate()?;
    pipeline.validate()?;
    let fetcher = OmdbFetcher::new(omdb)?;
    pipeline::search::search_all_pages(&fetcher, query, pipeline).await
}
