//! UI-facing entry points: submit a search, change page, re-sort.
//!
//! [`SearchController`] owns a [`PageFetcher`], the pipeline configuration
//! and the [`SessionStore`]. The UI calls [`SearchController::search`] and
//! [`SearchController::set_page`] and observes the session through
//! [`SearchController::subscribe`].

use tokio::sync::watch;

use crate::config::PipelineConfig;
use crate::error::SearchError;
use crate::fetcher::PageFetcher;
use crate::pipeline::search::{search_all_pages, search_single_page};
use crate::pipeline::sort::sort_movies;
use crate::query::SearchQuery;
use crate::session::SessionStore;
use crate::types::{SearchSession, SortCategory, SortDirection};

/// How a search that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The session was replaced with this search's result.
    Completed,
    /// A newer search started first; this result was discarded.
    Superseded,
}

/// Drives searches and publishes their results as the current session.
pub struct SearchController<F: PageFetcher> {
    fetcher: F,
    config: PipelineConfig,
    store: SessionStore,
}

impl<F: PageFetcher> SearchController<F> {
    /// Create a controller with an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn new(fetcher: F, config: PipelineConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            fetcher,
            config,
            store: SessionStore::new(),
        })
    }

    /// Run a search and publish its session.
    ///
    /// The query is validated before any request. Every page is aggregated
    /// when a sort category is set or `aggregate_all` is configured;
    /// otherwise only `query.page` (default 1) is fetched.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] for a malformed query (nothing is sent)
    /// - first-page failures, see
    ///   [`fetch_first_page`](crate::pipeline::search::fetch_first_page)
    pub async fn search(&self, query: SearchQuery) -> Result<SearchOutcome, SearchError> {
        query.validate()?;
        let ticket = self.store.begin();
        let aggregate = query.sort_category.is_some() || self.config.aggregate_all;
        tracing::info!(
            generation = ticket.value(),
            aggregate,
            "starting search"
        );
        tracing::trace!(title = %query.title, "search query");

        let result = if aggregate {
            search_all_pages(&self.fetcher, &query, &self.config).await
        } else {
            search_single_page(&self.fetcher, &query).await
        };

        let session = match result {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(generation = ticket.value(), error = %e, "search aborted");
                return Err(e);
            }
        };

        if self.store.replace_if_current(ticket, session) {
            Ok(SearchOutcome::Completed)
        } else {
            tracing::debug!(
                generation = ticket.value(),
                latest = self.store.latest().value(),
                "discarding stale search result"
            );
            Ok(SearchOutcome::Superseded)
        }
    }

    /// Re-run the current search with `page` as the requested page.
    ///
    /// This always goes back through [`Self::search`], so an aggregated
    /// session fetches every page again even though the new page could be
    /// sliced from the movies already held. The refetch picks up upstream
    /// changes since the last search.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NoSession`] before the first completed search
    /// - [`SearchError::Validation`] for a page past
    ///   [`SearchSession::total_pages`] (nothing is sent)
    /// - otherwise the same errors as [`Self::search`]
    pub async fn set_page(&self, page: u32) -> Result<SearchOutcome, SearchError> {
        let current = self.store.current().ok_or(SearchError::NoSession)?;
        let last_page = current.total_pages();
        if last_page > 0 && u64::from(page) > last_page {
            return Err(SearchError::Validation(format!(
                "page {page} is past the last page ({last_page})"
            )));
        }
        let query = SearchQuery {
            page: Some(page),
            ..current.search_params
        };
        self.search(query).await
    }

    /// Re-order the current session client-side, without network requests.
    ///
    /// The sort runs on whichever session is current when the store lock is
    /// taken; a search committing concurrently is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoSession`] before the first completed search.
    pub fn sort(
        &self,
        category: SortCategory,
        direction: SortDirection,
    ) -> Result<(), SearchError> {
        let sorted = self.store.modify(|session| {
            sort_movies(&mut session.movies, Some(category), direction);
            session.search_params.sort_category = Some(category);
            session.search_params.sort_direction = direction;
        });
        if sorted {
            Ok(())
        } else {
            Err(SearchError::NoSession)
        }
    }

    /// Snapshot of the current session, if any.
    pub fn session(&self) -> Option<SearchSession> {
        self.store.current()
    }

    /// Observe session replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<SearchSession>> {
        self.store.subscribe()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
