//! Search orchestration: first page, bundled follow-up pages, sort.

use crate::config::PipelineConfig;
use crate::error::SearchError;
use crate::fetcher::PageFetcher;
use crate::query::SearchQuery;
use crate::types::{page_count, Movie, PageResult, SearchSession, SessionMode};

use super::schedule::{drive_bundles, schedule_pages};
use super::sort::sort_movies;

/// Fetch the page that anchors a search.
///
/// Unlike follow-up pages, a failure here aborts the search: without it the
/// total result count is unknown.
///
/// # Errors
///
/// - [`SearchError::Api`] for a `Response: "False"` payload
/// - [`SearchError::InvalidResponse`] for an unrecognised payload
/// - [`SearchError::Transport`] for network failures and non-2xx statuses
pub async fn fetch_first_page<F: PageFetcher>(
    fetcher: &F,
    query: &SearchQuery,
    page: u32,
) -> Result<(Vec<Movie>, u64), SearchError> {
    match fetcher.fetch_page(query, page).await {
        PageResult::Success {
            movies,
            total_results,
        } => Ok((movies, total_results)),
        PageResult::Fail { error_message } => {
            tracing::warn!(page, error = %error_message, "search failed");
            Err(SearchError::Api(error_message))
        }
        PageResult::Invalid { .. } => {
            tracing::warn!(page, "unexpected response shape for first page");
            Err(SearchError::InvalidResponse(format!(
                "page {page} matched neither the success nor the failure shape"
            )))
        }
        PageResult::TransportError { reason } => {
            tracing::warn!(page, error = %reason, "first page request failed");
            Err(SearchError::Transport(reason))
        }
    }
}

/// Fetch only the page named by `query.page` (default 1).
///
/// # Errors
///
/// Same as [`fetch_first_page`].
pub async fn search_single_page<F: PageFetcher>(
    fetcher: &F,
    query: &SearchQuery,
) -> Result<SearchSession, SearchError> {
    let page = query.page.unwrap_or(1);
    let (movies, total_results) = fetch_first_page(fetcher, query, page).await?;
    tracing::debug!(page, count = movies.len(), total_results, "single page search complete");

    Ok(SearchSession {
        movies,
        total_results,
        search_params: query.clone(),
        mode: SessionMode::SinglePage,
        page_limit: None,
    })
}

/// Fetch every page of `query`, merge, and sort.
///
/// # Pipeline
///
/// 1. Fetch page 1; any failure aborts with an error
/// 2. Derive the last page from `totalResults` (10 per page), capped by
///    `config.max_pages`
/// 3. Partition pages `2..=last` into bundles of `config.max_concurrency`
/// 4. Drive bundles sequentially, pages within a bundle concurrently;
///    failed pages are logged and dropped
/// 5. Sort by `query.sort_category`/`query.sort_direction` if a category is set
///
/// # Errors
///
/// Only a first-page failure is an error; see [`fetch_first_page`].
pub async fn search_all_pages<F: PageFetcher>(
    fetcher: &F,
    query: &SearchQuery,
    config: &PipelineConfig,
) -> Result<SearchSession, SearchError> {
    // 1. Anchor page.
    let (mut movies, total_results) = fetch_first_page(fetcher, query, 1).await?;

    // 2. Last page.
    let reported_pages = u32::try_from(page_count(total_results)).unwrap_or(u32::MAX);
    let last_page = match config.max_pages {
        Some(cap) => reported_pages.min(cap),
        None => reported_pages,
    };

    // 3–4. Remaining pages.
    let bundles = schedule_pages(last_page, config.max_concurrency);
    let summary = drive_bundles(fetcher, query, &bundles, &mut movies).await;
    if summary.pages_dropped > 0 {
        tracing::warn!(
            dropped = summary.pages_dropped,
            fetched = summary.pages_appended,
            "some pages failed; returning partial results"
        );
    }
    tracing::debug!(
        total_results,
        last_page,
        bundles = summary.bundles,
        count = movies.len(),
        "aggregated search complete"
    );

    // 5. Order.
    sort_movies(&mut movies, query.sort_category, query.sort_direction);

    Ok(SearchSession {
        movies,
        total_results,
        search_params: query.clone(),
        mode: SessionMode::Aggregated,
        page_limit: config.max_pages,
    })
}
