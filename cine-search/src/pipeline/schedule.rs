//! Bundle partitioning and the sequential-bundle, concurrent-page driver.

use crate::fetcher::PageFetcher;
use crate::query::SearchQuery;
use crate::types::Movie;

use super::aggregate::{fold, FoldOutcome};

/// A group of pages fetched concurrently as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBundle {
    pages: Vec<u32>,
}

impl PageBundle {
    /// Page numbers in this bundle, ascending.
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Counters from one [`drive_bundles`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveSummary {
    pub bundles: usize,
    pub pages_appended: usize,
    pub pages_dropped: usize,
    pub movies_appended: usize,
}

/// Partition pages `2..=total_pages` into consecutive bundles of at most
/// `max_concurrency` pages.
///
/// Page 1 is never scheduled; the caller has already fetched it. Produces
/// `ceil((total_pages - 1) / max_concurrency)` bundles. A `max_concurrency`
/// of zero is treated as one.
pub fn schedule_pages(total_pages: u32, max_concurrency: usize) -> Vec<PageBundle> {
    if total_pages < 2 {
        return Vec::new();
    }
    let pages: Vec<u32> = (2..=total_pages).collect();
    pages
        .chunks(max_concurrency.max(1))
        .map(|chunk| PageBundle {
            pages: chunk.to_vec(),
        })
        .collect()
}

/// Fetch every bundle and fold each page into `movies`.
///
/// Bundles run strictly one after another. Within a bundle all fetches are
/// issued together and awaited with [`futures::future::join_all`], so one
/// failing page never cancels its siblings and the next bundle starts only
/// after every page of the current one has settled. Settled pages are folded
/// in page order.
pub async fn drive_bundles<F: PageFetcher>(
    fetcher: &F,
    query: &SearchQuery,
    bundles: &[PageBundle],
    movies: &mut Vec<Movie>,
) -> DriveSummary {
    let mut summary = DriveSummary::default();

    for (index, bundle) in bundles.iter().enumerate() {
        tracing::debug!(bundle = index, pages = ?bundle.pages(), "fetching page bundle");

        let fetches = bundle.pages().iter().map(|&page| async move {
            let result = fetcher.fetch_page(query, page).await;
            (page, result)
        });
        let outcomes = futures::future::join_all(fetches).await;

        for (page, result) in outcomes {
            match fold(page, result, movies) {
                FoldOutcome::Appended(count) => {
                    summary.pages_appended += 1;
                    summary.movies_appended += count;
                }
                FoldOutcome::Dropped => summary.pages_dropped += 1,
            }
        }
        summary.bundles += 1;
    }

    summary
}
