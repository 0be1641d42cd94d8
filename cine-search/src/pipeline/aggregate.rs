//! Folding page outcomes into the working movie collection.

use crate::types::{Movie, PageResult};

/// What [`fold`] did with one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    /// The page succeeded and this many movies were appended.
    Appended(usize),
    /// The page failed and contributed nothing.
    Dropped,
}

/// Fold one page outcome into `into`.
///
/// `Success` appends its movies in order. Every other outcome is logged at
/// warn level and dropped; nothing is retried and nothing aborts.
pub fn fold(page: u32, result: PageResult, into: &mut Vec<Movie>) -> FoldOutcome {
    match result {
        PageResult::Success { movies, .. } => {
            let count = movies.len();
            tracing::debug!(page, count, "page aggregated");
            into.extend(movies);
            FoldOutcome::Appended(count)
        }
        PageResult::Fail { error_message } => {
            tracing::warn!(page, error = %error_message, "page search failed; dropping page");
            FoldOutcome::Dropped
        }
        PageResult::Invalid { .. } => {
            tracing::warn!(page, "unexpected page response shape; dropping page");
            FoldOutcome::Dropped
        }
        PageResult::TransportError { reason } => {
            tracing::warn!(page, error = %reason, "page request failed; dropping page");
            FoldOutcome::Dropped
        }
    }
}
