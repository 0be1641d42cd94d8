//! Error types for the cine-search crate.
//!
//! Only whole-search failures surface as [`SearchError`]. Failures of a
//! single follow-up page are folded into [`crate::types::PageResult`] and
//! logged instead. No API keys appear in error messages.

/// Errors that can abort a search operation.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was rejected before any request was sent.
    #[error("invalid query: {0}")]
    Validation(String),

    /// The first page could not be fetched (network failure or non-2xx status).
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered `Response: "False"` for the first page.
    #[error("search failed: {0}")]
    Api(String),

    /// The first page did not match either known response shape.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// Invalid client or pipeline configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A page change was requested before any search completed.
    #[error("no active search session")]
    NoSession,
}

/// Convenience type alias for cine-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
