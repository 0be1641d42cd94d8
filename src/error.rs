//! Error types for the cine host.

use cine_search::SearchError;

/// Top-level error type for the host shell.
#[derive(Debug, thiserror::Error)]
pub enum CineError {
    /// Configuration file or environment error.
    #[error("config error: {0}")]
    Config(String),

    /// Search pipeline error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bridge read/write or serialization error.
    #[error("channel error: {0}")]
    Channel(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CineError>;
