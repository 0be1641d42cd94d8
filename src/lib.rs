//! # cine
//!
//! Host shell for the `cine-search` pipeline: configuration loading and a
//! newline-delimited JSON bridge that lets a frontend submit searches,
//! page through results and re-sort them.

pub mod config;
pub mod error;
pub mod host;

pub use config::CineConfig;
pub use error::{CineError, Result};
