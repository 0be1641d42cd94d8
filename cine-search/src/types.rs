//! Core types: movies, page outcomes, sort keys and the search session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::query::SearchQuery;

/// Number of results per page, fixed by the upstream API.
pub const RESULTS_PER_PAGE: u64 = 10;

/// Media type filter and per-result media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
    /// Any type the API reports that has no dedicated variant (e.g. `game`).
    /// Never sent as a filter.
    #[serde(other)]
    Other,
}

impl MediaType {
    /// Wire name used for the `type` request parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Other => "other",
        }
    }

    /// Parse a filter value. Only the three filterable types are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            "episode" => Some(Self::Episode),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search hit as returned by the API.
///
/// Field names follow the upstream JSON so the same type decodes responses
/// and serializes sessions for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Type")]
    pub media_type: MediaType,
    #[serde(rename = "Poster")]
    pub poster: String,
    /// Release year, or a range such as `2012–2015` for series.
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

/// Field the aggregated collection can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCategory {
    Title,
    Year,
}

impl SortCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Year => "year",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "title" => Some(Self::Title),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn all() -> &'static [SortCategory] {
        &[Self::Title, Self::Year]
    }
}

/// Sort direction. Always present on a query; ignored without a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ascending" => Some(Self::Ascending),
            "descending" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Outcome of fetching and classifying one page. Exactly one tag holds.
#[derive(Debug, Clone, PartialEq)]
pub enum PageResult {
    /// Well-formed `Response: "True"` payload.
    Success {
        movies: Vec<Movie>,
        total_results: u64,
    },
    /// Well-formed `Response: "False"` payload.
    Fail { error_message: String },
    /// Payload matching neither known shape.
    Invalid { raw_payload: serde_json::Value },
    /// Network failure, non-2xx status, or an undecodable body.
    TransportError { reason: String },
}

impl PageResult {
    /// Short tag name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Fail { .. } => "fail",
            Self::Invalid { .. } => "invalid",
            Self::TransportError { .. } => "transport_error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// How the movies of a session were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// One upstream page; pagination goes back to the API.
    SinglePage,
    /// Every page merged client-side; pagination slices `movies`.
    Aggregated,
}

/// The UI-facing result of the latest completed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSession {
    pub movies: Vec<Movie>,
    pub total_results: u64,
    pub search_params: SearchQuery,
    pub mode: SessionMode,
    /// Last page an aggregated search was allowed to fetch, when capped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<u32>,
}

impl SearchSession {
    /// Number of pages the session can show: `ceil(total_results / 10)`,
    /// bounded by `page_limit`.
    pub fn total_pages(&self) -> u64 {
        let reported = page_count(self.total_results);
        match self.page_limit {
            Some(limit) => reported.min(u64::from(limit)),
            None => reported,
        }
    }

    /// Movies for the page named in `search_params`.
    ///
    /// Aggregated sessions are sliced client-side; a single-page session
    /// already holds exactly that page.
    pub fn page_movies(&self) -> &[Movie] {
        match self.mode {
            SessionMode::SinglePage => &self.movies,
            SessionMode::Aggregated => {
                let page = u64::from(self.search_params.page.unwrap_or(1).max(1));
                let start = usize::try_from((page - 1) * RESULTS_PER_PAGE).unwrap_or(usize::MAX);
                if start >= self.movies.len() {
                    return &[];
                }
                let end = start
                    .saturating_add(RESULTS_PER_PAGE as usize)
                    .min(self.movies.len());
                &self.movies[start..end]
            }
        }
    }
}

/// `ceil(total_results / RESULTS_PER_PAGE)`.
pub fn page_count(total_results: u64) -> u64 {
    total_results.div_ceil(RESULTS_PER_PAGE)
}
