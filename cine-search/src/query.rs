//! Search query parameters, validation, and request parameter encoding.
//!
//! Validation runs before anything touches the network; a query that fails
//! [`SearchQuery::validate`] never produces a request.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{MediaType, SortCategory, SortDirection};

/// Earliest year accepted by the year filter.
pub const MIN_YEAR: u32 = 1878;
/// Latest year accepted by the year filter.
pub const MAX_YEAR: u32 = 2025;

/// Immutable input to a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Title to search for. Required and non-blank.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    /// Four-digit release year. A blank string counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_category: Option<SortCategory>,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl SearchQuery {
    /// Query for `title` with every optional field unset.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            media_type: None,
            year: None,
            page: None,
            sort_category: None,
            sort_direction: SortDirection::Ascending,
        }
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_sort(mut self, category: SortCategory, direction: SortDirection) -> Self {
        self.sort_category = Some(category);
        self.sort_direction = direction;
        self
    }

    /// Check user-supplied fields.
    ///
    /// Rules:
    /// - `title` must contain a non-whitespace character
    /// - `year`, when non-blank, must be exactly four ASCII digits within
    ///   [`MIN_YEAR`]`..=`[`MAX_YEAR`]
    /// - `page`, when set, must be at least 1
    /// - `media_type` cannot be [`MediaType::Other`]
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] describing the first failing rule.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.title.trim().is_empty() {
            return Err(SearchError::Validation(
                "title is required and must be a non-empty string".into(),
            ));
        }
        if let Some(year) = self.year_filter() {
            if !year.chars().all(|c| c.is_ascii_digit()) {
                return Err(SearchError::Validation(
                    "year may only contain digits 0-9".into(),
                ));
            }
            if year.len() != 4 {
                return Err(SearchError::Validation(
                    "year must be 4 digits, e.g. \"2012\"".into(),
                ));
            }
            let value: u32 = year
                .parse()
                .map_err(|_| SearchError::Validation("year may only contain digits 0-9".into()))?;
            if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
                return Err(SearchError::Validation(format!(
                    "year must be in range of {MIN_YEAR} - {MAX_YEAR}"
                )));
            }
        }
        if self.page == Some(0) {
            return Err(SearchError::Validation("page must be at least 1".into()));
        }
        if self.media_type == Some(MediaType::Other) {
            return Err(SearchError::Validation(
                "media type must be movie, series or episode".into(),
            ));
        }
        Ok(())
    }

    /// The year filter, with blank strings treated as absent.
    ///
    /// A non-blank value is returned untrimmed; surrounding whitespace fails
    /// [`Self::validate`].
    pub fn year_filter(&self) -> Option<&str> {
        self.year.as_deref().filter(|y| !y.trim().is_empty())
    }

    /// Upstream request parameters for `page`, excluding the API key.
    ///
    /// `page` overrides whatever page the query carries.
    pub fn request_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("s", self.title.clone())];
        if let Some(media_type) = self.media_type {
            params.push(("type", media_type.as_str().to_owned()));
        }
        if let Some(year) = self.year_filter() {
            params.push(("y", year.to_owned()));
        }
        params.push(("page", page.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_query_is_valid() {
        assert!(SearchQuery::new("Batman").validate().is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let err = SearchQuery::new("").validate().unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn whitespace_title_rejected() {
        assert!(SearchQuery::new("   ").validate().is_err());
    }

    #[test]
    fn non_numeric_year_rejected() {
        let err = SearchQuery::new("Batman")
            .with_year("abc")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("digits"));
    }

    #[test]
    fn decimal_year_rejected() {
        assert!(SearchQuery::new("Batman").with_year("20.5").validate().is_err());
    }

    #[test]
    fn short_year_rejected() {
        let err = SearchQuery::new("Batman")
            .with_year("199")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("4 digits"));
    }

    #[test]
    fn year_range_bounds() {
        assert!(SearchQuery::new("x").with_year("1878").validate().is_ok());
        assert!(SearchQuery::new("x").with_year("2025").validate().is_ok());
        assert!(SearchQuery::new("x").with_year("1877").validate().is_err());
        let err = SearchQuery::new("x").with_year("2026").validate().unwrap_err();
        assert!(err.to_string().contains("1878 - 2025"));
    }

    #[test]
    fn blank_year_counts_as_absent() {
        let q = SearchQuery::new("Batman").with_year("  ");
        assert!(q.validate().is_ok());
        assert!(q.year_filter().is_none());
    }

    #[test]
    fn padded_year_is_rejected() {
        for year in [" 2012", "2012 ", "\t1999"] {
            let err = SearchQuery::new("Batman")
                .with_year(year)
                .validate()
                .unwrap_err();
            assert!(matches!(err, SearchError::Validation(_)), "{year:?}");
        }
    }

    #[test]
    fn page_zero_rejected() {
        assert!(SearchQuery::new("Batman").with_page(0).validate().is_err());
    }

    #[test]
    fn other_media_type_rejected() {
        let q = SearchQuery::new("Batman").with_media_type(MediaType::Other);
        assert!(q.validate().is_err());
    }

    #[test]
    fn request_params_include_optional_filters() {
        let q = SearchQuery::new("Batman")
            .with_media_type(MediaType::Series)
            .with_year("2004")
            .with_page(7);
        let params = q.request_params(3);
        assert_eq!(
            params,
            vec![
                ("s", "Batman".to_string()),
                ("type", "series".to_string()),
                ("y", "2004".to_string()),
                ("page", "3".to_string()),
            ]
        );
    }

    #[test]
    fn request_params_omit_unset_filters() {
        let params = SearchQuery::new("Alien").request_params(1);
        assert_eq!(
            params,
            vec![("s", "Alien".to_string()), ("page", "1".to_string())]
        );
    }

    #[test]
    fn sort_direction_defaults_when_missing_from_json() {
        let q: SearchQuery =
            serde_json::from_str(r#"{"title":"Batman","sort_category":"year"}"#).expect("decode");
        assert_eq!(q.sort_category, Some(SortCategory::Year));
        assert_eq!(q.sort_direction, SortDirection::Ascending);
    }
}
