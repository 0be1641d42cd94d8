//! Response classification for decoded search payloads.
//!
//! The upstream API tags every body with a `Response` field holding the
//! string `"True"` or `"False"`. [`classify`] turns an untyped JSON value into
//! a [`PageResult`] without ever failing: anything that matches neither shape
//! becomes [`PageResult::Invalid`].

use serde_json::Value;

use crate::types::{Movie, PageResult};

/// Classify a decoded response body.
///
/// Rules, in order:
///
/// 1. Not an object, or `Response` is not `"True"`/`"False"` → `Invalid`
/// 2. `"False"` with a string `Error` → `Fail`, otherwise `Invalid`
/// 3. `"True"` with an array `Search` of movies and a `totalResults`
///    coercible to a non-negative integer → `Success`, otherwise `Invalid`
pub fn classify(raw: Value) -> PageResult {
    let Some(object) = raw.as_object() else {
        tracing::warn!("response is not a JSON object");
        return PageResult::Invalid { raw_payload: raw };
    };

    match object.get("Response").and_then(Value::as_str) {
        Some("False") => match object.get("Error").and_then(Value::as_str) {
            Some(message) => {
                tracing::debug!(error = message, "API reported search failure");
                PageResult::Fail {
                    error_message: message.to_owned(),
                }
            }
            None => {
                tracing::warn!("failure response without a string Error field");
                PageResult::Invalid { raw_payload: raw }
            }
        },
        Some("True") => {
            let total = object.get("totalResults").and_then(parse_total_results);
            let movies = object.get("Search").and_then(parse_movies);
            match (movies, total) {
                (Some(movies), Some(total_results)) => PageResult::Success {
                    movies,
                    total_results,
                },
                _ => {
                    tracing::warn!("success response missing Search array or totalResults");
                    PageResult::Invalid { raw_payload: raw }
                }
            }
        }
        _ => {
            tracing::warn!("response has no recognised Response discriminant");
            PageResult::Invalid { raw_payload: raw }
        }
    }
}

/// Coerce `totalResults` to a count. The API sends a decimal string; a plain
/// non-negative JSON integer is accepted too.
fn parse_total_results(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

fn parse_movies(value: &Value) -> Option<Vec<Movie>> {
    let items = value.as_array()?;
    items
        .iter()
        .map(|item| match serde_json::from_value::<Movie>(item.clone()) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(error = %e, "Search entry is not a movie");
                None
            }
        })
        .collect()
}
