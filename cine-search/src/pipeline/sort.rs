//! Client-side ordering of the aggregated collection.
//!
//! Orderings come from a comparator table keyed by
//! ([`SortCategory`], [`SortDirection`]). Descending comparators are the
//! exact inverse of their ascending counterparts, and sorting is stable, so
//! ties keep aggregation order.

use std::cmp::Ordering;

use crate::types::{Movie, SortCategory, SortDirection};

/// A comparator over movies.
pub type MovieComparator = fn(&Movie, &Movie) -> Ordering;

/// Look up the comparator for `(category, direction)`.
pub fn comparator(category: SortCategory, direction: SortDirection) -> MovieComparator {
    match (category, direction) {
        (SortCategory::Title, SortDirection::Ascending) => title_ascending,
        (SortCategory::Title, SortDirection::Descending) => title_descending,
        (SortCategory::Year, SortDirection::Ascending) => year_ascending,
        (SortCategory::Year, SortDirection::Descending) => year_descending,
    }
}

/// Sort `movies` in place. With no category the order is left untouched.
pub fn sort_movies(
    movies: &mut [Movie],
    category: Option<SortCategory>,
    direction: SortDirection,
) {
    let Some(category) = category else {
        return;
    };
    tracing::debug!(
        category = category.as_str(),
        direction = direction.as_str(),
        count = movies.len(),
        "sorting movies"
    );
    movies.sort_by(comparator(category, direction));
}

fn title_ascending(a: &Movie, b: &Movie) -> Ordering {
    a.title.to_uppercase().cmp(&b.title.to_uppercase())
}

fn title_descending(a: &Movie, b: &Movie) -> Ordering {
    title_ascending(a, b).reverse()
}

/// Numeric year, or `None` for ranges such as `2012–2015` and other
/// non-numeric values.
fn year_value(movie: &Movie) -> Option<i64> {
    movie.year.trim().parse().ok()
}

// Non-numeric years order after every numeric year and tie with each other.
fn year_ascending(a: &Movie, b: &Movie) -> Ordering {
    match (year_value(a), year_value(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn year_descending(a: &Movie, b: &Movie) -> Ordering {
    year_ascending(a, b).reverse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaType;

    fn movie(title: &str, year: &str) -> Movie {
        Movie {
            title: title.into(),
            media_type: MediaType::Movie,
            poster: "N/A".into(),
            year: year.into(),
            imdb_id: format!("tt-{title}-{year}"),
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    fn years(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.year.as_str()).collect()
    }

    fn sample() -> Vec<Movie> {
        vec![
            movie("batman returns", "1992"),
            movie("Batman Begins", "2005"),
            movie("Batman", "1989"),
            movie("The Batman", "2022"),
        ]
    }

    #[test]
    fn title_ascending_is_case_insensitive() {
        let mut movies = sample();
        sort_movies(&mut movies, Some(SortCategory::Title), SortDirection::Ascending);
        assert_eq!(
            titles(&movies),
            vec!["Batman", "Batman Begins", "batman returns", "The Batman"]
        );
    }

    #[test]
    fn title_descending_inverts() {
        let mut movies = sample();
        sort_movies(&mut movies, Some(SortCategory::Title), SortDirection::Descending);
        assert_eq!(
            titles(&movies),
            vec!["The Batman", "batman returns", "Batman Begins", "Batman"]
        );
    }

    #[test]
    fn year_sorts_numerically() {
        let mut movies = vec![movie("a", "2005"), movie("b", "989"), movie("c", "1992")];
        sort_movies(&mut movies, Some(SortCategory::Year), SortDirection::Ascending);
        assert_eq!(years(&movies), vec!["989", "1992", "2005"]);
        sort_movies(&mut movies, Some(SortCategory::Year), SortDirection::Descending);
        assert_eq!(years(&movies), vec!["2005", "1992", "989"]);
    }

    #[test]
    fn no_category_keeps_aggregation_order() {
        let mut movies = sample();
        let before = movies.clone();
        sort_movies(&mut movies, None, SortDirection::Descending);
        assert_eq!(movies, before);
    }

    #[test]
    fn sorting_is_idempotent() {
        for &category in SortCategory::all() {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let mut once = sample();
                sort_movies(&mut once, Some(category), direction);
                let mut twice = once.clone();
                sort_movies(&mut twice, Some(category), direction);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn descending_is_reverse_of_ascending_without_ties() {
        for &category in SortCategory::all() {
            let mut asc = sample();
            sort_movies(&mut asc, Some(category), SortDirection::Ascending);
            let mut desc = asc.clone();
            sort_movies(&mut desc, Some(category), SortDirection::Descending);
            let mut reversed = asc.clone();
            reversed.reverse();
            assert_eq!(desc, reversed);
        }
    }

    #[test]
    fn ties_keep_original_order() {
        let mut movies = vec![movie("first", "2000"), movie("second", "2000"), movie("third", "1999")];
        sort_movies(&mut movies, Some(SortCategory::Year), SortDirection::Descending);
        assert_eq!(titles(&movies), vec!["first", "second", "third"]);
    }

    #[test]
    fn range_years_do_not_panic_or_drop_movies() {
        let mut movies = vec![
            movie("s1", "2012–2015"),
            movie("m1", "2001"),
            movie("s2", "2019–"),
            movie("m2", "1995"),
            movie("x", ""),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            sort_movies(&mut movies, Some(SortCategory::Year), direction);
            assert_eq!(movies.len(), 5);
            let mut ids: Vec<&str> = titles(&movies);
            ids.sort_unstable();
            assert_eq!(ids, vec!["m1", "m2", "s1", "s2", "x"]);
        }
    }

    #[test]
    fn comparator_table_covers_every_key() {
        let a = movie("Alpha", "1990");
        let b = movie("beta", "2000");
        assert_eq!(
            comparator(SortCategory::Title, SortDirection::Ascending)(&a, &b),
            Ordering::Less
        );
        assert_eq!(
            comparator(SortCategory::Title, SortDirection::Descending)(&a, &b),
            Ordering::Greater
        );
        assert_eq!(
            comparator(SortCategory::Year, SortDirection::Ascending)(&a, &b),
            Ordering::Less
        );
        assert_eq!(
            comparator(SortCategory::Year, SortDirection::Descending)(&a, &b),
            Ordering::Greater
        );
    }
}
