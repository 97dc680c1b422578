// Derived list view: filter, search, then sort

use std::cmp::Reverse;
use watchlist_models::{Movie, SortOption, WatchedFilter};

/// Everything the derived view depends on besides the movie list itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub filter: WatchedFilter,
    pub sort: SortOption,
}

impl ViewQuery {
    pub fn new(search: impl Into<String>, filter: WatchedFilter, sort: SortOption) -> Self {
        Self {
            search: search.into(),
            filter,
            sort,
        }
    }
}

/// Project `movies` for display without touching the source slice.
///
/// The watched filter applies first, then a case-insensitive substring
/// match of the trimmed search text against titles, then a stable sort.
/// Equal keys keep their input order.
pub fn derive_view<'a>(movies: &'a [Movie], query: &ViewQuery) -> Vec<&'a Movie> {
    let needle = query.search.trim().to_lowercase();

    let mut result: Vec<&Movie> = movies
        .iter()
        .filter(|m| query.filter.matches(m.watched))
        .filter(|m| needle.is_empty() || m.title.to_lowercase().contains(&needle))
        .collect();

    sort_movies(&mut result, query.sort);
    result
}

fn sort_movies(movies: &mut [&Movie], sort: SortOption) {
    match sort {
        SortOption::Newest => movies.sort_by_key(|m| Reverse(m.created_at)),
        SortOption::Oldest => movies.sort_by_key(|m| m.created_at),
        SortOption::YearAsc => movies.sort_by_key(|m| m.year.unwrap_or(0)),
        SortOption::YearDesc => movies.sort_by_key(|m| Reverse(m.year.unwrap_or(0))),
        SortOption::Rating => movies.sort_by_key(|m| Reverse(m.rating.unwrap_or(0))),
    }
}
