use reelist_models::{EntryOrigin, FavoriteEntry};
use std::cmp::Ordering;

/// Which id partition of the list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFilter {
    #[default]
    All,
    Custom,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateAdded,
    Title,
    Rating,
    Year,
}

/// Combined filter and sort criteria for the saved list. All filters
/// compose with AND; sorting happens after filtering.
#[derive(Debug, Clone, Default)]
pub struct FavoritesQuery {
    /// Case-insensitive substring match on the title; empty matches all.
    pub search_text: String,
    /// Exact user-rating match; `None` matches all.
    pub rating_filter: Option<u8>,
    pub source_filter: SourceFilter,
    pub sort_key: SortKey,
    /// Keeps each key's base direction when true, inverts it when
    /// false. Title's base direction is lexicographic ascending; date
    /// added, rating, and year order highest/newest first. The
    /// asymmetry is intentional product behavior.
    pub ascending: bool,
}

impl FavoritesQuery {
    pub fn new() -> Self {
        Self {
            ascending: true,
            ..Self::default()
        }
    }
}

fn parse_year(entry: &FavoriteEntry) -> i32 {
    entry.year.parse().unwrap_or(0)
}

fn base_ordering(a: &FavoriteEntry, b: &FavoriteEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Rating => b.user_rating.cmp(&a.user_rating),
        SortKey::DateAdded => b.date_added.cmp(&a.date_added),
        SortKey::Year => parse_year(b).cmp(&parse_year(a)),
    }
}

/// Filter and sort a favorites collection. The sort is stable so equal
/// keys keep their relative order across re-renders.
pub fn apply_filters(entries: &[FavoriteEntry], query: &FavoritesQuery) -> Vec<FavoriteEntry> {
    let needle = query.search_text.to_lowercase();

    let mut out: Vec<FavoriteEntry> = entries
        .iter()
        .filter(|entry| {
            let matches_search =
                needle.is_empty() || entry.title.to_lowercase().contains(&needle);
            let matches_rating = query
                .rating_filter
                .map_or(true, |rating| entry.user_rating == rating);
            let matches_source = match query.source_filter {
                SourceFilter::All => true,
                SourceFilter::Custom => entry.origin() == EntryOrigin::Custom,
                SourceFilter::Remote => entry.origin() == EntryOrigin::Remote,
            };
            matches_search && matches_rating && matches_source
        })
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        let ordering = base_ordering(a, b, query.sort_key);
        if query.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
    out
}
