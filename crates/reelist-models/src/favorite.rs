use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detail::{MovieDetail, RatingScore};
use crate::movie::MediaType;

/// Where the poster image for a saved entry comes from. At most one
/// source is authoritative, enforced by the variant itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PosterSource {
    Remote(String),
    Local(Vec<u8>),
    #[default]
    None,
}

impl PosterSource {
    pub fn remote_url(&self) -> Option<&str> {
        match self {
            PosterSource::Remote(url) => Some(url),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PosterSource::None)
    }
}

/// How an entry got into the list. Derived from the id pattern alone,
/// never stored: provider ids look like "tt0120338", hand-entered
/// entries carry a locally generated id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    Remote,
    Custom,
}

impl EntryOrigin {
    pub fn of(id: &str) -> Self {
        match id.strip_prefix("tt") {
            Some(rest) if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) => {
                EntryOrigin::Remote
            }
            _ => EntryOrigin::Custom,
        }
    }
}

/// A movie saved to a user's list. Detail fields are copied at save
/// time, not re-fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub year: String,
    pub media_type: MediaType,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub ratings: Vec<RatingScore>,
    pub metascore: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub box_office: Option<String>,
    pub website: Option<String>,
    /// User-assigned star rating, 0-5 where 0 means unrated.
    pub user_rating: u8,
    pub date_added: DateTime<Utc>,
    pub poster: PosterSource,
}

impl FavoriteEntry {
    /// Copy a detail record into a new entry owned by `user_id`.
    pub fn from_detail(
        detail: &MovieDetail,
        user_id: &str,
        user_rating: u8,
        poster: PosterSource,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id: detail.id.clone(),
            user_id: user_id.to_string(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            media_type: detail.media_type,
            rated: detail.rated.clone(),
            released: detail.released.clone(),
            runtime: detail.runtime.clone(),
            genre: detail.genre.clone(),
            director: detail.director.clone(),
            writer: detail.writer.clone(),
            actors: detail.actors.clone(),
            plot: detail.plot.clone(),
            language: detail.language.clone(),
            country: detail.country.clone(),
            awards: detail.awards.clone(),
            ratings: detail.ratings.clone(),
            metascore: detail.metascore.clone(),
            imdb_rating: detail.imdb_rating.clone(),
            imdb_votes: detail.imdb_votes.clone(),
            box_office: detail.box_office.clone(),
            website: detail.website.clone(),
            user_rating,
            date_added,
            poster,
        }
    }

    pub fn origin(&self) -> EntryOrigin {
        EntryOrigin::of(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_origin_remote_ids() {
        assert_eq!(EntryOrigin::of("tt0120338"), EntryOrigin::Remote);
        assert_eq!(EntryOrigin::of("tt1"), EntryOrigin::Remote);
    }

    #[test]
    fn test_entry_origin_custom_ids() {
        assert_eq!(
            EntryOrigin::of("0a37a522-3a24-44ba-9e49-ec5c2b69a08b"),
            EntryOrigin::Custom
        );
        assert_eq!(EntryOrigin::of("tt"), EntryOrigin::Custom);
        assert_eq!(EntryOrigin::of("ttabc"), EntryOrigin::Custom);
        assert_eq!(EntryOrigin::of(""), EntryOrigin::Custom);
        // Numeric ids from the discovery provider count as custom until a
        // detail fetch supplies the provider-portable id.
        assert_eq!(EntryOrigin::of("603"), EntryOrigin::Custom);
    }

    #[test]
    fn test_poster_source_is_exclusive() {
        let remote = PosterSource::Remote("https://example.com/p.jpg".to_string());
        assert_eq!(remote.remote_url(), Some("https://example.com/p.jpg"));
        assert!(!remote.is_none());

        let local = PosterSource::Local(vec![0xFF, 0xD8]);
        assert_eq!(local.remote_url(), None);

        assert!(PosterSource::None.is_none());
    }
}
