use chrono::Utc;
use reelist_models::{EntryOrigin, FavoriteEntry, MediaType, MovieDetail, PosterSource};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::StateCell;
use crate::store::{FavoritesRepo, RepoError};
use crate::validate::{validate_draft, ValidationError};

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("persistence failed: {0}")]
    PersistenceFailed(#[from] RepoError),
    #[error("entry validation failed")]
    Validation(Vec<ValidationError>),
    #[error("no saved entry with id {0}")]
    NotFound(String),
}

/// Fields of a hand-entered movie form. Everything beyond the required
/// trio is optional.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub title: String,
    pub year: String,
    pub plot: String,
    pub user_rating: u8,
    pub poster_url: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl EntryDraft {
    fn into_detail(self, id: String) -> MovieDetail {
        MovieDetail {
            id,
            title: self.title,
            year: self.year,
            media_type: MediaType::Movie,
            poster: self.poster_url.filter(|u| !u.is_empty()),
            rated: self.rated,
            released: self.released,
            runtime: self.runtime,
            genre: self.genre,
            director: self.director,
            writer: self.writer,
            actors: self.actors,
            plot: Some(self.plot),
            language: self.language,
            country: self.country,
            awards: None,
            ratings: Vec::new(),
            metascore: None,
            imdb_rating: None,
            imdb_votes: None,
            box_office: None,
            website: None,
        }
    }
}

/// Field-level changes for the edit flow. `None` leaves a field alone;
/// setting `poster` replaces the whole source, so switching from a url
/// to a local image (or back) can never leave both populated.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub year: Option<String>,
    pub plot: Option<String>,
    pub user_rating: Option<u8>,
    pub poster: Option<PosterSource>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

/// One user's saved list, reconciled against the persistence
/// collaborator. Every mutation persists first and only then updates
/// the published snapshot, so a failed write leaves callers seeing the
/// pre-mutation state.
pub struct FavoritesStore {
    repo: Arc<dyn FavoritesRepo>,
    user_id: String,
    entries: StateCell<Vec<FavoriteEntry>>,
}

impl FavoritesStore {
    /// Open the list for an explicit session user.
    pub fn new(repo: Arc<dyn FavoritesRepo>, user_id: impl Into<String>) -> Result<Self, FavoritesError> {
        let user_id = user_id.into();
        let entries = repo.entries_for_user(&user_id)?;
        debug!("Loaded {} saved entries for user {}", entries.len(), user_id);
        Ok(Self {
            repo,
            user_id,
            entries: StateCell::new(entries),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn entries(&self) -> Vec<FavoriteEntry> {
        self.entries.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Vec<FavoriteEntry>> {
        self.entries.subscribe()
    }

    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.entries.get().iter().any(|e| e.id == movie_id)
    }

    /// Save a fetched detail record. Repeat saves of the same id are
    /// no-ops. A usable remote poster wins over a supplied local image.
    pub fn add(
        &self,
        detail: &MovieDetail,
        user_rating: u8,
        local_image: Option<Vec<u8>>,
    ) -> Result<(), FavoritesError> {
        if self.is_favorite(&detail.id) {
            debug!("{} is already saved, nothing to do", detail.id);
            return Ok(());
        }

        let poster = match (&detail.poster, local_image) {
            (Some(url), _) if !url.is_empty() => PosterSource::Remote(url.clone()),
            (_, Some(bytes)) => PosterSource::Local(bytes),
            _ => PosterSource::None,
        };
        let entry = FavoriteEntry::from_detail(detail, &self.user_id, user_rating, poster, Utc::now());

        self.repo.insert(&entry)?;
        info!("Saved {} ({}) for user {}", entry.title, entry.id, self.user_id);
        self.entries.modify(|entries| entries.push(entry));
        Ok(())
    }

    /// Save a hand-entered movie under a freshly generated id. Returns
    /// the id so the form can navigate to the new entry.
    pub fn add_custom(
        &self,
        draft: EntryDraft,
        local_image: Option<Vec<u8>>,
    ) -> Result<String, FavoritesError> {
        let errors = validate_draft(&draft, local_image.is_some());
        if !errors.is_empty() {
            return Err(FavoritesError::Validation(errors));
        }

        let id = Uuid::new_v4().to_string();
        let user_rating = draft.user_rating;
        let detail = draft.into_detail(id.clone());
        self.add(&detail, user_rating, local_image)?;
        Ok(id)
    }

    /// Remove a saved entry. Removing an id that was never saved is a
    /// benign no-op.
    pub fn remove(&self, movie_id: &str) -> Result<(), FavoritesError> {
        if !self.is_favorite(movie_id) {
            debug!("{} is not in the list, nothing to remove", movie_id);
            return Ok(());
        }

        self.repo.delete(&self.user_id, movie_id)?;
        info!("Removed {} for user {}", movie_id, self.user_id);
        self.entries.modify(|entries| entries.retain(|e| e.id != movie_id));
        Ok(())
    }

    /// Flip membership for a detail record; returns the new state.
    pub fn toggle(&self, detail: &MovieDetail) -> Result<bool, FavoritesError> {
        if self.is_favorite(&detail.id) {
            self.remove(&detail.id)?;
            Ok(false)
        } else {
            self.add(detail, 0, None)?;
            Ok(true)
        }
    }

    /// Edit an existing entry in place. Unlike `remove`, a missing id
    /// here is an error: the edit form was opened on something that no
    /// longer exists.
    pub fn update(&self, entry_id: &str, patch: EntryPatch) -> Result<(), FavoritesError> {
        let entries = self.entries.get();
        let current = entries
            .iter()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| FavoritesError::NotFound(entry_id.to_string()))?;

        let mut updated = current.clone();
        if let Some(title) = patch.title {
            updated.title = title;
        }
        if let Some(year) = patch.year {
            updated.year = year;
        }
        if let Some(plot) = patch.plot {
            updated.plot = Some(plot);
        }
        if let Some(rating) = patch.user_rating {
            updated.user_rating = rating;
        }
        if let Some(poster) = patch.poster {
            updated.poster = poster;
        }
        if let Some(rated) = patch.rated {
            updated.rated = Some(rated);
        }
        if let Some(released) = patch.released {
            updated.released = Some(released);
        }
        if let Some(runtime) = patch.runtime {
            updated.runtime = Some(runtime);
        }
        if let Some(genre) = patch.genre {
            updated.genre = Some(genre);
        }
        if let Some(director) = patch.director {
            updated.director = Some(director);
        }
        if let Some(writer) = patch.writer {
            updated.writer = Some(writer);
        }
        if let Some(actors) = patch.actors {
            updated.actors = Some(actors);
        }
        if let Some(language) = patch.language {
            updated.language = Some(language);
        }
        if let Some(country) = patch.country {
            updated.country = Some(country);
        }

        // Hand-entered entries go back through form validation; entries
        // copied from a provider keep whatever the provider said.
        if updated.origin() == EntryOrigin::Custom {
            let draft = EntryDraft {
                title: updated.title.clone(),
                year: updated.year.clone(),
                plot: updated.plot.clone().unwrap_or_default(),
                user_rating: updated.user_rating,
                poster_url: updated.poster.remote_url().map(str::to_string),
                ..EntryDraft::default()
            };
            let has_local_image = matches!(updated.poster, PosterSource::Local(_));
            let errors = validate_draft(&draft, has_local_image);
            if !errors.is_empty() {
                return Err(FavoritesError::Validation(errors));
            }
        }

        self.repo.update(&updated)?;
        info!("Updated {} for user {}", entry_id, self.user_id);
        self.entries.modify(|entries| {
            if let Some(slot) = entries.iter_mut().find(|e| e.id == entry_id) {
                *slot = updated;
            }
        });
        Ok(())
    }
}
