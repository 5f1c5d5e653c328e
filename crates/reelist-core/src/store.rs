use reelist_config::PathManager;
use reelist_models::{FavoriteEntry, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("storage io: {0}")]
    Io(String),
    #[error("storage encoding: {0}")]
    Encoding(String),
    #[error("email already registered: {0}")]
    EmailTaken(String),
}

impl From<std::io::Error> for RepoError {
    fn from(err: std::io::Error) -> Self {
        RepoError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Encoding(err.to_string())
    }
}

/// The durable keyed object store behind the favorites list. The store
/// confirms every write before callers commit in-memory state.
pub trait FavoritesRepo: Send + Sync {
    fn entries_for_user(&self, user_id: &str) -> Result<Vec<FavoriteEntry>, RepoError>;
    fn insert(&self, entry: &FavoriteEntry) -> Result<(), RepoError>;
    fn update(&self, entry: &FavoriteEntry) -> Result<(), RepoError>;
    fn delete(&self, user_id: &str, entry_id: &str) -> Result<(), RepoError>;
}

/// One JSON file per user's entries plus a users file, all under the
/// managed data directory. A corrupted file is logged, deleted, and
/// treated as empty rather than wedging every later save.
pub struct JsonFavoritesRepo {
    favorites_dir: PathBuf,
    users_file: PathBuf,
}

impl JsonFavoritesRepo {
    pub fn new(paths: &PathManager) -> Result<Self, RepoError> {
        let favorites_dir = paths.favorites_dir();
        std::fs::create_dir_all(&favorites_dir)?;
        if let Some(parent) = paths.users_file().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            favorites_dir,
            users_file: paths.users_file(),
        })
    }

    fn entries_path(&self, user_id: &str) -> PathBuf {
        self.favorites_dir.join(format!("{}.json", user_id))
    }

    fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RepoError> {
        if !path.exists() {
            debug!("No data file at {:?}, starting empty", path);
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(data) => Ok(data),
            Err(e) => {
                warn!("Corrupted data file {:?}: {}. Deleting it.", path, e);
                if let Err(rm_err) = std::fs::remove_file(path) {
                    warn!("Failed to delete corrupted file: {}", rm_err);
                }
                Ok(Vec::new())
            }
        }
    }

    fn save_list<T: Serialize>(path: &Path, data: &[T]) -> Result<(), RepoError> {
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(path, json)?;
        debug!("Saved {} items to {:?}", data.len(), path);
        Ok(())
    }

    fn save_entries(&self, user_id: &str, entries: &[FavoriteEntry]) -> Result<(), RepoError> {
        Self::save_list(&self.entries_path(user_id), entries)
    }

    pub fn users(&self) -> Result<Vec<User>, RepoError> {
        Self::load_list(&self.users_file)
    }

    /// Register a user. Emails are unique case-insensitively.
    pub fn insert_user(&self, user: &User) -> Result<(), RepoError> {
        let mut users = self.users()?;
        if users.iter().any(|u| u.email_matches(&user.email)) {
            return Err(RepoError::EmailTaken(user.email.clone()));
        }
        users.push(user.clone());
        Self::save_list(&self.users_file, &users)
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users()?.into_iter().find(|u| u.email_matches(email)))
    }

    /// Remove a user and everything they own.
    pub fn delete_user(&self, user_id: &str) -> Result<(), RepoError> {
        let mut users = self.users()?;
        users.retain(|u| u.id != user_id);
        Self::save_list(&self.users_file, &users)?;

        let entries_path = self.entries_path(user_id);
        if entries_path.exists() {
            std::fs::remove_file(&entries_path)?;
            debug!("Cascade-deleted entries for user {}", user_id);
        }
        Ok(())
    }
}

impl FavoritesRepo for JsonFavoritesRepo {
    fn entries_for_user(&self, user_id: &str) -> Result<Vec<FavoriteEntry>, RepoError> {
        Self::load_list(&self.entries_path(user_id))
    }

    fn insert(&self, entry: &FavoriteEntry) -> Result<(), RepoError> {
        let mut entries = self.entries_for_user(&entry.user_id)?;
        // Uniqueness by id; a repeat insert is a no-op, not an error.
        if entries.iter().any(|e| e.id == entry.id) {
            debug!("Entry {} already stored for user {}", entry.id, entry.user_id);
            return Ok(());
        }
        entries.push(entry.clone());
        self.save_entries(&entry.user_id, &entries)
    }

    fn update(&self, entry: &FavoriteEntry) -> Result<(), RepoError> {
        let mut entries = self.entries_for_user(&entry.user_id)?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => *slot = entry.clone(),
            None => entries.push(entry.clone()),
        }
        self.save_entries(&entry.user_id, &entries)
    }

    fn delete(&self, user_id: &str, entry_id: &str) -> Result<(), RepoError> {
        let mut entries = self.entries_for_user(user_id)?;
        let before = entries.len();
        entries.retain(|e| e.id != entry_id);
        if entries.len() == before {
            return Ok(());
        }
        self.save_entries(user_id, &entries)
    }
}
