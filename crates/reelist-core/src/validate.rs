use chrono::{Datelike, Utc};
use thiserror::Error;

use crate::favorites::EntryDraft;

// First film ever shot; nothing predates it.
const EARLIEST_YEAR: i32 = 1888;
const MIN_TITLE_LEN: usize = 2;
const MIN_PLOT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must be at least {MIN_TITLE_LEN} characters")]
    TitleTooShort,
    #[error("plot must be at least {MIN_PLOT_LEN} characters")]
    PlotTooShort,
    #[error("year must be a number between {EARLIEST_YEAR} and {0}")]
    InvalidYear(i32),
    #[error("poster url must start with http:// or https://")]
    PosterUrlScheme,
    #[error("either a poster url or a local image is required")]
    PosterMissing,
}

/// Validate a hand-entered draft before it becomes an entry. Returns
/// every failing field so the form can flag them all at once.
pub fn validate_draft(draft: &EntryDraft, has_local_image: bool) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.title.chars().count() < MIN_TITLE_LEN {
        errors.push(ValidationError::TitleTooShort);
    }
    if draft.plot.chars().count() < MIN_PLOT_LEN {
        errors.push(ValidationError::PlotTooShort);
    }

    let current_year = Utc::now().year();
    match draft.year.parse::<i32>() {
        Ok(year) if (EARLIEST_YEAR..=current_year).contains(&year) => {}
        _ => errors.push(ValidationError::InvalidYear(current_year)),
    }

    match draft.poster_url.as_deref() {
        Some(url) if !url.is_empty() => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(ValidationError::PosterUrlScheme);
            }
        }
        _ => {
            if !has_local_image {
                errors.push(ValidationError::PosterMissing);
            }
        }
    }

    errors
}
