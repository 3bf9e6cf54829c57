//! # Movie Data Model
//!
//! Rows read from the `movies` catalog and the outcomes of favorites
//! mutations.

/// A catalog record
///
/// `year` and `imdb_rating` are read back as text whatever their stored
/// representation, so `9.0` and `"8.5"` look the same to callers.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    /// Opaque poster reference: an http(s) URL or a Telegram file id
    pub photo: String,
    pub title: String,
    pub year: String,
    pub genre: String,
    pub imdb_rating: String,
    pub description: String,
}

/// Result of adding a movie to a user's favorites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Result of removing a movie from a user's favorites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
}

impl AddOutcome {
    pub(crate) fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            AddOutcome::Added
        } else {
            AddOutcome::AlreadyPresent
        }
    }
}

impl RemoveOutcome {
    pub(crate) fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotPresent
        }
    }
}
