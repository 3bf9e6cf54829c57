//! # Error Types Module
//!
//! Error kinds surfaced by the store layer and by callback payload parsing.
//! "Nothing found" is not an error: lookups return `Option` or an empty `Vec`.

/// Failures of the SQLite-backed movie store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection or query failure
    #[error("database unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
    /// The configured database URL could not be parsed
    #[error("invalid database url '{url}': {source}")]
    InvalidDatabaseUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Malformed inline-button payloads
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallbackError {
    #[error("callback payload '{0}' has no '_' separator")]
    MissingSeparator(String),
    #[error("unknown callback action '{0}'")]
    UnknownAction(String),
    #[error("invalid movie id '{0}' in callback payload")]
    InvalidMovieId(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
