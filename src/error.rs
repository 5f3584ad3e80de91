use thiserror::Error;
use uuid::Uuid;

/// Failures raised by a [`MatchStore`](crate::db::MatchStore) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// `insert` was called with an id that is already stored
    #[error("match {0} already exists")]
    Duplicate(Uuid),

    /// `update` was called for an id that is not stored
    #[error("match {0} does not exist")]
    Missing(Uuid),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A thread panicked while holding the SQLite connection lock
    #[error("store lock poisoned")]
    Poisoned,
}

/// Errors surfaced by the match registry to its callers.
#[derive(Error, Debug)]
pub enum ScoreboardError {
    /// Malformed input: empty or equal team names, negative scores
    #[error("{0}")]
    Validation(String),

    /// A business rule was violated (a team is already playing)
    #[error("{0}")]
    Conflict(String),

    #[error("no match with id {0}")]
    NotFound(Uuid),

    /// Persistence failure, passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ScoreboardError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ScoreboardError>;
