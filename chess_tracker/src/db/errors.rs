//! Storage error types shared by the roster, scoring, ranking, and export
//! managers.

use thiserror::Error;

/// Storage and domain-validation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Query exceeded its timeout
    #[error("Database operation timed out")]
    Timeout,

    /// A player with the same normalized name pair already exists
    #[error("A player with this first and last name already exists")]
    PlayerNameTaken,

    /// A tournament already exists on this date
    #[error("A tournament already exists on this date")]
    TournamentDateTaken,

    /// The player already has a point entry for this tournament
    #[error("Each player can have only one point entry per tournament")]
    DuplicatePoint,

    /// Player id does not exist
    #[error("Player not found")]
    PlayerNotFound,

    /// Tournament id does not exist
    #[error("Tournament not found")]
    TournamentNotFound,

    /// Point id does not exist
    #[error("Point entry not found")]
    PointNotFound,

    /// Player deletion blocked by recorded points
    #[error("Player still has recorded points and cannot be deleted")]
    PlayerHasPoints,

    /// Points value out of range or not a half-step multiple
    #[error("Invalid points value: {0}")]
    InvalidScore(String),

    /// A required field was empty after normalization
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// An operation over a player selection received no players
    #[error("At least one player must be selected")]
    EmptySelection,

    /// Category string was not one of the known divisions
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

impl StoreError {
    /// Get a client-safe error message that doesn't leak internals.
    ///
    /// Database, CSV, and timeout errors are sanitized; every other variant
    /// names the violated rule and is safe to show as-is.
    pub fn client_message(&self) -> String {
        match self {
            StoreError::Database(_) | StoreError::Csv(_) | StoreError::Timeout => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Name of the violated unique constraint, if `err` is a unique violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    constraint_for_code(err, "23505")
}

/// Name of the violated foreign-key constraint, if `err` is an FK violation.
pub(crate) fn fk_violation(err: &sqlx::Error) -> Option<String> {
    constraint_for_code(err, "23503")
}

fn constraint_for_code(err: &sqlx::Error, code: &str) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(code) => {
            db_err.constraint().map(str::to_string)
        }
        _ => None,
    }
}
