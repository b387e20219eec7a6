//! # Error Handling
//!
//! Error taxonomy for the refinement pipeline. Missing optional raw data is
//! never an error anywhere in this crate; only structural problems (missing
//! identifiers, non-positive duration, unreachable store) surface here.

use thiserror::Error;

/// Errors raised by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("not found: {0}")]
    NotFound(String),
}

impl RepositoryError {
    /// Wrap a SeaORM error; kept as a named constructor so call sites read
    /// as `.map_err(RepositoryError::database_error)`.
    pub fn database_error(err: sea_orm::DbErr) -> Self {
        Self::Database(err)
    }
}

/// Errors that fail a single notification message.
///
/// `Validation` marks a malformed raw record; `Store` marks a transient
/// read/write failure that is safe to retry via redelivery because every
/// write is an idempotent upsert.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("invalid match record: {0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(#[from] sea_orm::DbErr),
}

impl From<RepositoryError> for ProcessingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(db) => Self::Store(db),
            RepositoryError::NotFound(what) => Self::Validation(what),
        }
    }
}
