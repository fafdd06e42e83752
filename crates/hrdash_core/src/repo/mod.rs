//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts (filter/range/order
//!   queries plus single-row insert/update/delete).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes run model validation before SQL mutations.
//! - Repository APIs return semantic errors (`NotFound`, `Duplicate`) in
//!   addition to DB transport errors.
//! - Repositories refuse connections that were not opened via `open_db`.

use crate::db::DbError;
use crate::model::employee::EmployeeValidationError;
use crate::model::reminder::ReminderValidationError;
use thiserror::Error;

pub mod employee_repo;
pub mod org_repo;
pub mod reminder_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error shared by all SQLite repositories.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{entity} already exists: {name}")]
    Duplicate { entity: &'static str, name: String },
    #[error(transparent)]
    InvalidEmployee(#[from] EmployeeValidationError),
    #[error(transparent)]
    InvalidReminder(#[from] ReminderValidationError),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Maps a unique-constraint failure to `RepoError::Duplicate`; other errors
/// pass through unchanged.
pub(crate) fn map_unique_violation(
    err: rusqlite::Error,
    entity: &'static str,
    name: &str,
) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::Duplicate {
                entity,
                name: name.to_string(),
            }
        }
        _ => err.into(),
    }
}
