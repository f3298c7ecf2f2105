//! Repository error taxonomy.
//!
//! # Responsibility
//! - Turn SQLite constraint failures into semantic variants callers can match
//!   on, keeping the storage message text unchanged.
//!
//! # Invariants
//! - Classification uses SQLite extended result codes, never message parsing.
//! - Non-constraint failures stay wrapped in `Db` with their original error.

use crate::db::DbError;
use log::warn;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for client/phone persistence and search operations.
#[derive(Debug)]
pub enum RepoError {
    /// Duplicate email or duplicate phone number.
    UniquenessViolation(String),
    /// Email without `@`, phone outside the accepted range, or text length.
    CheckConstraintViolation(String),
    /// Phone for a missing client, or deleting a client that still owns phones.
    ReferentialIntegrityViolation(String),
    NotNullViolation(String),
    Db(DbError),
    InvalidData(String),
}

impl RepoError {
    /// Returns whether the storage rejected the write on a schema constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::UniquenessViolation(_)
                | Self::CheckConstraintViolation(_)
                | Self::ReferentialIntegrityViolation(_)
                | Self::NotNullViolation(_)
        )
    }

    /// Stable short code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UniquenessViolation(_) => "uniqueness_violation",
            Self::CheckConstraintViolation(_) => "check_violation",
            Self::ReferentialIntegrityViolation(_) => "referential_integrity_violation",
            Self::NotNullViolation(_) => "not_null_violation",
            Self::Db(_) => "db_error",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniquenessViolation(message) => write!(f, "uniqueness violation: {message}"),
            Self::CheckConstraintViolation(message) => {
                write!(f, "check constraint violation: {message}")
            }
            Self::ReferentialIntegrityViolation(message) => {
                write!(f, "referential integrity violation: {message}")
            }
            Self::NotNullViolation(message) => write!(f, "not-null violation: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted client data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UniquenessViolation(_)
            | Self::CheckConstraintViolation(_)
            | Self::ReferentialIntegrityViolation(_)
            | Self::NotNullViolation(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => err.into(),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        let classified = match &value {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let text = message.clone().unwrap_or_else(|| value.to_string());
                classify_constraint(failure.extended_code, text)
            }
            _ => None,
        };
        classified.unwrap_or(Self::Db(DbError::Sqlite(value)))
    }
}

fn classify_constraint(extended_code: i32, message: String) -> Option<RepoError> {
    match extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Some(RepoError::UniquenessViolation(message))
        }
        ffi::SQLITE_CONSTRAINT_CHECK => Some(RepoError::CheckConstraintViolation(message)),
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
            Some(RepoError::ReferentialIntegrityViolation(message))
        }
        ffi::SQLITE_CONSTRAINT_NOTNULL => Some(RepoError::NotNullViolation(message)),
        _ => None,
    }
}

/// Logs a rejected repository write by event and error code, then hands the
/// error back unchanged. Storage messages are not logged; they may carry
/// client data.
pub(crate) fn log_write_failure(event: &'static str, err: RepoError) -> RepoError {
    warn!(
        "event={event} module=repo status=error error_code={}",
        err.code()
    );
    err
}
