//! SQLite connection bootstrap, schema management and unit-of-work helpers.
//!
//! # Responsibility
//! - Open and configure SQLite connections for callers that do not bring
//!   their own.
//! - Create and drop the `clients`/`phones` schema.
//! - Offer a scoped transaction helper for callers that own the unit of work.
//!
//! # Invariants
//! - Connections returned by this module have `foreign_keys=ON`.
//! - Nothing in this module commits on behalf of repositories; only
//!   [`with_unit_of_work`] commits, and only for its own transaction.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
mod unit_of_work;

pub use open::{open_db, open_db_in_memory};
pub use unit_of_work::with_unit_of_work;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The SQLite build ignored `PRAGMA foreign_keys = ON`.
    ForeignKeysUnavailable,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ForeignKeysUnavailable => {
                write!(f, "sqlite build does not enforce foreign keys")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ForeignKeysUnavailable => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
