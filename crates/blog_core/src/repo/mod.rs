//! Read-only repository over the content schema.
//!
//! # Responsibility
//! - Define the data access contract the query service depends on.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every post/page query is constrained to `is_published = 1`.
//! - Repository reads never mutate storage.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod content_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure while reading content.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A persisted row violates a schema-level expectation.
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted content: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "content schema is missing table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
