//! Repository layer for survey and email-invitation records.
//!
//! # Responsibility
//! - Define keyed-store contracts the orchestration service depends on.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Email batch writes are atomic: all supplied addresses or none.
//! - Status updates are guarded in SQL so terminal states never revert.

use crate::db::DbError;
use crate::model::email::{InvitationId, InvitationStatus};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod email_repo;
pub mod survey_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by survey and email stores.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(i64),
    /// Attempted status change from a terminal state.
    InvalidTransition {
        email_id: InvitationId,
        from: InvitationStatus,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidTransition { email_id, from } => {
                write!(f, "invitation {email_id} cannot leave status {from:?}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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
