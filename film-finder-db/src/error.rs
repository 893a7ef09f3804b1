use film_finder_core::{ErrorKind, ValidationError};
use thiserror::Error;

/// Failure of a search or query-log operation.
///
/// Display text is the bare detail; the category prefix is added by
/// whoever reports the error, based on [`SearchError::kind`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Operational(String),
    #[error("{0}")]
    Connectivity(String),
    #[error("{0}")]
    Unexpected(String),
}

impl SearchError {
    pub fn operational(msg: impl Into<String>) -> Self {
        Self::Operational(msg.into())
    }

    pub fn connectivity(msg: impl Into<String>) -> Self {
        Self::Connectivity(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Operational(_) => ErrorKind::Operational,
            Self::Connectivity(_) => ErrorKind::Connectivity,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(e: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match &e {
            rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
                ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::PermissionDenied
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked => Self::Connectivity(e.to_string()),
                _ => Self::Operational(e.to_string()),
            },
            rusqlite::Error::InvalidPath(_) => Self::Connectivity(e.to_string()),
            rusqlite::Error::Utf8Error(_) | rusqlite::Error::NulError(_) => {
                Self::Unexpected(e.to_string())
            }
            _ => Self::Operational(e.to_string()),
        }
    }
}

impl From<sqlx::Error> for SearchError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connectivity(e.to_string()),
            sqlx::Error::Database(_)
            | sqlx::Error::RowNotFound
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Encode(_)
            | sqlx::Error::Decode(_) => Self::Operational(e.to_string()),
            _ => Self::Unexpected(e.to_string()),
        }
    }
}
