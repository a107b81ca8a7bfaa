//! Application services sitting between callers and the repository.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod clients;
pub mod seed;

/// Failures surfaced to callers of the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed request shape; not retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Cursor is corrupted or belongs to another query shape. Callers must
    /// restart pagination without a cursor.
    #[error("{0}")]
    InvalidCursor(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
