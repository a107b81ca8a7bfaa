//! Error conversion glue between the domain, pagination, repository and
//! service layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls wiring them together live here.

use crate::domain::types::TypeConstraintError;
use crate::pagination::CursorError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::InvalidArgument(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<CursorError> for ServiceError {
    fn from(val: CursorError) -> Self {
        ServiceError::InvalidCursor(val.to_string())
    }
}
