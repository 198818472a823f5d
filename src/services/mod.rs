use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

pub mod media_properties;
pub mod products;
pub mod tag_links;
pub mod tags;

/// Result type returned by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The user lacks the role required to use the service.
    #[error("unauthorized")]
    Unauthorized,
    /// A referenced product, tag or media property does not exist.
    #[error("not found")]
    NotFound,
    /// Submitted form data failed validation.
    #[error("{0}")]
    Form(String),
    /// Attaching or detaching tags violated referential integrity.
    #[error("tag association failed: {0}")]
    Association(String),
    /// The record is still referenced and cannot be removed.
    #[error("conflict")]
    Conflict,
    /// Any other persistence failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
