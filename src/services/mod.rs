use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod dashboard;
pub mod listing;
pub mod profile;
pub mod session;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("saved search form is unreadable: {0}")]
    MalformedSavedForm(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
