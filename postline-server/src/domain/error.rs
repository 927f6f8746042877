use thiserror::Error;

use super::validation::FieldError;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unexpected persistence error: {0}")]
    Unexpected(String),
}
