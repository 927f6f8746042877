use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;
use crate::domain::validation::FieldError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("authentication required")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            errors: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Domain(err) => match err {
                DomainError::Validation(errors) => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        error: "validation failed".to_string(),
                        errors: Some(errors),
                    },
                ),
                DomainError::AlreadyExists(_) => {
                    (StatusCode::CONFLICT, ErrorBody::message(err.to_string()))
                }
                DomainError::Forbidden(reason) => {
                    (StatusCode::CONFLICT, ErrorBody::message(reason))
                }
                DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, ErrorBody::message(err.to_string()))
                }
                DomainError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, ErrorBody::message(err.to_string()))
                }
                DomainError::Unexpected(source) => {
                    error!("persistence failure: {source}");
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorBody::message("data is not valid"),
                    )
                }
            },
            AppError::Validation(err) => {
                (StatusCode::BAD_REQUEST, ErrorBody::message(err.to_string()))
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::message("authentication required"),
            ),
        };

        (status, Json(body)).into_response()
    }
}
