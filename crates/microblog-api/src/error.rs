//! Microblog API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use microblog_core::error::DomainError;
use microblog_queue::QueueError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A queue worker could not be started.
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorBody {
    /// Body for failures that should not leak detail to the client.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            error: "internal_error",
            message: "internal server error".to_owned(),
        }
    }
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status and error code for the wrapped error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::UserNotFound(_) | DomainError::UserNameNotFound(_) => {
                (StatusCode::NOT_FOUND, "user_not_found")
            }
            DomainError::PostNotFound(_) => (StatusCode::NOT_FOUND, "post_not_found"),
            DomainError::UserAlreadyExists(_) => (StatusCode::CONFLICT, "user_already_exists"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
