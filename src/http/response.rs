//! Response handling.
//!
//! # Responsibilities
//! - Map matching errors to HTTP status codes
//! - Render error bodies as plain text
//!
//! # Design Decisions
//! - 400 for bodies that are unusable as sent (bad JSON, empty list)
//! - 422 for JSON that lacks a usable `urls` item
//! - 500 for host list failures; the cause is echoed as `Unexpected error: ...`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::matching::{MatchError, ValidationError};

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Match(#[from] MatchError),

    /// The blocking worker running the match panicked or was cancelled.
    #[error("matching task failed: {0}")]
    Worker(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Match(MatchError::Validation(err))
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Match(MatchError::Validation(err)) => match err {
                ValidationError::MalformedJson(_) | ValidationError::EmptyUrls => StatusCode::BAD_REQUEST,
                ValidationError::MissingBody
                | ValidationError::MissingUrls
                | ValidationError::InvalidUrls(_) => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::Match(MatchError::SourceUnavailable { .. }) | ApiError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if status.is_server_error() {
            format!("Unexpected error: {}", self)
        } else {
            self.to_string()
        };
        (status, body).into_response()
    }
}
