//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors surfaced to API clients as plain-text responses.
///
/// Admission control is deliberately absent here: the limiter never errors,
/// it only allows or denies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Post not found")]
    PostNotFound,
    #[error("{0}")]
    InvalidPost(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::PostNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidPost(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
