//! Bearer token authentication middleware.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Shared auth state: the one token every request must present.
#[derive(Clone)]
pub struct AuthState {
    pub token: Arc<str>,
}

impl AuthState {
    pub fn new(token: &str) -> Self {
        Self {
            token: Arc::from(token),
        }
    }
}

pub async fn bearer_auth_middleware(
    State(state): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header {
        None => (StatusCode::UNAUTHORIZED, "Authorization header is missing").into_response(),
        Some(value) if value == format!("Bearer {}", state.token) => next.run(request).await,
        Some(_) => {
            tracing::debug!("Rejected request with invalid bearer token");
            (StatusCode::UNAUTHORIZED, "Invalid bearer token").into_response()
        }
    }
}
