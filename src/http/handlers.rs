//! Posts CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::sanitize::sanitize;
use crate::http::server::AppState;
use crate::store::Post;

/// Word budgets applied to user-supplied fields.
const TITLE_MAX_WORDS: usize = 60;
const EXCERPT_MAX_WORDS: usize = 250;
const BODY_MAX_WORDS: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
}

impl PostPayload {
    /// Clean the payload and reject posts with nothing left in the
    /// required fields.
    fn sanitized(self) -> Result<(String, String, String), ApiError> {
        let title = sanitize(&self.title, TITLE_MAX_WORDS);
        let excerpt = sanitize(&self.excerpt, EXCERPT_MAX_WORDS);
        let body = sanitize(&self.body, BODY_MAX_WORDS);

        if title.is_empty() || body.is_empty() {
            return Err(ApiError::InvalidPost(
                "Title and body are required".to_string(),
            ));
        }
        Ok((title, excerpt, body))
    }
}

pub async fn root() -> &'static str {
    "Welcome to the root route!"
}

pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.posts.list())
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, ApiError> {
    state.posts.get(id).map(Json).ok_or(ApiError::PostNotFound)
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<PostPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let (title, excerpt, body) = payload.sanitized()?;
    let post = state.posts.insert(title, excerpt, body);
    tracing::debug!(id = post.id, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<PostPayload>,
) -> Result<Json<Post>, ApiError> {
    let (title, excerpt, body) = payload.sanitized()?;
    let post = state
        .posts
        .update(id, title, excerpt, body)
        .ok_or(ApiError::PostNotFound)?;
    tracing::debug!(id, "Post updated");
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if state.posts.remove(id) {
        tracing::debug!(id, "Post deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::PostNotFound)
    }
}
