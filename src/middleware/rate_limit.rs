//! Admission control middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::limiter::{anonymize, client_key, Decision, RateLimiter};
use crate::observability::metrics;

const DENIED_BODY: &str =
    "You have exceeded the allowed number of requests. Please try again later.";

/// Pre-filter every request through the limiter.
///
/// Allowed requests are forwarded untouched; denied ones short-circuit with
/// 429 and a plain-text body. Only the anonymized id ever reaches a log line.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let forwarded_for = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok());
    let key = client_key(forwarded_for, &addr.to_string());
    let id = anonymize(&key);

    match limiter.admit(id) {
        Decision::Allowed { remaining } => {
            metrics::record_admitted();
            tracing::trace!(client = %id, remaining, "Request admitted");
            next.run(request).await
        }
        Decision::Denied => {
            metrics::record_denied();
            tracing::warn!(client = %id, "Rate limit exceeded");
            let mut response = Response::new(Body::from(DENIED_BODY));
            *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
            response
        }
    }
}
