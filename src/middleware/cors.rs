//! CORS and security response headers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::CorsConfig;

/// Header values prebuilt from config so the per-request path only clones.
pub struct CorsHeaders {
    origin: HeaderValue,
    methods: HeaderValue,
    headers: HeaderValue,
    credentials: HeaderValue,
}

impl CorsHeaders {
    pub fn from_config(config: &CorsConfig) -> Arc<Self> {
        Arc::new(Self {
            origin: joined_value(&config.allowed_origins, "*"),
            methods: joined_value(&config.allowed_methods, "GET, POST, PUT, DELETE, OPTIONS"),
            headers: joined_value(&config.allowed_headers, "Content-Type, Authorization"),
            credentials: HeaderValue::from_static(if config.allow_credentials {
                "true"
            } else {
                "false"
            }),
        })
    }
}

fn joined_value(values: &[String], fallback: &'static str) -> HeaderValue {
    if values.is_empty() {
        return HeaderValue::from_static(fallback);
    }
    HeaderValue::from_str(&values.join(", "))
        .unwrap_or_else(|_| HeaderValue::from_static(fallback))
}

/// Attach CORS and hardening headers to every response.
///
/// Preflight `OPTIONS` requests short-circuit with 200 before admission
/// control or auth run; browsers never send credentials on preflight.
pub async fn cors_middleware(
    State(cors): State<Arc<CorsHeaders>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, cors.origin.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, cors.methods.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, cors.headers.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        cors.credentials.clone(),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("deny"));

    response
}
