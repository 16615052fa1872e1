//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, limits, CORS, admission control, auth)
//! - Serve with connect info so the limiter can see peer addresses
//! - Drain gracefully on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::limiter::RateLimiter;
use crate::middleware::auth::AuthState;
use crate::middleware::cors::CorsHeaders;
use crate::middleware::{
    bearer_auth_middleware, cors_middleware, rate_limit_middleware, request_id_middleware,
};
use crate::store::PostStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostStore>,
}

/// HTTP server for the post API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and limiter.
    ///
    /// The limiter is passed in rather than built here so the caller can
    /// share it with the reaper and the config-reload loop.
    pub fn new(config: &ServiceConfig, limiter: Arc<RateLimiter>) -> Self {
        let state = AppState {
            posts: Arc::new(PostStore::new()),
        };
        Self {
            router: Self::build_router(config, limiter, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers added later wrap the earlier ones, so the request passes
    /// trace → body limit → timeout → request id → CORS → rate limit → auth
    /// before reaching a handler.
    fn build_router(config: &ServiceConfig, limiter: Arc<RateLimiter>, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(handlers::root))
            .route(
                "/posts",
                get(handlers::list_posts).post(handlers::create_post),
            )
            .route(
                "/posts/{id}",
                get(handlers::get_post)
                    .put(handlers::update_post)
                    .delete(handlers::delete_post),
            )
            .with_state(state);

        if config.auth.enabled {
            router = router.layer(middleware::from_fn_with_state(
                AuthState::new(&config.auth.bearer_token),
                bearer_auth_middleware,
            ));
        }

        if config.rate_limit.enabled {
            router = router.layer(middleware::from_fn_with_state(
                limiter,
                rate_limit_middleware,
            ));
        }

        router
            .layer(middleware::from_fn_with_state(
                CorsHeaders::from_config(&config.cors),
                cors_middleware,
            ))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
