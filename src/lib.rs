//! Blog-post API with per-client admission control.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod limiter;
pub mod middleware;
pub mod observability;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use limiter::{RateLimiter, Reaper};
