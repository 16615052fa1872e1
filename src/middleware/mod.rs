//! Request middleware.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → request_id.rs (attach x-request-id)
//!     → cors.rs (preflight short-circuit, response headers)
//!     → rate_limit.rs (per-client admission control, 429 on deny)
//!     → auth.rs (bearer token check, 401 on failure)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Pure pre-filters: no middleware reads the request body
//! - Admission control runs before auth so an abusive client is rejected
//!   cheaply, without a token comparison
//! - Fail closed on auth, fail bounded on admission (degrade key, still limit)

pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod request_id;

pub use auth::bearer_auth_middleware;
pub use cors::cors_middleware;
pub use rate_limit::rate_limit_middleware;
pub use request_id::request_id_middleware;
