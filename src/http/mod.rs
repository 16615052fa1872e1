//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (router assembly, middleware stack, graceful serve)
//!     → middleware (request id, CORS, admission control, auth)
//!     → handlers.rs (posts CRUD over the in-memory store)
//!         → sanitize.rs cleans user-supplied fields first
//! ```

pub mod handlers;
pub mod sanitize;
pub mod server;

pub use server::{AppState, HttpServer};
