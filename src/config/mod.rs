//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated)
//!
//! While running:
//!     watcher.rs detects file changes
//!     → loader.rs reloads & validates
//!     → rate-limit fields applied live via the limiter's runtime mutators
//!     → other fields logged as requiring a restart
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so a minimal (or absent) config works
//! - Validation separates syntactic (serde) from semantic checks
//! - Only the rate-limit section is hot-reloadable; the listener is not

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AuthConfig, CorsConfig, ListenerConfig, ObservabilityConfig, RateLimitConfig, ServiceConfig,
    TimeoutConfig,
};
pub use watcher::ConfigWatcher;
