//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (admission counters, Prometheus exposition)
//! ```
//!
//! # Design Decisions
//! - Structured logging; client identifiers are always anonymized digests
//! - Metrics are cheap counter increments on the request path
//! - The exporter is optional and bound on its own address

pub mod logging;
pub mod metrics;
