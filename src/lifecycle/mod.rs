//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast to subscribers → server drains,
//!     reaper and watcher loops exit
//!
//! Signals (signals.rs):
//!     SIGTERM / ctrl-c → trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
