//! Admission control subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → key.rs (derive client key from X-Forwarded-For / peer address)
//!     → anonymize.rs (one-way digest, raw addresses never stored)
//!     → admission.rs (look up window state, count, allow or deny)
//!         → store.rs (concurrent map, per-entry locking)
//!         → window.rs (fixed-window counter, lazy expiry)
//!
//! Background:
//!     reaper.rs sweeps the store on a fixed period and evicts idle entries
//! ```
//!
//! # Design Decisions
//! - Fixed-window counting, anchored at each client's first request
//! - Window rollover is computed lazily during admit; no per-entry timers
//! - Per-entry mutex so distinct clients never contend with one another
//! - Admit is synchronous, O(1), and infallible: Allowed or Denied only

pub mod admission;
pub mod anonymize;
pub mod key;
pub mod reaper;
pub mod store;
pub mod window;

pub use admission::{LimitPolicy, RateLimiter};
pub use anonymize::{anonymize, ClientId};
pub use key::client_key;
pub use reaper::Reaper;
pub use window::Decision;
