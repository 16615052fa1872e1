//! The limiter facade: policy + store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;

use super::anonymize::ClientId;
use super::store::WindowStore;
use super::window::Decision;

/// Active admission policy. Swapped atomically as one snapshot so a single
/// admit call never mixes an old limit with a new window.
#[derive(Debug, Clone, Copy)]
pub struct LimitPolicy {
    /// Maximum admitted requests per window per client.
    pub limit: u32,
    /// Length of the fixed window.
    pub window: Duration,
}

/// Per-client admission controller.
///
/// Thread-safe and intended to be shared behind an `Arc` between the request
/// path, the reaper, and whatever applies runtime reconfiguration.
pub struct RateLimiter {
    store: WindowStore,
    policy: ArcSwap<LimitPolicy>,
    cleanup_interval: Duration,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration, cleanup_interval: Duration) -> Self {
        Self {
            store: WindowStore::new(),
            policy: ArcSwap::from_pointee(LimitPolicy { limit, window }),
            cleanup_interval,
        }
    }

    /// Decide whether a request from `id` may proceed.
    ///
    /// Never fails and never blocks beyond the entry's short-held lock.
    pub fn admit(&self, id: ClientId) -> Decision {
        self.admit_at(id, Instant::now())
    }

    /// Admission against an explicit clock reading. Exposed for the sweep
    /// path and deterministic tests.
    pub fn admit_at(&self, id: ClientId, now: Instant) -> Decision {
        let policy = self.policy.load();
        self.store.admit(id, policy.limit, policy.window, now)
    }

    /// Change the per-window limit. Applies to subsequent admits only;
    /// requests already counted are not re-judged.
    pub fn set_limit(&self, limit: u32) {
        self.policy.rcu(|p| LimitPolicy {
            limit,
            window: p.window,
        });
        tracing::info!(limit, "Rate limit updated");
    }

    /// Change the window length. Applies to subsequent admits only.
    pub fn set_window(&self, window: Duration) {
        self.policy.rcu(|p| LimitPolicy {
            limit: p.limit,
            window,
        });
        tracing::info!(window_ms = window.as_millis() as u64, "Rate limit window updated");
    }

    pub fn policy(&self) -> LimitPolicy {
        **self.policy.load()
    }

    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }

    /// Evict idle entries; returns the number removed.
    pub fn sweep_at(&self, now: Instant) -> usize {
        let policy = self.policy.load();
        self.store.sweep(policy.window, now)
    }

    /// Number of clients currently tracked.
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("policy", &self.policy())
            .field("entries", &self.store.len())
            .field("cleanup_interval", &self.cleanup_interval)
            .finish()
    }
}
