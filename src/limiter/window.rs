//! Per-client fixed-window counter state.

use std::time::{Duration, Instant};

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request may proceed; `remaining` admits are left in the window.
    Allowed { remaining: u32 },
    /// The window's quota is exhausted.
    Denied,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

/// Mutable counter for a single client.
///
/// The window is anchored at the client's first request and advanced lazily:
/// when an admit call observes that the current window has expired, the start
/// is moved forward by a whole number of window lengths (never to `now`, so
/// the boundary does not drift with processing delay) and the counter resets.
#[derive(Debug)]
pub struct WindowState {
    count: u32,
    window_start: Instant,
}

impl WindowState {
    pub fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    /// Count one request against the window and decide its fate.
    ///
    /// The counter is clamped to `limit + 1` on denial so a flood of denied
    /// requests cannot grow it without bound; it still reads as over-limit
    /// and non-idle until the window rolls over.
    pub fn admit(&mut self, limit: u32, window: Duration, now: Instant) -> Decision {
        self.roll_over(window, now);

        self.count = self.count.saturating_add(1);
        if self.count <= limit {
            Decision::Allowed {
                remaining: limit - self.count,
            }
        } else {
            self.count = limit.saturating_add(1);
            Decision::Denied
        }
    }

    /// An entry is idle when it has counted nothing in its current window:
    /// either never used since creation, or its window has expired with no
    /// admit call since (which would have rolled the counter to zero).
    pub fn is_idle(&self, window: Duration, now: Instant) -> bool {
        self.count == 0 || self.expired(window, now)
    }

    fn roll_over(&mut self, window: Duration, now: Instant) {
        if !self.expired(window, now) {
            return;
        }
        let elapsed = now.duration_since(self.window_start);
        let periods = (elapsed.as_nanos() / window.as_nanos()).min(u32::MAX as u128) as u32;
        self.window_start += window * periods;
        self.count = 0;
    }

    fn expired(&self, window: Duration, now: Instant) -> bool {
        !window.is_zero() && now.duration_since(self.window_start) >= window
    }

    #[cfg(test)]
    pub(crate) fn count(&self) -> u32 {
        self.count
    }
}
