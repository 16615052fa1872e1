//! Concurrent store of per-client window state.
//!
//! # Design Decisions
//! - `DashMap` keyed by anonymized client id; shards keep unrelated clients
//!   off each other's locks
//! - One short-held `Mutex` per entry serializes only same-client requests
//! - Entry creation goes through the map's entry API, so racing first
//!   requests for a brand-new client converge on a single state
//! - Eviction re-checks idleness with exclusive access to the entry, so a
//!   racing admit either lands before removal or re-creates the entry after

use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::anonymize::ClientId;
use super::window::{Decision, WindowState};

const LOCK_POISONED: &str = "window state mutex poisoned";

/// Owns every [`WindowState`]. Entries appear lazily on a client's first
/// request and disappear only through [`sweep`](WindowStore::sweep).
#[derive(Default)]
pub struct WindowStore {
    entries: DashMap<ClientId, Mutex<WindowState>>,
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request for `id` against its window and decide.
    pub fn admit(&self, id: ClientId, limit: u32, window: Duration, now: Instant) -> Decision {
        // Fast path: the entry exists and only this client's lock is taken.
        if let Some(entry) = self.entries.get(&id) {
            let mut state = entry.lock().expect(LOCK_POISONED);
            return state.admit(limit, window, now);
        }

        // First request from this client. The entry API makes the insert
        // atomic: concurrent first requests get the same state, and every
        // one of them is counted.
        let entry = self
            .entries
            .entry(id)
            .or_insert_with(|| Mutex::new(WindowState::new(now)));
        let mut state = entry.lock().expect(LOCK_POISONED);
        state.admit(limit, window, now)
    }

    /// Remove idle entries, returning how many were evicted.
    ///
    /// `retain` holds the shard write lock while the predicate runs, which
    /// excludes concurrent admits for the same entry: the idle check here is
    /// the final word, and an increment can never be dropped by a removal.
    pub fn sweep(&self, window: Duration, now: Instant) -> usize {
        let mut evicted = 0;
        self.entries.retain(|_, state| {
            let idle = state.get_mut().expect(LOCK_POISONED).is_idle(window, now);
            if idle {
                evicted += 1;
            }
            !idle
        });
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
