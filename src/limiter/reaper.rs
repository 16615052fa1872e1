//! Background eviction of idle limiter entries.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::observability::metrics;

use super::admission::RateLimiter;

/// Periodic sweep task.
///
/// Runs on the limiter's cleanup interval, evicting entries that sat idle
/// for the whole cycle. The sweep holds each store shard's lock only for a
/// cheap idleness check per entry, so request handling is never stalled
/// behind a full-store pass. Stops when the shutdown signal fires.
pub struct Reaper {
    limiter: Arc<RateLimiter>,
    shutdown: broadcast::Receiver<()>,
}

impl Reaper {
    pub fn new(limiter: Arc<RateLimiter>, shutdown: broadcast::Receiver<()>) -> Self {
        Self { limiter, shutdown }
    }

    /// Spawn the sweep loop onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.limiter.cleanup_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so every sweep
        // happens a full interval after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let evicted = self.limiter.sweep_at(Instant::now());
                    if evicted > 0 {
                        metrics::record_reaped(evicted as u64);
                        tracing::debug!(
                            evicted,
                            tracked = self.limiter.entry_count(),
                            "Evicted idle rate limiter entries"
                        );
                    }
                }
                _ = self.shutdown.recv() => {
                    tracing::debug!("Reaper stopping");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limiter::anonymize::anonymize;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reaper_evicts_idle_entries() {
        let limiter = Arc::new(RateLimiter::new(
            5,
            Duration::from_millis(50),
            Duration::from_millis(100),
        ));
        let (tx, rx) = broadcast::channel(1);

        limiter.admit(anonymize("203.0.113.5"));
        limiter.admit(anonymize("203.0.113.6"));
        assert_eq!(limiter.entry_count(), 2);

        let handle = Reaper::new(limiter.clone(), rx).spawn();

        // Both windows expire well before the first sweep fires.
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(limiter.entry_count(), 0);

        tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_reaper_stops_on_shutdown() {
        let limiter = Arc::new(RateLimiter::new(
            5,
            Duration::from_secs(60),
            Duration::from_secs(60),
        ));
        let (tx, rx) = broadcast::channel(1);

        let handle = Reaper::new(limiter, rx).spawn();
        tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("reaper did not stop on shutdown")
            .unwrap();
    }
}
