//! Metrics collection and exposition.
//!
//! # Metrics
//! - `postgate_requests_admitted_total` (counter): requests passed by the limiter
//! - `postgate_requests_denied_total` (counter): requests rejected with 429
//! - `postgate_limiter_entries_reaped_total` (counter): idle entries evicted

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged and otherwise ignored; the service runs
/// without exposition rather than refusing to start.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_admitted() {
    counter!("postgate_requests_admitted_total").increment(1);
}

pub fn record_denied() {
    counter!("postgate_requests_denied_total").increment(1);
}

pub fn record_reaped(count: u64) {
    counter!("postgate_limiter_entries_reaped_total").increment(count);
}
