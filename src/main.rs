//! postgate — a blog-post API guarded by per-client admission control.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  POSTGATE                     │
//!                    │                                               │
//!   Client Request   │  ┌──────────┐   ┌────────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│   http   │──▶│ middleware │──▶│handlers │ │
//!                    │  │  server  │   │ cors/limit │   │  posts  │ │
//!                    │  └──────────┘   │   /auth    │   └────┬────┘ │
//!                    │                 └─────┬──────┘        │      │
//!                    │                       │               ▼      │
//!                    │                       ▼          ┌─────────┐ │
//!                    │                 ┌──────────┐     │  store  │ │
//!                    │                 │ limiter  │     │ (posts) │ │
//!                    │                 │  window  │     └─────────┘ │
//!                    │                 │  store   │◀── reaper       │
//!                    │                 └──────────┘    (periodic)   │
//!                    │                                               │
//!                    │  config / observability / lifecycle           │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use postgate::config::{load_config, ConfigWatcher, ServiceConfig};
use postgate::lifecycle::{signals, Shutdown};
use postgate::limiter::{RateLimiter, Reaper};
use postgate::observability::{logging, metrics};
use postgate::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "postgate", about = "Blog-post API with per-client admission control")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit = config.rate_limit.limit,
        window_secs = config.rate_limit.window_secs,
        cleanup_interval_secs = config.rate_limit.cleanup_interval_secs,
        auth = config.auth.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit.limit,
        config.rate_limit.window(),
        config.rate_limit.cleanup_interval(),
    ));

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    if config.rate_limit.enabled {
        Reaper::new(limiter.clone(), shutdown.subscribe()).spawn();
    }

    // Hot reload: the watcher handle must outlive the server loop.
    let _watcher = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            tokio::spawn(apply_config_updates(
                updates,
                limiter.clone(),
                shutdown.subscribe(),
            ));
            Some(handle)
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(&config, limiter);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Apply reloaded configs to the running limiter.
///
/// Only the rate-limit policy is applied live; changes take effect for
/// subsequent requests, never retroactively. Anything else needs a restart.
async fn apply_config_updates(
    mut updates: tokio::sync::mpsc::UnboundedReceiver<ServiceConfig>,
    limiter: Arc<RateLimiter>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                match update {
                    Some(config) => {
                        limiter.set_limit(config.rate_limit.limit);
                        limiter.set_window(config.rate_limit.window());
                        tracing::info!("Applied reloaded rate limit configuration");
                    }
                    None => break,
                }
            }
            _ = shutdown.recv() => break,
        }
    }
}
