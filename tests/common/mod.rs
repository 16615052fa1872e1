//! Shared helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use postgate::config::ServiceConfig;
use postgate::lifecycle::Shutdown;
use postgate::limiter::RateLimiter;
use postgate::HttpServer;

pub struct TestServer {
    pub addr: SocketAddr,
    pub limiter: Arc<RateLimiter>,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Bind an ephemeral port and run the server in the background.
///
/// The limiter is handed in so tests can inspect entry counts and apply
/// runtime mutators while requests flow.
pub async fn spawn_server(config: ServiceConfig, limiter: Arc<RateLimiter>) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, limiter.clone());
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the accept loop a beat to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        limiter,
        shutdown,
    }
}

/// A limiter matching the config's rate-limit section, for tests that don't
/// need sub-second windows.
pub fn limiter_from(config: &ServiceConfig) -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(
        config.rate_limit.limit,
        config.rate_limit.window(),
        config.rate_limit.cleanup_interval(),
    ))
}
