//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use certinator::config::ServerConfig;
use certinator::handlers;
use certinator::http::{HttpServer, ServerError};
use certinator::lifecycle::Shutdown;
use certinator::observability::{metrics, TelemetryHandle};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running in the background on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub flushes: Arc<AtomicUsize>,
    pub task: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    /// Start a server with the application routes registered.
    pub async fn spawn(grace: Duration) -> Self {
        Self::spawn_with(grace, |server| {
            handlers::register_routes(server).unwrap();
        })
        .await
    }

    /// Start a server, letting `register` add routes first.
    pub async fn spawn_with<F>(grace: Duration, register: F) -> Self
    where
        F: FnOnce(&mut HttpServer),
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let config = ServerConfig::new("certinator-test", i64::from(addr.port()), grace).unwrap();
        let flushes = Arc::new(AtomicUsize::new(0));
        let counter = flushes.clone();
        let telemetry = TelemetryHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let metrics = metrics::detached_handle().unwrap();
        let mut server = HttpServer::new(config, telemetry, Some(metrics)).unwrap();
        register(&mut server);

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        let task = tokio::spawn(server.run(listener, rx));

        Self {
            addr,
            shutdown,
            flushes,
            task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

/// A client that opens a fresh connection per request.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
