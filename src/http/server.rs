//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Hold the route table while handlers are registered
//! - Wrap every registered handler with instrumentation
//! - Bind the listener and serve until a termination signal
//! - Run the shutdown sequence (grace sleep, telemetry flush)
//!
//! # Design Decisions
//! - The route table is consumed when serving starts
//! - Serving continues through the grace period; it is dropped, not drained
//! - Telemetry is flushed exactly once, from the shutdown sequence only

use std::future::IntoFuture;
use std::net::{Ipv4Addr, SocketAddr};

use axum::handler::Handler;
use axum::routing::any;
use metrics_exporter_prometheus::PrometheusHandle;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers::metrics::metrics_handler;
use crate::http::instrument::instrument_handler;
use crate::lifecycle::shutdown::{run_shutdown_sequence, wait_for_signal};
use crate::lifecycle::signals::{self, TerminationSignals};
use crate::lifecycle::{Shutdown, TerminationSignal};
use crate::observability::TelemetryHandle;
use crate::routing::{RouteError, RouteTable};

/// Path the Prometheus exposition is served on.
pub const METRICS_PATH: &str = "/metrics";

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The serve loop failed.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// A handler was registered on a path the router cannot match literally.
    #[error(transparent)]
    InvalidRoute(#[from] RouteError),
}

/// HTTP server shell.
pub struct HttpServer {
    config: ServerConfig,
    routes: RouteTable,
    telemetry: TelemetryHandle,
}

impl HttpServer {
    /// Create a new server.
    ///
    /// When `metrics` is given, its exposition is registered at
    /// [`METRICS_PATH`].
    pub fn new(
        config: ServerConfig,
        telemetry: TelemetryHandle,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, ServerError> {
        let mut routes = RouteTable::new();
        if let Some(handle) = metrics {
            tracing::info!("initializing prometheus in route {}", METRICS_PATH);
            routes.insert(METRICS_PATH, any(metrics_handler).with_state(handle))?;
        }

        Ok(Self {
            config,
            routes,
            telemetry,
        })
    }

    /// Register `handler` at `path`, wrapped with instrumentation.
    ///
    /// A second registration for the same path replaces the first.
    pub fn register_handler<H, T>(&mut self, path: &str, handler: H) -> Result<(), ServerError>
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let replaced = self
            .routes
            .insert(path, instrument_handler(path, handler))?;
        if replaced {
            tracing::debug!(path, "Replaced existing handler");
        }
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Registered route paths, sorted.
    pub fn routes(&self) -> Vec<&str> {
        self.routes.paths()
    }

    /// Bind `0.0.0.0:<port>`, install the signal watcher and serve until
    /// a termination signal has been handled.
    pub async fn start(self) -> Result<(), ServerError> {
        let shutdown = Shutdown::new();
        let shutdown_rx = shutdown.subscribe();
        match TerminationSignals::install() {
            Ok(signals) => {
                signals::spawn_signal_watcher(signals, shutdown);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handlers");
            }
        }

        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.config.listen_port()));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        self.run(listener, shutdown_rx).await
    }

    /// Serve on `listener` until a signal arrives on `shutdown` and the
    /// shutdown sequence has finished.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<TerminationSignal>,
    ) -> Result<(), ServerError> {
        let HttpServer {
            config,
            routes,
            telemetry,
        } = self;

        let addr = listener.local_addr().map_err(ServerError::Serve)?;
        tracing::info!(
            service = config.service_name(),
            address = %addr,
            routes = ?routes.paths(),
            "Initializing http server"
        );

        let app = routes.into_router().layer(TraceLayer::new_for_http());
        let serve = axum::serve(listener, app).into_future();

        let grace = config.shutdown_grace();
        let sequence = async move {
            let signal = wait_for_signal(shutdown).await;
            run_shutdown_sequence(signal, grace, telemetry).await;
        };

        tokio::select! {
            result = serve => {
                result.map_err(ServerError::Serve)?;
                tracing::warn!("HTTP server stopped before a shutdown signal");
            }
            () = sequence => {}
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
