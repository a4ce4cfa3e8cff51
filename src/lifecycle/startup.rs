//! Startup orchestration.
//!
//! # Responsibilities
//! - Bring up tracing export and logging
//! - Validate configuration
//! - Initialize the metrics recorder
//! - Register handlers, bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when ready)

use thiserror::Error;

use crate::config::{load_config, Args, ConfigError};
use crate::handlers;
use crate::http::{HttpServer, ServerError};
use crate::observability::{logging, TelemetryError};

/// Error type for process startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Start the service and serve until shutdown completes.
pub async fn run(args: Args) -> Result<(), StartupError> {
    let pipeline = crate::observability::tracing::init_tracing(
        &args.service_name,
        &args.otel_endpoint,
        &args.environment,
    )?;
    logging::init_logging(&args.log_filter, Some(&pipeline))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "certinator starting");

    let config = load_config(&args).inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    tracing::info!(
        service = config.server.service_name(),
        port = config.server.listen_port(),
        shutdown_grace_ms = config.server.shutdown_grace().as_millis() as u64,
        otel_endpoint = %config.telemetry.otel_endpoint,
        "Configuration loaded"
    );

    let metrics = crate::observability::metrics::init_metrics()?;

    let mut server = HttpServer::new(config.server, pipeline.telemetry_handle(), Some(metrics))?;
    handlers::register_routes(&mut server)?;

    server.start().await.inspect_err(|e| {
        tracing::error!(error = %e, "Server failed to start");
    })?;

    tracing::info!("Shutdown complete");
    Ok(())
}
