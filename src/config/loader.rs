//! Configuration loading from command-line arguments and environment.

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::{Args, ServerConfig, TelemetryConfig};
use crate::config::validation::parse_port;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required listen port (set HOST_PORT or --port)")]
    MissingPort,

    #[error("is not a valid port: {0:?}")]
    InvalidPort(String),

    #[error("port {0} is outside the valid TCP port range 1-65535")]
    PortOutOfRange(i64),

    #[error("service name must not be empty")]
    EmptyServiceName,
}

/// Fully validated process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

/// Validate parsed arguments into an [`AppConfig`].
pub fn load_config(args: &Args) -> Result<AppConfig, ConfigError> {
    let port = parse_port(args.port.as_deref())?;
    let server = ServerConfig::new(
        args.service_name.clone(),
        port,
        Duration::from_millis(args.shutdown_grace_ms),
    )?;

    let telemetry = TelemetryConfig {
        otel_endpoint: args.otel_endpoint.clone(),
        environment: args.environment.clone(),
        log_filter: args.log_filter.clone(),
    };

    Ok(AppConfig { server, telemetry })
}
