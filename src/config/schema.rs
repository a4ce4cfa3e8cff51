//! Configuration schema definitions.
//!
//! [`Args`] is the raw command-line/environment surface parsed by clap.
//! [`ServerConfig`] and [`TelemetryConfig`] are the validated, immutable
//! values the rest of the process is built from.

use std::time::Duration;

use clap::Parser;

use crate::config::loader::ConfigError;
use crate::config::validation::{validate_port, validate_service_name};
use crate::observability::logging::DEFAULT_LOG_FILTER;
use crate::observability::tracing::DEFAULT_COLLECTOR_ENDPOINT;

/// Default service name used for spans, logs and metrics.
pub const DEFAULT_SERVICE_NAME: &str = "certinator";

/// Default grace period between a termination signal and telemetry flush.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Certinator: domain certificate request front-end.
#[derive(Parser, Debug, Clone)]
#[command(name = "certinator")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TCP port to listen on (required)
    #[arg(short, long, env = "HOST_PORT")]
    pub port: Option<String>,

    /// Service name reported to the trace collector
    #[arg(long, env = "SERVICE_NAME", default_value = DEFAULT_SERVICE_NAME)]
    pub service_name: String,

    /// OpenTelemetry collector endpoint for trace export
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", default_value = DEFAULT_COLLECTOR_ENDPOINT)]
    pub otel_endpoint: String,

    /// Deployment environment tag attached to exported traces
    #[arg(long, env = "DEPLOYMENT_ENVIRONMENT", default_value = "development")]
    pub environment: String,

    /// Grace period in milliseconds before telemetry flush on shutdown
    #[arg(long, env = "SHUTDOWN_GRACE_MS", default_value_t = DEFAULT_SHUTDOWN_GRACE.as_millis() as u64)]
    pub shutdown_grace_ms: u64,

    /// Log filter directive (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl Args {
    /// Parse arguments from the command line and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Listener and lifecycle settings for the server shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    service_name: String,
    listen_port: u16,
    shutdown_grace: Duration,
}

impl ServerConfig {
    /// Build a validated server configuration.
    ///
    /// `port` must lie in `1..=65535`.
    pub fn new(
        service_name: impl Into<String>,
        port: i64,
        shutdown_grace: Duration,
    ) -> Result<Self, ConfigError> {
        let service_name = service_name.into();
        validate_service_name(&service_name)?;
        let listen_port = validate_port(port)?;

        Ok(Self {
            service_name,
            listen_port,
            shutdown_grace,
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn listen_port(&self) -> u16 {
        self.listen_port
    }

    pub fn shutdown_grace(&self) -> Duration {
        self.shutdown_grace
    }
}

/// Export and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// OTLP/gRPC collector endpoint.
    pub otel_endpoint: String,

    /// Value of the `deployment.environment` resource attribute.
    pub environment: String,

    /// `EnvFilter` directive for the log output.
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            otel_endpoint: DEFAULT_COLLECTOR_ENDPOINT.to_string(),
            environment: "development".to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
