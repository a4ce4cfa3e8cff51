//! Structured logging.
//!
//! # Responsibilities
//! - Install the process-wide `tracing` subscriber
//! - Attach the OpenTelemetry layer when a trace pipeline is configured
//! - Configure log level from a filter directive
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - A subscriber that fails to install is a fatal startup error

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::observability::tracing::TracingPipeline;
use crate::observability::TelemetryError;

/// Default filter directive when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info,certinator=debug,tower_http=debug";

/// Install the global subscriber.
///
/// Invalid `filter` directives fall back to [`DEFAULT_LOG_FILTER`].
pub fn init_logging(
    filter: &str,
    pipeline: Option<&TracingPipeline>,
) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(pipeline.map(|p| p.layer()))
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
