//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     tracing.rs  → OTLP batch pipeline (TracerProvider)
//!     logging.rs  → global subscriber (EnvFilter + fmt + OpenTelemetry layer)
//!     metrics.rs  → Prometheus recorder, handle served at /metrics
//!
//! Per request (http::instrument):
//!     span `http.request` → exported through the OpenTelemetry layer
//!     counter + histogram → rendered by the Prometheus handle
//!
//! Shutdown (lifecycle::shutdown):
//!     TelemetryHandle::flush → drain pending spans, stop the exporter
//! ```
//!
//! # Design Decisions
//! - Handles are passed explicitly; the trace provider is never registered globally
//! - The flush operation consumes its handle, so it can only run once
//! - Telemetry failures at runtime degrade observability, never request handling

pub mod logging;
pub mod metrics;
pub mod tracing;

use std::fmt;

use thiserror::Error;

/// Errors raised while bringing up the telemetry pipelines.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The OTLP trace pipeline could not be configured.
    #[error("failed to initialize trace pipeline: {0}")]
    TracePipeline(#[source] opentelemetry::trace::TraceError),

    /// The global tracing subscriber could not be installed.
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[source] tracing_subscriber::util::TryInitError),

    /// The Prometheus recorder could not be built or installed.
    #[error("failed to initialize metrics recorder: {0}")]
    MetricsRecorder(#[source] metrics_exporter_prometheus::BuildError),
}

/// Owned shutdown-time operation for the trace exporter.
///
/// Created once at startup and handed to the server, which invokes
/// [`TelemetryHandle::flush`] from its shutdown sequence.
pub struct TelemetryHandle {
    flush: Box<dyn FnOnce() + Send + 'static>,
}

impl TelemetryHandle {
    /// Wrap a flush action.
    pub fn new<F>(flush: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            flush: Box::new(flush),
        }
    }

    /// A handle whose flush does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Flush and close the exporter. Consumes the handle.
    pub fn flush(self) {
        (self.flush)()
    }
}

impl fmt::Debug for TelemetryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryHandle").finish_non_exhaustive()
    }
}
