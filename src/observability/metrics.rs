//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Install the Prometheus recorder
//! - Define per-route request metrics
//! - Render the exposition text for `/metrics`
//!
//! # Metrics
//! - `http_server_requests_total` (counter): requests by route, method, status code
//! - `http_server_request_duration_seconds` (histogram): latency by route, method, status class
//!
//! # Design Decisions
//! - Labels are bounded: `route` is a registered path, never the raw request URI
//! - Recording cannot fail; a missing recorder turns every call into a no-op

use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::observability::TelemetryError;

/// Request counter name.
pub const REQUESTS_TOTAL: &str = "http_server_requests_total";

/// Request latency histogram name.
pub const REQUEST_DURATION_SECONDS: &str = "http_server_request_duration_seconds";

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500, 5.000,
];

/// Install the global Prometheus recorder and return the handle used to
/// render scrapes.
///
/// # Errors
///
/// Returns error if the recorder cannot be built or one is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, TelemetryError> {
    let handle = builder()?
        .install_recorder()
        .map_err(TelemetryError::MetricsRecorder)?;

    tracing::info!("Prometheus recorder installed, serving at /metrics");
    Ok(handle)
}

/// Build a recorder without installing it. Its handle renders an empty
/// exposition unless the recorder is installed some other way.
pub fn detached_handle() -> Result<PrometheusHandle, TelemetryError> {
    Ok(builder()?.build_recorder().handle())
}

fn builder() -> Result<PrometheusBuilder, TelemetryError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
            LATENCY_BUCKETS,
        )
        .map_err(TelemetryError::MetricsRecorder)
}

/// Outcome of a single instrumented request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler produced a response with this status code.
    Completed(u16),
    /// The request future was dropped before a response was produced.
    Cancelled,
}

impl Outcome {
    fn status_class(self) -> &'static str {
        match self {
            Outcome::Completed(100..=399) => "success",
            Outcome::Completed(400..=499) => "client_error",
            Outcome::Completed(_) => "server_error",
            Outcome::Cancelled => "cancelled",
        }
    }

    fn status_code(self) -> String {
        match self {
            Outcome::Completed(code) => code.to_string(),
            Outcome::Cancelled => "none".to_string(),
        }
    }
}

/// Record completion of a request on `route`.
pub fn record_request(route: &str, method: &str, outcome: Outcome, duration: Duration) {
    histogram!(REQUEST_DURATION_SECONDS,
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => outcome.status_class()
    )
    .record(duration.as_secs_f64());

    counter!(REQUESTS_TOTAL,
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status_code" => outcome.status_code()
    )
    .increment(1);
}
