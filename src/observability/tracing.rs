//! Distributed tracing support.
//!
//! # Responsibilities
//! - Build the OTLP export pipeline for request spans
//! - Hand out the `tracing` layer bound to that pipeline
//! - Provide the shutdown-time flush as a [`TelemetryHandle`]
//!
//! # Design Decisions
//! - Batch export on the Tokio runtime, every span sampled
//! - Provider stays local to the process wiring (no global registration)
//! - The exporter connects lazily; only configuration errors fail startup

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::runtime;
use opentelemetry_sdk::trace::{self as sdktrace, Sampler, Tracer, TracerProvider};
use opentelemetry_sdk::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;

use crate::observability::{TelemetryError, TelemetryHandle};

/// Default OTLP/gRPC collector endpoint.
pub const DEFAULT_COLLECTOR_ENDPOINT: &str = "http://localhost:4317";

/// A configured trace export pipeline.
#[derive(Clone)]
pub struct TracingPipeline {
    provider: TracerProvider,
    service_name: String,
}

impl TracingPipeline {
    /// Build a `tracing` layer exporting spans through this pipeline.
    pub fn layer<S>(&self) -> OpenTelemetryLayer<S, Tracer>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        let tracer = self.provider.tracer(self.service_name.clone());
        tracing_opentelemetry::layer().with_tracer(tracer)
    }

    /// The flush handle for the shutdown path.
    ///
    /// Force-flushes pending spans, then shuts the provider down. Errors are
    /// logged; they never abort shutdown.
    pub fn telemetry_handle(&self) -> TelemetryHandle {
        let provider = self.provider.clone();
        TelemetryHandle::new(move || {
            for result in provider.force_flush() {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Failed to flush spans");
                }
            }
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Failed to shut down trace exporter");
            }
        })
    }
}

/// Initialize the OTLP trace pipeline for `service_name`.
///
/// Must be called from within a Tokio runtime. Fails when the exporter
/// cannot be configured for `collector_endpoint`.
pub fn init_tracing(
    service_name: &str,
    collector_endpoint: &str,
    environment: &str,
) -> Result<TracingPipeline, TelemetryError> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(collector_endpoint);

    let resource = Resource::new(vec![
        KeyValue::new("service.name", service_name.to_string()),
        KeyValue::new("deployment.environment", environment.to_string()),
    ]);

    let provider = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            sdktrace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)
        .map_err(TelemetryError::TracePipeline)?;

    Ok(TracingPipeline {
        provider,
        service_name: service_name.to_string(),
    })
}
