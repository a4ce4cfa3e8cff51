//! Certinator: domain certificate request front-end.
//!
//! A small HTTP service that accepts a domain name through a web form and
//! acknowledges it. Around the handlers sits an instrumented server shell:
//! exact-path routing, per-request spans and metrics, and a signal-driven
//! shutdown that flushes telemetry before exit.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::TelemetryHandle;
