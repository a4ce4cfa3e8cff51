//! Certinator
//!
//! Entry point. Serves the certificate request form on `HOST_PORT` until
//! SIGINT, SIGTERM or SIGABRT, then flushes telemetry and exits 0.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ listener ──▶ router (exact path) ──▶ instrument ──▶ handler
//!                                                      │
//!                                           span ──────┼────── metrics
//!                                             │                   │
//!                                        OTLP collector     /metrics scrape
//!
//!   signal watcher ──▶ Shutdown ──▶ grace sleep ──▶ telemetry flush ──▶ exit
//! ```

use certinator::config::Args;
use certinator::lifecycle::startup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse_args();
    startup::run(args).await?;
    Ok(())
}
