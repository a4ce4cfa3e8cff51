//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line + environment (HOST_PORT, SERVICE_NAME, ...)
//!     → schema.rs (clap parse into Args)
//!     → loader.rs (assemble AppConfig)
//!     → validation.rs (port present, numeric, in range)
//!     → ServerConfig / TelemetryConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - The listen port has no default; startup fails without it
//! - Every other setting has a default to allow minimal environments

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, AppConfig, ConfigError};
pub use schema::{Args, ServerConfig, TelemetryConfig};
