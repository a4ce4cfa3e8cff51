//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve loop, TraceLayer)
//!     → routing (exact path lookup)
//!     → instrument.rs (span + metrics around the handler)
//!     → handler
//!     → response.rs helpers for error bodies
//!     → Send to client
//! ```

pub mod instrument;
pub mod response;
pub mod server;

pub use instrument::instrument_handler;
pub use server::{HttpServer, ServerError};
