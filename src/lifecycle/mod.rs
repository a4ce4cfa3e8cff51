//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Parse args → Init logging/tracing → Validate config → Init metrics
//!     → Register handlers → Bind listener → Serve
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM/SIGABRT → Shutdown::notify (once)
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Log → Grace sleep → Flush telemetry → Return (exit 0)
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is retried
//! - The listener keeps accepting during the grace period
//! - Every termination signal ends in the same clean exit

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, TerminationSignal};
