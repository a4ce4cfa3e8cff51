//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (single task):
//!     HttpServer::register_handler(path, handler)
//!     → router.rs validates the path and stores it in the RouteTable
//!
//! Serve:
//!     RouteTable moved into HttpServer::run
//!     → frozen into an immutable axum Router
//!     → exact path lookup per request, 404 fallback
//! ```
//!
//! # Design Decisions
//! - Routes are fixed before the listener starts; no locking at runtime
//! - Deterministic: same path always reaches the same handler
//! - Last registration for a path wins

pub mod router;

pub use router::{validate_path, RouteError, RouteTable};
