//! Request handlers.
//!
//! Every handler checks its own method and answers a mismatch with
//! `404 Method is not supported.`

pub mod certificate;
pub mod health;
pub mod home;
pub mod metrics;

pub use certificate::issue_certificate;
pub use health::health_check;
pub use home::home_page;
pub use metrics::metrics_handler;

use crate::http::{HttpServer, ServerError};

/// Register the application routes on `server`.
pub fn register_routes(server: &mut HttpServer) -> Result<(), ServerError> {
    server.register_handler("/create", issue_certificate)?;
    server.register_handler("/health", health_check)?;
    server.register_handler("/", home_page)?;
    Ok(())
}
