//! Configuration validation.
//!
//! # Responsibilities
//! - Turn the raw port setting into a usable TCP port
//! - Validate value ranges (port in 1..=65535, non-empty service name)
//!
//! # Design Decisions
//! - Missing, non-numeric and out-of-range ports are distinct errors
//! - Validation is pure: input → Result<value, ConfigError>

use crate::config::loader::ConfigError;

/// Parse the raw port setting into an integer. Range is checked by
/// [`validate_port`].
pub fn parse_port(raw: Option<&str>) -> Result<i64, ConfigError> {
    let raw = raw.ok_or(ConfigError::MissingPort)?;
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}

/// Check that `port` is a positive integer within the TCP port range.
pub fn validate_port(port: i64) -> Result<u16, ConfigError> {
    match u16::try_from(port) {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(ConfigError::PortOutOfRange(port)),
    }
}

pub fn validate_service_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::EmptyServiceName);
    }
    Ok(())
}
