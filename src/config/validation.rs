//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required device settings are present
//! - Addresses and timeouts are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RemoteConfig → Result<(), Vec<ValidationError>>
//! - Runs before any request is served

use std::net::SocketAddr;

use reqwest::header::HeaderValue;
use thiserror::Error;

use crate::config::schema::RemoteConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("display address is not set (SONY_BRAVIA_IP or --ip)")]
    MissingDeviceAddress,

    #[error("pre-shared key is not set (SONY_BRAVIA_PSK or --psk)")]
    MissingPsk,

    #[error("pre-shared key contains characters not allowed in a header")]
    InvalidPsk,

    #[error("invalid display address '{address}': {reason}")]
    InvalidDeviceAddress { address: String, reason: String },

    #[error("invalid {field} '{value}'")]
    InvalidBindAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check the configuration, collecting every problem.
pub fn validate_config(config: &RemoteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let device = &config.device;

    if device.address.trim().is_empty() {
        errors.push(ValidationError::MissingDeviceAddress);
    } else if let Err(e) = url::Url::parse(&device.base_url()) {
        errors.push(ValidationError::InvalidDeviceAddress {
            address: device.address.clone(),
            reason: e.to_string(),
        });
    }

    if device.psk.is_empty() {
        errors.push(ValidationError::MissingPsk);
    } else if HeaderValue::from_str(&device.psk).is_err() {
        errors.push(ValidationError::InvalidPsk);
    }

    if device.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("device.timeout_secs"));
    }
    if device.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("device.connect_timeout_secs"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidBindAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
