//! Device-facing types and error definitions.

use reqwest::StatusCode;
use thiserror::Error;

// Re-export DeviceConfig from config module to avoid duplication
pub use crate::config::schema::DeviceConfig;

/// Application-level fault reported inside a SOAP fault body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Vendor error code, e.g. `800`.
    pub code: String,
    /// Human-readable description, e.g. `Cannot accept the IRCC Code`.
    pub description: String,
}

/// Errors that can occur while sending a command to the device.
#[derive(Debug, Error)]
pub enum IrccError {
    /// Connection, DNS, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Device answered 500 with a recognizable fault in the body.
    #[error("SOAP fault: {} ({})", .0.description, .0.code)]
    SoapFault(SoapFault),

    /// Any other status >= 400, including 500 with an unrecognized body.
    #[error("HTTP error: {0}")]
    Http(StatusCode),
}

impl IrccError {
    /// HTTP status the device replied with, if it replied at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            IrccError::Transport(e) => e.status(),
            IrccError::SoapFault(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            IrccError::Http(status) => Some(*status),
        }
    }

    /// Decoded device fault, if any.
    pub fn fault(&self) -> Option<&SoapFault> {
        match self {
            IrccError::SoapFault(fault) => Some(fault),
            _ => None,
        }
    }

    /// True when the device did not answer within the configured deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, IrccError::Transport(e) if e.is_timeout())
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            IrccError::Transport(_) => "transport",
            IrccError::SoapFault(_) => "soap_fault",
            IrccError::Http(_) => "http_status",
        }
    }
}

/// Result type for device operations.
pub type IrccResult<T> = Result<T, IrccError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display() {
        let err = IrccError::SoapFault(SoapFault {
            code: "800".to_string(),
            description: "Cannot accept the IRCC Code".to_string(),
        });
        assert_eq!(err.to_string(), "SOAP fault: Cannot accept the IRCC Code (800)");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.fault().map(|f| f.code.as_str()), Some("800"));
    }

    #[test]
    fn test_http_display_uses_status_line() {
        let err = IrccError::Http(StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "HTTP error: 403 Forbidden");
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert!(err.fault().is_none());
        assert!(!err.is_timeout());
        assert_eq!(err.kind(), "http_status");
    }
}
