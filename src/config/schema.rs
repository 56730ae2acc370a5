//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the remote.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the web remote.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RemoteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Display to control.
    pub device: DeviceConfig,

    /// Static UI settings.
    pub ui: UiConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Display connection settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// IP address or hostname of the display, optionally with scheme and port.
    pub address: String,

    /// Pre-shared key configured on the display.
    pub psk: String,

    /// Total deadline for one command, in seconds.
    pub timeout_secs: u64,

    /// Connection establishment deadline, in seconds.
    pub connect_timeout_secs: u64,
}

impl DeviceConfig {
    /// Base URL of the display; `http://` is assumed when no scheme is given.
    pub fn base_url(&self) -> String {
        if self.address.contains("://") {
            self.address.clone()
        } else {
            format!("http://{}", self.address)
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            psk: String::new(),
            timeout_secs: 10,
            connect_timeout_secs: 3,
        }
    }
}

// The PSK stays out of logs.
impl std::fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("address", &self.address)
            .field("psk", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Static UI settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Directory served for every path the API does not handle.
    pub static_dir: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            static_dir: "./ui".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Only log errors.
    pub quiet: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            quiet: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:6060".to_string(),
        }
    }
}
