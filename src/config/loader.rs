//! Configuration loading from disk and the command line.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RemoteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values given on the command line or through the environment.
///
/// Anything set here wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub device_address: Option<String>,
    pub psk: Option<String>,
    pub bind_address: Option<String>,
    pub metrics_address: Option<String>,
    pub quiet: bool,
}

impl ConfigOverrides {
    /// Merge into `config`. Empty strings count as unset.
    pub fn apply(self, config: &mut RemoteConfig) {
        if let Some(address) = non_empty(self.device_address) {
            config.device.address = address;
        }
        if let Some(psk) = non_empty(self.psk) {
            config.device.psk = psk;
        }
        if let Some(bind) = non_empty(self.bind_address) {
            config.listener.bind_address = all_interfaces(bind);
        }
        if let Some(metrics) = non_empty(self.metrics_address) {
            config.observability.metrics_enabled = true;
            config.observability.metrics_address = all_interfaces(metrics);
        }
        if self.quiet {
            config.observability.quiet = true;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A bare `:port` listens on every interface.
fn all_interfaces(address: String) -> String {
    if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address
    }
}

/// Parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<RemoteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the effective configuration: optional file, then overrides, then validation.
pub fn load_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<RemoteConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => RemoteConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
