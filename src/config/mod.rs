//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (CLI flags / env vars override file values)
//!     → validation.rs (semantic checks)
//!     → RemoteConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the display address and PSK are fixed
//!   for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ConfigOverrides};
pub use schema::DeviceConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RemoteConfig;
pub use schema::UiConfig;
