//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber once per process
//! - Map the configured level and quiet mode to a filter
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - Quiet mode keeps errors only
//! - `NO_COLOR` turns off ANSI colours

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directive for the given settings, ignoring `RUST_LOG`.
pub fn filter_directive(config: &ObservabilityConfig) -> String {
    let level = if config.quiet {
        "error"
    } else {
        config.log_level.as_str()
    };
    format!("bravia_remote={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = if config.quiet {
        EnvFilter::new(filter_directive(config))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_directive(config).into())
    };

    let ansi = std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(ansi))
        .init();
}
