//! Bravia web remote.
//!
//! Serves a small web UI and forwards key presses to a Sony Bravia display
//! over IRCC-IP.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / UI                 ┌──────────────────────────────────────────────┐
//!     ────────────────────────────▶│  middleware chain                             │
//!     POST /irccip/key             │  request id → catch panic → proxy headers →  │
//!     {"key_code": "..."}          │  logging → Server header → compression        │
//!                                  └──────────────────────┬───────────────────────┘
//!                                                         ▼
//!                                  ┌──────────────────────────────────────────────┐
//!                                  │  handlers: decode → IrccClient::send_key_code │
//!                                  └──────────────────────┬───────────────────────┘
//!                                                         ▼
//!                                  POST http://<display>/sony/ircc   (SOAP, X-Auth-PSK)
//! ```
//!
//! # Configuration
//! Optional TOML file (`--config`), overridden by environment variables, which
//! are overridden by flags. The display address and PSK are required.

use std::path::PathBuf;

use clap::Parser;

use bravia_remote::config::{load_config, ConfigOverrides, ObservabilityConfig};
use bravia_remote::lifecycle::startup;
use bravia_remote::observability::logging::init_logging;
use bravia_remote::Shutdown;

#[derive(Parser)]
#[command(name = "bravia-remote", version)]
#[command(about = "Web remote control for Sony Bravia displays", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "BRAVIA_REMOTE_CONFIG")]
    config: Option<PathBuf>,

    /// The IP address of the Sony Bravia display
    #[arg(long, env = "SONY_BRAVIA_IP")]
    ip: Option<String>,

    /// The configured Pre-Shared-Key (PSK) of the Sony Bravia display
    #[arg(long, env = "SONY_BRAVIA_PSK", hide_env_values = true)]
    psk: Option<String>,

    /// The address and/or port to bind the HTTP server to
    #[arg(long = "http")]
    bind: Option<String>,

    /// Disables all logging except for errors
    #[arg(short)]
    quiet: bool,

    /// Serve Prometheus metrics on this address
    #[arg(long)]
    metrics: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        device_address: cli.ip,
        psk: cli.psk,
        bind_address: cli.bind,
        metrics_address: cli.metrics,
        quiet: cli.quiet,
    };

    let config = match load_config(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    tracing::info!("bravia-remote v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    startup::start(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
