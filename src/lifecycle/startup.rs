//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Start the metrics listener when enabled
//! - Bind the HTTP listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RemoteConfig;
use crate::http::HttpServer;
use crate::ircc::IrccError;
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::metrics;

/// Errors that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build display client: {0}")]
    Client(#[from] IrccError),

    #[error("failed to start metrics listener: {0}")]
    Metrics(String),

    #[error("HTTP server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bring the remote up and serve until `shutdown` fires.
pub async fn start(config: RemoteConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        device = %config.device.address,
        timeout_secs = config.device.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation already checked the address.
        let addr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e: std::net::AddrParseError| StartupError::Metrics(e.to_string()))?;
        metrics::init_metrics(addr).map_err(StartupError::Metrics)?;
    }

    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
