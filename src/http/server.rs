//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Serve the static UI for every other path
//! - Wire up the middleware chain
//! - Bind server to listener and shut down gracefully

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::config::RemoteConfig;
use crate::http::handlers::{list_keys, press_key};
use crate::http::middleware;
use crate::http::request::RequestCounter;
use crate::ircc::{IrccClient, IrccResult};
use crate::lifecycle::signals::wait_for_signal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub ircc: Arc<IrccClient>,
}

/// HTTP server for the web remote.
pub struct HttpServer {
    router: Router,
    config: RemoteConfig,
    requests: Arc<RequestCounter>,
}

impl HttpServer {
    /// Create a new HTTP server, building the display client from `config.device`.
    pub fn new(config: RemoteConfig) -> IrccResult<Self> {
        let client = IrccClient::from_config(&config.device)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a new HTTP server around an existing display client.
    pub fn with_client(config: RemoteConfig, client: IrccClient) -> Self {
        let state = AppState {
            ircc: Arc::new(client),
        };
        let requests = Arc::new(RequestCounter::new());
        let router = Self::build_router(&config, state, requests.clone());

        Self {
            router,
            config,
            requests,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RemoteConfig, state: AppState, requests: Arc<RequestCounter>) -> Router {
        let routes = Router::new()
            .route("/irccip/key", post(press_key))
            .route("/irccip/keys", get(list_keys))
            .fallback_service(ServeDir::new(&config.ui.static_dir))
            .with_state(state);

        middleware::apply(routes, requests)
    }

    /// Run the server until `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            ui_dir = %self.config.ui.static_dir,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {},
                    _ = wait_for_signal() => {},
                }
            })
            .await?;

        tracing::info!(requests = self.requests.issued(), "HTTP server stopped");
        Ok(())
    }

    /// The router with middleware applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }
}
