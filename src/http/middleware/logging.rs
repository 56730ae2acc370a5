//! Request/response logging with timing.

use std::time::Instant;

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

use crate::http::middleware::proxy_headers::{client_info, ClientInfo};
use crate::observability::metrics;

/// Log level a finished request is reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl From<StatusCode> for Severity {
    fn from(status: StatusCode) -> Self {
        if status.is_server_error() {
            Severity::Error
        } else if status.is_client_error() {
            Severity::Warn
        } else {
            Severity::Info
        }
    }
}

/// Middleware: log the request on entry and its outcome on exit.
///
/// Sits outside compression, so the status seen here is the handler's.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let client = match req.extensions().get::<ClientInfo>() {
        Some(info) => info.clone(),
        None => client_info(&req),
    };

    tracing::info!(
        method = %method,
        uri = %uri,
        remote_addr = %client.remote_addr,
        scheme = %client.scheme,
        "Request received"
    );

    let response = next.run(req).await;

    let status = response.status();
    let reason = status.canonical_reason().unwrap_or("");
    let elapsed = start.elapsed();

    match Severity::from(status) {
        Severity::Info => tracing::info!(status = status.as_u16(), reason, ?elapsed, "Request completed"),
        Severity::Warn => tracing::warn!(status = status.as_u16(), reason, ?elapsed, "Request completed"),
        Severity::Error => tracing::error!(status = status.as_u16(), reason, ?elapsed, "Request completed"),
    }

    metrics::record_request(method.as_str(), status.as_u16(), start);

    response
}
