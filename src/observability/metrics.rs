//! Metrics collection and exposition.
//!
//! # Metrics
//! - `remote_requests_total` (counter): inbound requests by method, status
//! - `remote_request_duration_seconds` (histogram): inbound latency
//! - `remote_key_presses_total` (counter): commands sent, by outcome
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Serve Prometheus metrics on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| e.to_string())?;

    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one finished inbound request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "remote_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("remote_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one command sent to the display. `outcome` is `ok` or an error kind.
pub fn record_key_press(outcome: &'static str) {
    ::metrics::counter!("remote_key_presses_total", "outcome" => outcome).increment(1);
}
