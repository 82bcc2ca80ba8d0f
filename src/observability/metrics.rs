//! Metrics collection and exposition.
//!
//! # Metrics
//! - `voting_gateway_http_requests_total` (counter): requests by method, path, status
//! - `voting_gateway_http_request_duration_seconds` (histogram): request latency
//! - `voting_gateway_node_calls_total` (counter): node queries by method, outcome
//! - `voting_gateway_node_call_duration_seconds` (histogram): node query latency
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! deployments with metrics disabled pay nothing.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("voting_gateway_http_requests_total", &labels).increment(1);
    metrics::histogram!("voting_gateway_http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record one node query.
pub fn record_node_call(method: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("voting_gateway_node_calls_total", "method" => method, "outcome" => outcome).increment(1);
    metrics::histogram!("voting_gateway_node_call_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}
