//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by shape, status
//! - `gateway_request_duration_seconds` (histogram): latency by shape
//! - `gateway_registry_fetch_total` (counter): manifest lookups by outcome
//! - `gateway_cdn_fetch_total` (counter): origin attempts by origin, outcome
//!
//! Without an installed recorder every call is a no-op, so handlers record
//! unconditionally.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed inbound request.
pub fn record_request(shape: &'static str, status: u16, start: Instant) {
    counter!("gateway_requests_total", "shape" => shape, "status" => status.to_string()).increment(1);
    histogram!("gateway_request_duration_seconds", "shape" => shape)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a manifest lookup.
pub fn record_registry_fetch(outcome: &'static str) {
    counter!("gateway_registry_fetch_total", "outcome" => outcome).increment(1);
}

/// Record one CDN origin attempt.
pub fn record_cdn_fetch(origin: &str, outcome: &'static str) {
    counter!("gateway_cdn_fetch_total", "origin" => origin.to_string(), "outcome" => outcome)
        .increment(1);
}
