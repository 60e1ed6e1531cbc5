//! Metrics collection and exposition.
//!
//! # Metrics
//! - `autodir_resolutions_total` (counter): resolutions by outcome
//!   (`pass_through`, `directory`, `not_found`)
//! - `autodir_index_rebuilds_total` (counter): route index rebuilds
//! - `autodir_index_templates` (gauge): templates in the latest index
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(outcome: &'static str) {
    counter!("autodir_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_index_rebuild(templates: usize) {
    counter!("autodir_index_rebuilds_total").increment(1);
    gauge!("autodir_index_templates").set(templates as f64);
}
