//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wallet_batch_items_total` (counter): batch items by operation, network, outcome
//! - `wallet_batch_item_duration_seconds` (histogram): time spent in one item's operation
//! - `wallet_batch_accounts_generated_total` (counter): generated keypairs

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus recorder and scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_item(operation: &'static str, network: &str, success: bool, elapsed: Duration) {
    let outcome = if success { "success" } else { "failure" };
    ::metrics::counter!(
        "wallet_batch_items_total",
        "operation" => operation,
        "network" => network.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("wallet_batch_item_duration_seconds", "operation" => operation)
        .record(elapsed.as_secs_f64());
}

pub fn record_generated(count: usize) {
    ::metrics::counter!("wallet_batch_accounts_generated_total").increment(count as u64);
}
