//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the tool.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Network catalog, in menu order.
    pub networks: Vec<NetworkConfig>,

    /// Credential and report file locations.
    pub files: FilesConfig,

    /// Inter-item delay tunables.
    pub delays: DelayConfig,

    /// Gas price oracle endpoint.
    pub gas_oracle: GasOracleConfig,

    /// RPC call settings.
    pub rpc: RpcConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            networks: default_networks(),
            files: FilesConfig::default(),
            delays: DelayConfig::default(),
            gas_oracle: GasOracleConfig::default(),
            rpc: RpcConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A single network entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Display name, also used to derive report file names.
    pub name: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID (EIP-155).
    pub chain_id: u64,

    /// Extra endpoints tried in order for read-only calls.
    #[serde(default)]
    pub failover_urls: Vec<String>,
}

impl NetworkConfig {
    fn new(name: &str, rpc_url: &str, chain_id: u64) -> Self {
        Self {
            name: name.to_string(),
            rpc_url: rpc_url.to_string(),
            chain_id,
            failover_urls: Vec::new(),
        }
    }
}

fn default_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig::new("Binance Smart Chain (BSC)", "https://bsc-dataseed.bnbchain.org", 56),
        NetworkConfig::new("Polygon", "https://polygon-rpc.com", 137),
        NetworkConfig::new("Ethereum", "https://ethereum-rpc.publicnode.com", 1),
        NetworkConfig::new("OpBnb", "https://opbnb-mainnet-rpc.bnbchain.org", 204),
        NetworkConfig::new("Arbitrum", "https://arb1.arbitrum.io/rpc", 42161),
    ]
}

/// File locations. Relative names are resolved against `data_dir`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Directory holding credential and report files.
    pub data_dir: PathBuf,

    /// Append-only address log.
    pub address_file: String,

    /// Append-only private key log, line-aligned with `address_file`.
    pub key_file: String,

    /// Funding key used as the sender for transfers.
    pub funding_key_file: String,

    /// Prefix for per-network balance reports.
    pub balance_report_prefix: String,

    /// Prefix for per-network transfer reports.
    pub transfer_report_prefix: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            address_file: "address.txt".to_string(),
            key_file: "key.txt".to_string(),
            funding_key_file: "key-utama.txt".to_string(),
            balance_report_prefix: "sisa-saldo-".to_string(),
            transfer_report_prefix: "transfer-".to_string(),
        }
    }
}

/// Delay units for the operation sequencer, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DelayConfig {
    /// Linear unit for transfer-by-file: item `i` waits `unit * (i + 1)`.
    pub transfer_unit_ms: u64,

    /// Fixed wait before a manual single transfer.
    pub manual_transfer_ms: u64,

    /// Linear unit for balance checks.
    pub balance_unit_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            transfer_unit_ms: 10_000,
            manual_transfer_ms: 10_000,
            balance_unit_ms: 1_000,
        }
    }
}

/// Gas price oracle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GasOracleConfig {
    /// HTTP GET endpoint returning a JSON body.
    pub url: String,

    /// Where the price in wei sits in the JSON body: a top-level key, or a
    /// JSON pointer such as `/data/rapid`.
    pub field: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GasOracleConfig {
    fn default() -> Self {
        Self {
            url: "https://beaconcha.in/api/v1/execution/gasnow".to_string(),
            field: "/data/rapid".to_string(),
            timeout_secs: 10,
        }
    }
}

/// RPC configuration shared by all networks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Timeout for a single RPC call in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`.
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Expose a Prometheus scrape endpoint while a run is in progress.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_networks() {
        let config = AppConfig::default();
        let ids: Vec<u64> = config.networks.iter().map(|n| n.chain_id).collect();
        assert_eq!(ids, vec![56, 137, 1, 204, 42161]);
    }

    #[test]
    fn test_log_format_parsing() {
        let obs: ObservabilityConfig = toml::from_str("log_format = \"json\"").unwrap();
        assert_eq!(obs.log_format, LogFormat::Json);
        assert_eq!(obs.log_level, "info");
    }
}
