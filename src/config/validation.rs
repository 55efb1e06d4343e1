//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the network catalog (non-empty, unique chain ids, valid URLs)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no networks configured")]
    NoNetworks,

    #[error("network #{0} has an empty name")]
    EmptyNetworkName(usize),

    #[error("network '{name}' has invalid URL '{url}'")]
    InvalidUrl { name: String, url: String },

    #[error("chain id {chain_id} is used by both '{first}' and '{second}'")]
    DuplicateChainId {
        chain_id: u64,
        first: String,
        second: String,
    },

    #[error("gas oracle URL '{0}' is invalid")]
    InvalidOracleUrl(String),

    #[error("gas oracle field name is empty")]
    EmptyOracleField,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("metrics address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.networks.is_empty() {
        errors.push(ValidationError::NoNetworks);
    }

    let mut seen: HashMap<u64, &str> = HashMap::new();
    for (i, network) in config.networks.iter().enumerate() {
        if network.name.trim().is_empty() {
            errors.push(ValidationError::EmptyNetworkName(i + 1));
        }

        for url in std::iter::once(&network.rpc_url).chain(network.failover_urls.iter()) {
            if !is_http_url(url) {
                errors.push(ValidationError::InvalidUrl {
                    name: network.name.clone(),
                    url: url.clone(),
                });
            }
        }

        match seen.get(&network.chain_id) {
            Some(first) => errors.push(ValidationError::DuplicateChainId {
                chain_id: network.chain_id,
                first: first.to_string(),
                second: network.name.clone(),
            }),
            None => {
                seen.insert(network.chain_id, &network.name);
            }
        }
    }

    if !is_http_url(&config.gas_oracle.url) {
        errors.push(ValidationError::InvalidOracleUrl(config.gas_oracle.url.clone()));
    }
    if config.gas_oracle.field.trim().is_empty() {
        errors.push(ValidationError::EmptyOracleField);
    }
    if config.gas_oracle.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("gas_oracle.timeout_secs"));
    }
    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("rpc.timeout_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
