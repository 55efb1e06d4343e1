//! HTTP gas price lookup.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::GasOracleConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("gas price oracle unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can quote a gas price in wei.
#[async_trait]
pub trait GasPriceSource: Send + Sync {
    async fn fetch_gas_price(&self) -> Result<u128, OracleError>;
}

/// reqwest-backed oracle reading one numeric value from the JSON body.
#[derive(Debug, Clone)]
pub struct GasOracle {
    client: reqwest::Client,
    url: String,
    field: String,
    timeout: Duration,
}

impl GasOracle {
    pub fn new(config: &GasOracleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.url.clone(),
            field: config.field.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl GasPriceSource for GasOracle {
    async fn fetch_gas_price(&self) -> Result<u128, OracleError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| OracleError::Unavailable(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OracleError::Unavailable(format!(
                "{} returned status {}",
                self.url, status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OracleError::Unavailable(format!("invalid JSON body: {}", e)))?;

        let price = extract_price(&body, &self.field)?;
        tracing::debug!(gas_price = price, "Fetched gas price");
        Ok(price)
    }
}

/// Read a positive integral price from `body`.
///
/// `field` is a JSON pointer when it starts with `/` (`/data/rapid`),
/// otherwise a top-level key (`gasPrice`).
pub fn extract_price(body: &Value, field: &str) -> Result<u128, OracleError> {
    let value = if field.starts_with('/') {
        body.pointer(field)
    } else {
        body.get(field)
    }
    .ok_or_else(|| OracleError::Unavailable(format!("response has no '{}' value", field)))?;

    let price = match value {
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(int), _) => Some(u128::from(int)),
            (None, Some(float)) if float.is_finite() && float >= 0.0 && float.fract() == 0.0 => {
                Some(float as u128)
            }
            _ => None,
        },
        _ => None,
    };

    match price {
        Some(0) => Err(OracleError::Unavailable(format!("'{}' is zero", field))),
        Some(price) => Ok(price),
        None => Err(OracleError::Unavailable(format!(
            "'{}' is not a non-negative integer: {}",
            field, value
        ))),
    }
}
