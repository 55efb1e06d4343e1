//! Read-only RPC client for one network, with timeout and failover.
//!
//! # Responsibilities
//! - Connect to the network's JSON-RPC endpoints
//! - Query balances
//! - Handle timeouts and network errors by falling through to the next endpoint

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::network::Network;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    network: Network,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a client over every endpoint of `network`.
    pub fn for_network(network: &Network, timeout_duration: Duration) -> Self {
        let providers = network
            .endpoints()
            .map(|url| {
                Arc::new(ProviderBuilder::new().connect_http(url.clone()))
                    as Arc<dyn Provider + Send + Sync>
            })
            .collect();

        Self {
            providers,
            network: network.clone(),
            timeout_duration,
        }
    }

    /// Get the balance of an address in wei.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        let mut timed_out = false;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_balance(address);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(network = %self.network.name, provider_idx = i, error = %e, "RPC error"),
                Err(_) => {
                    timed_out = true;
                    tracing::warn!(network = %self.network.name, provider_idx = i, "RPC timeout");
                }
            }
        }
        if timed_out && self.providers.len() == 1 {
            return Err(BlockchainError::Timeout(self.timeout_duration.as_secs()));
        }
        Err(BlockchainError::Rpc("All providers failed to get balance".to_string()))
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("network", &self.network.name)
            .field("rpc_url", &self.network.rpc_url.as_str())
            .field("chain_id", &self.network.chain_id.0)
            .field("providers", &self.providers.len())
            .finish()
    }
}
