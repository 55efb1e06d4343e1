//! Per-item chain operations used by the command pipelines.
//!
//! The trait is the seam between batch orchestration and alloy; tests swap
//! in scripted gateways.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use std::time::Duration;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::transaction::{submit_transfer, TransferRequest};
use crate::blockchain::types::BlockchainResult;
use crate::network::Network;

#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Balance of `address` in wei.
    async fn balance_of(&self, network: &Network, address: Address) -> BlockchainResult<U256>;

    /// Sign and broadcast a transfer, returning its hash.
    async fn submit_transfer(
        &self,
        request: &TransferRequest,
        gas_price: u128,
    ) -> BlockchainResult<TxHash>;
}

/// JSON-RPC gateway; builds providers per call from the network's endpoints.
#[derive(Debug, Clone)]
pub struct RpcGateway {
    timeout: Duration,
}

impl RpcGateway {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ChainGateway for RpcGateway {
    async fn balance_of(&self, network: &Network, address: Address) -> BlockchainResult<U256> {
        BlockchainClient::for_network(network, self.timeout)
            .get_balance(address)
            .await
    }

    async fn submit_transfer(
        &self,
        request: &TransferRequest,
        gas_price: u128,
    ) -> BlockchainResult<TxHash> {
        submit_transfer(request, gas_price, self.timeout).await
    }
}
