//! Transfer construction, signing, and broadcast.
//!
//! # Responsibilities
//! - Build a native-value transfer with an explicit gas price and chain id
//! - Sign with the sender's key and broadcast through the primary endpoint
//! - Report the transaction hash (no confirmation tracking)

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{parse_amount, BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;
use crate::network::Network;

/// One transfer to submit. Built per batch item and dropped after submission.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub sender: Wallet,
    pub recipient: Address,
    /// Decimal amount in whole-currency units, as entered.
    pub amount: String,
    pub value: U256,
    pub network: Network,
}

impl TransferRequest {
    /// Validate the recipient and amount strings.
    pub fn new(
        sender: Wallet,
        recipient: &str,
        amount: &str,
        network: Network,
    ) -> BlockchainResult<Self> {
        let recipient: Address = recipient
            .trim()
            .parse()
            .map_err(|_| BlockchainError::InvalidAddress(recipient.to_string()))?;
        let value = parse_amount(amount)?;

        Ok(Self {
            sender,
            recipient,
            amount: amount.trim().to_string(),
            value,
            network,
        })
    }

    /// The unsigned transaction; nonce and gas limit are filled by the provider.
    pub fn to_transaction(&self, gas_price: u128) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.sender.address())
            .with_to(self.recipient)
            .with_value(self.value)
            .with_gas_price(gas_price)
            .with_chain_id(self.network.chain_id.0)
    }
}

/// Sign and broadcast `request`, returning the transaction hash.
pub async fn submit_transfer(
    request: &TransferRequest,
    gas_price: u128,
    timeout_duration: Duration,
) -> BlockchainResult<TxHash> {
    let provider = ProviderBuilder::new()
        .wallet(request.sender.to_ethereum_wallet())
        .connect_http(request.network.rpc_url.clone());

    let tx = request.to_transaction(gas_price);

    tracing::debug!(
        from = %request.sender.address(),
        to = %request.recipient,
        value = %request.value,
        gas_price = gas_price,
        chain_id = request.network.chain_id.0,
        "Submitting transfer"
    );

    let pending = timeout(timeout_duration, provider.send_transaction(tx))
        .await
        .map_err(|_| BlockchainError::Timeout(timeout_duration.as_secs()))?
        .map_err(|e| BlockchainError::Rejected(e.to_string()))?;

    Ok(*pending.tx_hash())
}
