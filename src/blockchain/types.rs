//! Chain-specific types, unit conversion and error definitions.

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Recipient or account address could not be parsed.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    /// Amount is not a decimal number of whole-currency units.
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// The node rejected the signed transaction.
    #[error("Transaction rejected: {0}")]
    Rejected(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Parse a decimal amount in whole-currency units (18 decimals) into wei.
pub fn parse_amount(amount: &str) -> BlockchainResult<U256> {
    let trimmed = amount.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(BlockchainError::InvalidAmount(amount.to_string()));
    }
    parse_ether(trimmed).map_err(|_| BlockchainError::InvalidAmount(amount.to_string()))
}

/// Render wei as a decimal string without trailing zeros, keeping one
/// fractional digit (`10^18` → `"1.0"`).
pub fn format_balance(wei: U256) -> String {
    let full = format_ether(wei);
    match full.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                format!("{}.0", whole)
            } else {
                format!("{}.{}", whole, frac)
            }
        }
        None => format!("{}.0", full),
    }
}
