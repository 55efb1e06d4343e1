//! Account provider.

use alloy::hex;
use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::network::{Network, NetworkRegistry};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account count must be a positive integer")]
    InvalidCount,

    /// Key derivation failed for one account.
    #[error("failed to generate account #{index}: {reason}")]
    Generation { index: usize, reason: String },
}

/// A freshly generated keypair. Only `private_key` and `address` are persisted.
#[derive(Clone)]
pub struct Account {
    /// 0x-prefixed 32-byte hex.
    pub private_key: String,
    /// 0x-prefixed uncompressed SEC1 public key.
    pub public_key: String,
    pub address: Address,
    pub network: Network,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("network", &self.network.name)
            .finish_non_exhaustive()
    }
}

/// Produces accounts on demand; never touches storage.
pub struct AccountProvider<'a> {
    registry: &'a NetworkRegistry,
}

impl<'a> AccountProvider<'a> {
    pub fn new(registry: &'a NetworkRegistry) -> Self {
        Self { registry }
    }

    /// Generate `count` accounts using the thread-local RNG.
    pub fn generate(&self, count: usize) -> Result<Vec<Account>, AccountError> {
        self.generate_with(count, &mut rand::thread_rng())
    }

    /// Generate `count` accounts from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Account>, AccountError> {
        if count == 0 {
            return Err(AccountError::InvalidCount);
        }

        (0..count).map(|index| self.generate_one(index, rng)).collect()
    }

    fn generate_one<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<Account, AccountError> {
        let network = self
            .registry
            .networks()
            .choose(rng)
            .cloned()
            .ok_or_else(|| AccountError::Generation {
                index,
                reason: "network registry is empty".to_string(),
            })?;

        let mut secret = [0u8; 32];
        rng.fill(&mut secret);
        let signer = PrivateKeySigner::from_bytes(&B256::from(secret))
            .map_err(|e| AccountError::Generation {
                index,
                reason: e.to_string(),
            })?;

        let public_key = signer
            .credential()
            .verifying_key()
            .to_encoded_point(false);

        Ok(Account {
            private_key: signer.to_bytes().to_string(),
            public_key: hex::encode_prefixed(public_key.as_bytes()),
            address: signer.address(),
            network,
        })
    }
}
