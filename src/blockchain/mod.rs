//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! key.txt / key-utama.txt (private keys)
//!     → wallet.rs (key parsing, address derivation)
//!     → client.rs (read-only RPC with timeouts and failover)
//!     → transaction.rs (build, sign, broadcast)
//!     → gateway.rs (trait used by the command pipelines)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Transfers go to the primary endpoint only; failover is for reads

pub mod client;
pub mod gateway;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use gateway::{ChainGateway, RpcGateway};
pub use transaction::TransferRequest;
pub use types::{format_balance, parse_amount, BlockchainError, BlockchainResult, ChainId};
pub use wallet::Wallet;
