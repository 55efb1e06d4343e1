//! Command dispatch.
//!
//! Each front-end path becomes a [`Command`] value; [`dispatch`] runs it
//! against a [`Context`] of collaborators. Pipelines are linear:
//! parse → validate → resolve network → build items → sequencer → report.

pub mod balance;
pub mod generate;
pub mod transfer;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use thiserror::Error;

use crate::accounts::AccountError;
use crate::blockchain::{BlockchainError, ChainGateway, RpcGateway};
use crate::config::{AppConfig, DelayConfig};
use crate::ledger::{LedgerError, LedgerStore};
use crate::network::{NetworkRegistry, RegistryError};
use crate::oracle::{GasOracle, GasPriceSource};
use crate::sequencer::{RunSummary, SequencerError, Sleeper, TokioSleeper};

pub use balance::KeyItem;
pub use transfer::Recipient;

/// A fully-specified operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate {
        count: usize,
    },
    Transfer {
        amount: String,
        /// 1-based menu choice.
        network: usize,
        target: TransferTarget,
    },
    CheckBalance {
        key_file: PathBuf,
        /// 1-based menu choice.
        network: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferTarget {
    /// One recipient typed in by the operator.
    Manual(String),
    /// One recipient per line.
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub enum CommandReport {
    Generated {
        addresses: Vec<Address>,
        address_log: PathBuf,
    },
    Batch {
        operation: &'static str,
        network: String,
        report: PathBuf,
        summary: RunSummary,
    },
}

impl std::fmt::Display for CommandReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandReport::Generated {
                addresses,
                address_log,
            } => write!(
                f,
                "Generated {} wallets, appended to {}",
                addresses.len(),
                address_log.display()
            ),
            CommandReport::Batch {
                operation,
                network,
                report,
                summary,
            } => write!(
                f,
                "Finished {} on {}: {} processed, {} succeeded, {} failed (report: {})",
                operation,
                network,
                summary.processed,
                summary.succeeded,
                summary.failed,
                report.display()
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid funding key: {0}")]
    FundingKey(#[source] BlockchainError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Sequencer(#[from] SequencerError),
}

impl CommandError {
    /// Operator mistakes, reported before any item ran.
    pub fn is_input_error(&self) -> bool {
        match self {
            CommandError::Registry(_)
            | CommandError::InvalidInput(_)
            | CommandError::FundingKey(_)
            | CommandError::Account(AccountError::InvalidCount) => true,
            CommandError::Ledger(e) => matches!(
                e,
                LedgerError::FileNotFound { .. } | LedgerError::EmptyFile { .. }
            ),
            CommandError::Sequencer(e) => matches!(e, SequencerError::EmptyBatch),
            CommandError::Account(_) => false,
        }
    }
}

/// Collaborators shared by every command.
pub struct Context {
    pub registry: NetworkRegistry,
    pub store: LedgerStore,
    pub delays: DelayConfig,
    pub gateway: Arc<dyn ChainGateway>,
    pub oracle: Arc<dyn GasPriceSource>,
    pub sleeper: Arc<dyn Sleeper>,
}

impl Context {
    /// Production wiring: JSON-RPC gateway, HTTP oracle, wall-clock delays.
    pub fn from_config(config: &AppConfig) -> Result<Self, CommandError> {
        Ok(Self {
            registry: NetworkRegistry::from_config(&config.networks)?,
            store: LedgerStore::new(&config.files),
            delays: config.delays.clone(),
            gateway: Arc::new(RpcGateway::new(Duration::from_secs(config.rpc.timeout_secs))),
            oracle: Arc::new(GasOracle::new(&config.gas_oracle)),
            sleeper: Arc::new(TokioSleeper),
        })
    }
}

/// Run one command to completion.
pub async fn dispatch(command: Command, ctx: &Context) -> Result<CommandReport, CommandError> {
    match command {
        Command::Generate { count } => generate::run_generate(ctx, count),
        Command::Transfer {
            amount,
            network,
            target,
        } => transfer::run_transfer(ctx, &amount, network, &target).await,
        Command::CheckBalance { key_file, network } => {
            balance::run_balance_check(ctx, &key_file, network).await
        }
    }
}
