//! Batch wallet operations: generate keypairs, transfer native currency and
//! check balances across a configured set of EVM networks.

pub mod accounts;
pub mod blockchain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod ledger;
pub mod network;
pub mod observability;
pub mod oracle;
pub mod sequencer;

pub use commands::{dispatch, Command, CommandError, CommandReport, Context};
pub use config::AppConfig;
pub use sequencer::Sequencer;
