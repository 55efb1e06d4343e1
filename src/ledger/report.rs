//! Per-network report files.

use std::path::{Path, PathBuf};

use alloy::primitives::Address;

use crate::ledger::store::{append_line, LedgerError};
use crate::network::Network;
use crate::sequencer::{Outcome, OutcomeSink};

/// One balance query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRecord {
    pub address: Address,
    /// Decimal, whole-currency units.
    pub balance: String,
    pub network: Network,
}

impl std::fmt::Display for BalanceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.address, self.balance, self.network.name)
    }
}

/// How a report file is opened at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Snapshot of the latest run; truncated.
    Balance,
    /// Log of submitted transfers; appended under a per-run header.
    Transfer,
}

/// An open report for the current run.
#[derive(Debug, Clone)]
pub struct ReportHandle {
    path: PathBuf,
    network_name: String,
}

impl ReportHandle {
    pub(crate) fn new(path: PathBuf, network_name: String) -> Self {
        Self { path, network_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_balance(&self, record: &BalanceRecord) -> Result<(), LedgerError> {
        append_line(&self.path, &record.to_string())
    }

    /// `<subject>: <value> <network>` for successes,
    /// `<subject>: FAILED <reason> <network>` for failures.
    fn outcome_line(&self, subject: &str, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Success(value) => format!("{}: {} {}", subject, value, self.network_name),
            Outcome::Failure(reason) => format!(
                "{}: FAILED {} {}",
                subject,
                single_line(reason),
                self.network_name
            ),
        }
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl OutcomeSink for ReportHandle {
    fn record(&mut self, _index: usize, subject: &str, outcome: &Outcome) -> Result<(), LedgerError> {
        append_line(&self.path, &self.outcome_line(subject, outcome))
    }
}
