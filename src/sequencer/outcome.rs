//! Per-item outcomes and run bookkeeping.

use crate::ledger::LedgerError;

/// Result of one batch item, recorded as soon as it is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Transaction hash or formatted balance.
    Success(String),
    /// Error description.
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// What a successful operation reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSuccess {
    /// Who the record is about (recipient or derived address).
    pub subject: String,
    pub value: String,
}

/// A unit of work in a batch.
pub trait BatchItem: Clone {
    /// Subject used in logs and failure records. Must not expose secrets.
    fn label(&self, index: usize) -> String;
}

/// Durable destination for outcomes.
pub trait OutcomeSink {
    fn record(&mut self, index: usize, subject: &str, outcome: &Outcome) -> Result<(), LedgerError>;
}

impl OutcomeSink for Vec<(usize, String, Outcome)> {
    fn record(&mut self, index: usize, subject: &str, outcome: &Outcome) -> Result<(), LedgerError> {
        self.push((index, subject.to_string(), outcome.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running { index: usize },
    Completed,
    Aborted,
}

/// Counts reported when a run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub(crate) fn add(&mut self, outcome: &Outcome) {
        self.processed += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}
