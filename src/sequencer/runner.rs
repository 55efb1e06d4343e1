//! The sequencer loop.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use thiserror::Error;

use crate::ledger::LedgerError;
use crate::network::Network;
use crate::observability::metrics;
use crate::sequencer::delay::{DelayPolicy, Sleeper};
use crate::sequencer::outcome::{BatchItem, ItemSuccess, Outcome, OutcomeSink, RunState, RunSummary};

#[derive(Debug, Error)]
pub enum SequencerError {
    /// Nothing to run; raised before any item executes.
    #[error("batch has no items")]
    EmptyBatch,

    /// An outcome could not be recorded; the remaining items were not run.
    #[error("failed to record outcome of item {} after {completed} recorded: {source}", index + 1)]
    Storage {
        index: usize,
        completed: usize,
        #[source]
        source: LedgerError,
    },
}

/// Drives one batch over one network.
pub struct Sequencer<'a> {
    operation: &'static str,
    network: String,
    policy: DelayPolicy,
    sleeper: &'a dyn Sleeper,
    state: RunState,
}

impl<'a> Sequencer<'a> {
    pub fn new(
        operation: &'static str,
        network: &Network,
        policy: DelayPolicy,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self {
            operation,
            network: network.name.clone(),
            policy,
            sleeper,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run `op` over `items` in order, recording each outcome into `sink`.
    ///
    /// Operation errors become [`Outcome::Failure`] and never stop the batch.
    /// Sink errors do.
    pub async fn run<T, F, Fut, E, S>(
        &mut self,
        items: &[T],
        mut op: F,
        sink: &mut S,
    ) -> Result<RunSummary, SequencerError>
    where
        T: BatchItem,
        F: FnMut(usize, T) -> Fut,
        Fut: Future<Output = Result<ItemSuccess, E>>,
        E: Display,
        S: OutcomeSink + ?Sized,
    {
        if items.is_empty() {
            self.state = RunState::Aborted;
            tracing::warn!(operation = self.operation, network = %self.network, "Nothing to process");
            return Err(SequencerError::EmptyBatch);
        }

        let total = items.len();
        let mut summary = RunSummary::default();

        for (index, item) in items.iter().enumerate() {
            self.state = RunState::Running { index };
            let label = item.label(index);
            let delay = self.policy.delay_for(index);

            tracing::info!(
                operation = self.operation,
                item = index + 1,
                total = total,
                subject = %label,
                network = %self.network,
                delay_ms = delay.as_millis() as u64,
                "Processing item"
            );
            self.sleeper.sleep(delay).await;

            let started = Instant::now();
            let (subject, outcome) = match op(index, item.clone()).await {
                Ok(ItemSuccess { subject, value }) => {
                    tracing::info!(
                        operation = self.operation,
                        item = index + 1,
                        subject = %subject,
                        network = %self.network,
                        result = %value,
                        "Item succeeded"
                    );
                    (subject, Outcome::Success(value))
                }
                Err(e) => {
                    tracing::warn!(
                        operation = self.operation,
                        item = index + 1,
                        subject = %label,
                        network = %self.network,
                        error = %e,
                        "Item failed"
                    );
                    (label, Outcome::Failure(e.to_string()))
                }
            };
            metrics::record_item(
                self.operation,
                &self.network,
                outcome.is_success(),
                started.elapsed(),
            );

            if let Err(source) = sink.record(index, &subject, &outcome) {
                self.state = RunState::Aborted;
                tracing::error!(
                    operation = self.operation,
                    item = index + 1,
                    network = %self.network,
                    error = %source,
                    "Failed to record outcome, stopping batch"
                );
                return Err(SequencerError::Storage {
                    index,
                    completed: summary.processed,
                    source,
                });
            }
            summary.add(&outcome);
        }

        self.state = RunState::Completed;
        tracing::info!(
            operation = self.operation,
            network = %self.network,
            processed = summary.processed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch completed"
        );
        Ok(summary)
    }
}
