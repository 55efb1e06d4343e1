//! Rate-limited operation sequencer.
//!
//! # Data Flow
//! ```text
//! items (ordered)
//!     → delay.rs (wait delay(i) through an injectable Sleeper)
//!     → op(i, item) (transfer or balance query)
//!     → outcome.rs (Success / Failure, never propagated)
//!     → OutcomeSink (durable record) before item i+1 starts
//! ```
//!
//! # Invariants
//! - One item at a time, in list order, every item attempted
//! - Item i is recorded before item i+1 begins its delay
//! - An empty list aborts before anything runs
//! - A failed record stops the run; the sink then holds a strict prefix

pub mod delay;
pub mod outcome;
pub mod runner;

pub use delay::{DelayPolicy, NoDelay, Sleeper, TokioSleeper};
pub use outcome::{BatchItem, ItemSuccess, Outcome, OutcomeSink, RunState, RunSummary};
pub use runner::{Sequencer, SequencerError};
