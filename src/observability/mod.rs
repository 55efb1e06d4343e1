//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! sequencer, command pipelines, clients produce:
//!     → logging.rs (structured log events, console output)
//!     → metrics.rs (per-item counters and durations)
//!
//! Consumers:
//!     → Operator console (pretty) or log collector (JSON)
//!     → Optional Prometheus scrape endpoint during a run
//! ```
//!
//! # Design Decisions
//! - Every item event carries operation, item number, subject and network
//! - Private keys never appear in events
//! - Metrics are cheap no-ops when no recorder is installed

pub mod logging;
pub mod metrics;
