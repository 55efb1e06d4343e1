//! File-backed persistence for credentials and per-run reports.
//!
//! # Files
//! ```text
//! address.txt            append-only, one address per line
//! key.txt                append-only, line-aligned with address.txt
//! key-utama.txt          funding key, read-only
//! sisa-saldo-<slug>.txt  balance report, truncated at the start of each run
//! transfer-<slug>.txt    transfer report, append-only, one header line per run
//! ```
//!
//! # Invariants
//! - Credential logs never shrink and earlier lines are never rewritten
//! - A balance report only holds lines from the latest run for its network
//! - A transfer report never loses lines from earlier runs
//! - Every line is written with a single append and synced before returning

pub mod report;
pub mod store;

pub use report::{BalanceRecord, ReportHandle};
pub use store::{LedgerError, LedgerStore, RUN_HEADER_PREFIX};
