//! Ledger store.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::accounts::Account;
use crate::config::FilesConfig;
use crate::ledger::report::{BalanceRecord, ReportHandle, ReportKind};
use crate::network::Network;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("file has no usable lines: {}", path.display())]
    EmptyFile { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The value would not fit on a single line.
    #[error("refusing to write multi-line value to {}", path.display())]
    InvalidLine { path: PathBuf },

    /// The address write failed and the key line could not be rolled back.
    #[error(
        "{} and {} are no longer line-aligned: {source}",
        key_log.display(),
        address_log.display()
    )]
    Misaligned {
        key_log: PathBuf,
        address_log: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LedgerError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Append one complete line to `path`, creating the file if needed.
pub(crate) fn append_line(path: &Path, line: &str) -> Result<(), LedgerError> {
    if line.contains(['\n', '\r']) {
        return Err(LedgerError::InvalidLine {
            path: path.to_path_buf(),
        });
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LedgerError::io(path, e))?;

    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');

    file.write_all(buf.as_bytes())
        .and_then(|_| file.sync_data())
        .map_err(|e| LedgerError::io(path, e))
}

/// Trimmed, non-empty lines of `path`, in file order.
pub fn read_lines(path: &Path) -> Result<Vec<String>, LedgerError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LedgerError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LedgerError::io(path, e),
    })?;

    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return Err(LedgerError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(lines)
}

/// `# run <unix-seconds> <network>`; separates runs in an append-only report.
fn run_header(network: &Network) -> String {
    let started = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{} {} {}", RUN_HEADER_PREFIX, started, network.name)
}

/// Leading token of a run header line.
pub const RUN_HEADER_PREFIX: &str = "# run";

/// Credential logs and report files rooted at one data directory.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    data_dir: PathBuf,
    files: FilesConfig,
}

impl LedgerStore {
    pub fn new(files: &FilesConfig) -> Self {
        Self {
            data_dir: files.data_dir.clone(),
            files: files.clone(),
        }
    }

    pub fn address_log_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.address_file)
    }

    pub fn key_log_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.key_file)
    }

    pub fn funding_key_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.funding_key_file)
    }

    /// Append the account's key and address, one line each.
    ///
    /// The key goes first. If the address write fails the key log is cut back
    /// to its previous length so both logs stay line-aligned.
    pub fn append_credential(&self, account: &Account) -> Result<(), LedgerError> {
        let key_log = self.key_log_path();
        let address_log = self.address_log_path();

        let key_len = match fs::metadata(&key_log) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => return Err(LedgerError::io(&key_log, e)),
        };

        append_line(&key_log, &account.private_key)?;
        if let Err(err) = append_line(&address_log, &account.address.to_string()) {
            let rollback = OpenOptions::new()
                .write(true)
                .open(&key_log)
                .and_then(|file| file.set_len(key_len).and_then(|_| file.sync_data()));

            if let Err(source) = rollback {
                tracing::error!(
                    key_log = %key_log.display(),
                    address_log = %address_log.display(),
                    error = %source,
                    "Failed to roll back key log"
                );
                return Err(LedgerError::Misaligned {
                    key_log,
                    address_log,
                    source,
                });
            }
            tracing::warn!(address_log = %address_log.display(), error = %err, "Address write failed, key line rolled back");
            return Err(err);
        }
        Ok(())
    }

    pub fn load_address_list(&self, path: &Path) -> Result<Vec<String>, LedgerError> {
        read_lines(path)
    }

    pub fn load_key_list(&self, path: &Path) -> Result<Vec<String>, LedgerError> {
        read_lines(path)
    }

    /// First non-empty line of the funding key file.
    pub fn load_funding_key(&self) -> Result<String, LedgerError> {
        let mut lines = read_lines(&self.funding_key_path())?;
        Ok(lines.swap_remove(0))
    }

    /// Truncate (or create) the balance report for `network`.
    pub fn begin_balance_report(&self, network: &Network) -> Result<ReportHandle, LedgerError> {
        self.begin_report(ReportKind::Balance, &self.files.balance_report_prefix, network)
    }

    /// Open the transfer report for `network`, appending a header for this run.
    ///
    /// Earlier runs are kept: the report is the only record of submitted hashes.
    pub fn begin_transfer_report(&self, network: &Network) -> Result<ReportHandle, LedgerError> {
        self.begin_report(ReportKind::Transfer, &self.files.transfer_report_prefix, network)
    }

    pub fn append_balance_record(
        &self,
        handle: &ReportHandle,
        record: &BalanceRecord,
    ) -> Result<(), LedgerError> {
        handle.append_balance(record)
    }

    fn begin_report(
        &self,
        kind: ReportKind,
        prefix: &str,
        network: &Network,
    ) -> Result<ReportHandle, LedgerError> {
        let path = self
            .data_dir
            .join(format!("{}{}.txt", prefix, network.report_slug()));

        match kind {
            ReportKind::Balance => {
                fs::write(&path, b"").map_err(|e| LedgerError::io(&path, e))?;
                tracing::debug!(path = %path.display(), network = %network.name, "Report reset");
            }
            ReportKind::Transfer => {
                append_line(&path, &run_header(network))?;
                tracing::debug!(path = %path.display(), network = %network.name, "Report run started");
            }
        }
        Ok(ReportHandle::new(path, network.name.clone()))
    }
}
