//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! wallet-batch.toml (optional)
//!     → loader.rs (read & deserialize, defaults for missing sections)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → network registry, ledger store, oracle, sequencer delays
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a run never re-reads it
//! - All fields have defaults so the tool runs without a config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    load_config, load_or_default, resolve_config_path, ConfigError, DEFAULT_CONFIG_FILE,
};
pub use schema::{
    AppConfig, DelayConfig, FilesConfig, GasOracleConfig, LogFormat, NetworkConfig,
    ObservabilityConfig, RpcConfig,
};
