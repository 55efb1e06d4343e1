//! Gas price oracle client.
//!
//! One HTTP GET per transfer, no caching and no retry. A missing, zero or
//! non-numeric price is a hard failure for the item.

pub mod gas;

pub use gas::{GasOracle, GasPriceSource, OracleError};
