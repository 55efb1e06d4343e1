//! Keypair generation.
//!
//! Generation is network-independent; the network attached to each account is
//! advisory metadata picked uniformly at random from the registry.

pub mod provider;

pub use provider::{Account, AccountError, AccountProvider};
