//! Network catalog.
//!
//! The registry is built once from configuration and never mutated. Menu
//! selections are 1-based; everything internal is 0-based.

pub mod registry;

pub use registry::{Network, NetworkRegistry, RegistryError};
