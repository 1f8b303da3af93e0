//! Adapters for the reserve ledger's outbound ports.

pub mod access;
pub mod memory;

pub use access::{OpenAccess, Whitelist};
pub use memory::{InMemoryReserveToken, InMemoryShareToken, InMemoryYieldReserve};
