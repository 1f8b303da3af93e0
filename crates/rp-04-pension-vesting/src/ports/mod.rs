//! Ports layer for pension plans.

pub mod inbound;
pub mod outbound;

pub use inbound::PensionVestingApi;
pub use outbound::{SystemTimeSource, TimeSource};
