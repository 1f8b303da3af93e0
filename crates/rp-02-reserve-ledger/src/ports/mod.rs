//! Ports layer for the reserve ledger.

pub mod inbound;
pub mod outbound;

pub use inbound::ReserveLedgerApi;
pub use outbound::{AccessPolicy, ReserveToken, ShareToken, YieldReserve};
