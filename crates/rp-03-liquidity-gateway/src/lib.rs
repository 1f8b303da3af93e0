//! # RP-03: Liquidity Gateway
//!
//! User-facing deposit and withdraw entry points over the reserve ledger.
//!
//! - Slippage guards (`min_shares_out`, `min_reserve_out`) are enforced by the
//!   ledger inside its exclusive section.
//! - Committed operations publish `PoolEvent::Deposit` / `PoolEvent::Withdraw`
//!   on the shared bus and bump the Prometheus counters.
//! - Rejected operations publish nothing and are counted by error kind.

pub mod ports;
pub mod service;

pub use ports::LiquidityGatewayApi;
pub use service::LiquidityGateway;
