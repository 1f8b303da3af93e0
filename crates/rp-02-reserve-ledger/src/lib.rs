//! # RP-02: Reserve Ledger
//!
//! Owns the authoritative reserve and share totals. Every deposit and exit
//! is priced by the curve engine, executed against the share token, the
//! reserve token and the yield reserve, and committed only when all of
//! those effects succeed.
//!
//! ## Architecture
//!
//! - **Domain**: `ReserveState`, `ExitQuote`, receipts, `RetentionPolicy`, invariant checks
//! - **Ports**: `ReserveLedgerApi` (inbound); `ShareToken`, `ReserveToken`,
//!   `YieldReserve`, `AccessPolicy` (outbound)
//! - **Adapters**: in-memory tokens and yield reserve, `OpenAccess`, `Whitelist`
//! - **Service**: `ReserveLedger`, one exclusive section per mutation
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Share conservation | `total_share_supply` equals the share token's supply |
//! | Custody | Custody balance covers `total_reserve_balance - invested_balance` |
//! | Split | `user + pool == total` for every exit |
//! | Atomicity | A failed operation leaves totals, shares and custody unchanged |
//! | Empty pool | Burning the whole supply under `RetainInPool` pays out the whole reserve |

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::LedgerConfig;
pub use domain::{DepositReceipt, ExitQuote, ReserveState, RetentionPolicy, WithdrawReceipt};
pub use ports::{AccessPolicy, ReserveLedgerApi, ReserveToken, ShareToken, YieldReserve};
pub use service::ReserveLedger;
