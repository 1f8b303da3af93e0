//! # RP-04: Pension Vesting
//!
//! Locked, penalty-graded pension plans on top of the reserve ledger.
//!
//! ## Plan Lifecycle
//!
//! ```text
//! Empty ──deposit──→ Deposit phase ──t ≥ D──→ Withdraw phase
//!   ↑                     │                        │
//!   └──────close_plan─────┴───────close_plan───────┘
//! ```
//!
//! - **Deposit phase** (`t < D`): penalty falls linearly from `max_penalty`
//!   to `min_penalty`; no partial withdrawals.
//! - **Withdraw phase** (`t ≥ D`): the withdraw allowance ramps from
//!   `initial_withdraw_allowance` to the whole plan over `W` seconds.
//! - **Closure**: the refundable shares are redeemed, the rest are burned
//!   without payout and their value stays in the pool.
//!
//! Plan shares are held by a derived custody account (`plan_account`), so
//! they can only leave through this ledger.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::ManualClock;
pub use config::PensionConfig;
pub use domain::{plan_account, PensionPlan, PlanPhase, PlanSettings};
pub use ports::{PensionVestingApi, SystemTimeSource, TimeSource};
pub use service::PensionVestingLedger;
