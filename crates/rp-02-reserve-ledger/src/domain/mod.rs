//! Domain layer for the reserve ledger.

pub mod invariants;
pub mod retention;
pub mod state;

pub use retention::RetentionPolicy;
pub use state::{DepositReceipt, ExitQuote, ReserveState, WithdrawReceipt};
