//! # Error Types
//!
//! The single error taxonomy used across pool components. Every variant
//! aborts the triggering operation with no state change.

use crate::entities::{Account, Amount, Operation};
use thiserror::Error;

/// Errors returned by pool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Zero input, or an input too small to produce any shares/reserve.
    #[error("Invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Account share balance is below what the operation burns.
    #[error("Insufficient shares: required {required}, available {available}")]
    InsufficientShares { required: Amount, available: Amount },

    /// Reserve (custody, yield reserve or caller funds) cannot cover the request.
    #[error("Insufficient reserve: required {required}, available {available}")]
    InsufficientReserve { required: Amount, available: Amount },

    /// Quoted minimum output not met.
    #[error("Slippage exceeded: minimum {minimum}, actual {actual}")]
    SlippageExceeded { minimum: Amount, actual: Amount },

    /// Operation requires an existing pension plan.
    #[error("No active pension plan for {0}")]
    NoActivePlan(Account),

    /// Plan withdrawal above the currently vested allowance.
    #[error("Withdraw limit exceeded: requested {requested}, limit {limit}")]
    WithdrawLimitExceeded { requested: Amount, limit: Amount },

    /// Entry refused: the pool holds reserve without shares or shares
    /// without reserve.
    #[error("Degenerate pool: reserve {reserve}, supply {supply}")]
    DegeneratePool { reserve: Amount, supply: Amount },

    /// Access policy rejected the caller.
    #[error("Unauthorized: {account} may not {operation}")]
    Unauthorized { account: Account, operation: Operation },

    /// Fixed-point computation would exceed the representable range.
    #[error("Arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    /// Owner-supplied settings violate their bounds.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// An external collaborator (token, yield reserve) failed.
    #[error("Collaborator failure: {0}")]
    Collaborator(String),
}

impl PoolError {
    /// Stable snake_case label, used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            PoolError::InvalidAmount(_) => "invalid_amount",
            PoolError::InsufficientShares { .. } => "insufficient_shares",
            PoolError::InsufficientReserve { .. } => "insufficient_reserve",
            PoolError::SlippageExceeded { .. } => "slippage_exceeded",
            PoolError::NoActivePlan(_) => "no_active_plan",
            PoolError::WithdrawLimitExceeded { .. } => "withdraw_limit_exceeded",
            PoolError::DegeneratePool { .. } => "degenerate_pool",
            PoolError::Unauthorized { .. } => "unauthorized",
            PoolError::ArithmeticOverflow(_) => "arithmetic_overflow",
            PoolError::InvalidSettings(_) => "invalid_settings",
            PoolError::Collaborator(_) => "collaborator",
        }
    }
}
