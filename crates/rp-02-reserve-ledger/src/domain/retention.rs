//! Exit split between the withdrawer and the pool.
//!
//! The pool portion is `ceil(total * withdraw_fee)` and the withdrawer
//! receives the remainder, so rounding always lands on the pool side.
//! Where that portion ends up is decided by [`RetentionPolicy`].

use super::state::ExitQuote;
use serde::{Deserialize, Serialize};
use shared_types::{Account, Amount, PoolError, Rate, Rounding};

/// What happens to the pool-retained portion of an exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetentionPolicy {
    #[default]
    /// Stays in the reserve, raising the per-share price for remaining
    /// holders. An exit that burns the whole supply has no remaining
    /// holder, so nothing is retained.
    RetainInPool,
    /// Paid out to a fee beneficiary.
    Collect { beneficiary: Account },
}

impl RetentionPolicy {
    /// Split a curve total.
    ///
    /// `full_exit` is true when the exit burns the entire share supply.
    pub fn split(&self, total: Amount, fee: Rate, full_exit: bool) -> Result<ExitQuote, PoolError> {
        let pool = match self {
            RetentionPolicy::RetainInPool if full_exit => 0,
            _ => fee.apply(total, Rounding::Up)?,
        };
        let user = total
            .checked_sub(pool)
            .ok_or(PoolError::ArithmeticOverflow("exit split: fee above 100%"))?;
        Ok(ExitQuote { total, user, pool })
    }

    /// Split for an exit that burns the entire supply.
    ///
    /// `redeemed` is the curve value of the redeemed shares; the rest of
    /// `reserve` was forfeited. With no holder left, nothing may stay
    /// behind: collected residue goes to the beneficiary, retained residue
    /// has nobody to accrue to and is released with the exit.
    pub fn split_final(
        &self,
        reserve: Amount,
        redeemed: Amount,
        fee: Rate,
    ) -> Result<ExitQuote, PoolError> {
        let residue = reserve
            .checked_sub(redeemed)
            .ok_or(PoolError::InsufficientReserve {
                required: redeemed,
                available: reserve,
            })?;
        let quote = self.split(redeemed, fee, true)?;
        Ok(match self {
            RetentionPolicy::RetainInPool => ExitQuote {
                total: reserve,
                user: reserve,
                pool: 0,
            },
            RetentionPolicy::Collect { .. } => ExitQuote {
                total: reserve,
                user: quote.user,
                pool: quote.pool + residue,
            },
        })
    }

    /// Reserve leaving custody for a quote: the user portion, plus the
    /// pool portion when it is collected.
    pub fn outflow(&self, quote: &ExitQuote) -> Amount {
        match self {
            RetentionPolicy::RetainInPool => quote.user,
            RetentionPolicy::Collect { .. } => quote.total,
        }
    }

    pub fn beneficiary(&self) -> Option<Account> {
        match self {
            RetentionPolicy::RetainInPool => None,
            RetentionPolicy::Collect { beneficiary } => Some(*beneficiary),
        }
    }
}
