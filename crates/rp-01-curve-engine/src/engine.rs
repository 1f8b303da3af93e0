//! Curve-coordinate pricing.
//!
//! The ledger's raw reserve `R` drifts away from the curve as yield accrues,
//! so pricing never evaluates the curve at `R` directly. Instead it uses the
//! curve-implied reserve `R^ = floor(C^-1(S))`, prices the mutation on the
//! curve, and rescales reserve amounts by `R / R^`:
//!
//! ```text
//!   raw reserve  ──(× R^/R)──▶  curve reserve  ──C──▶  supply
//!   raw reserve  ◀──(× R/R^)──  curve reserve  ◀─C⁻¹─  supply
//! ```
//!
//! Every division rounds toward the pool: fewer shares out on entry, less
//! reserve out on exit, more shares required for a quoted exit.

use crate::domain::{BondingCurve, Curve};
use shared_types::{mul_div, Amount, PoolError, Rounding};
use tracing::trace;

/// Stateless pricing over a bonding curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveEngine<C: BondingCurve = Curve> {
    curve: C,
}

impl<C: BondingCurve> CurveEngine<C> {
    pub fn new(curve: C) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Curve-implied reserve for a supply, `floor(C^-1(S))`.
    pub fn implied_reserve(&self, supply: Amount) -> Result<Amount, PoolError> {
        self.curve.reserve_at(supply, Rounding::Down)
    }

    /// Shares minted for depositing `reserve_delta` into a pool at
    /// `(reserve_before, supply_before)`.
    ///
    /// Never exceeds `C(R^ + dR^) - C(R^)`, so a depositor cannot capture
    /// yield that accrued before the deposit. Fails with `DegeneratePool`
    /// when exactly one of `reserve_before` and `supply_before` is zero.
    pub fn enter(
        &self,
        reserve_before: Amount,
        supply_before: Amount,
        reserve_delta: Amount,
    ) -> Result<Amount, PoolError> {
        if reserve_delta == 0 {
            return Ok(0);
        }
        // Reserve without shares would go to the first entrant, shares
        // without reserve would absorb it.
        if (supply_before == 0) != (reserve_before == 0) {
            return Err(PoolError::DegeneratePool {
                reserve: reserve_before,
                supply: supply_before,
            });
        }
        if supply_before == 0 {
            return self.curve.supply_at(reserve_delta);
        }

        let implied = self.implied_reserve(supply_before)?;
        let minted = if implied == 0 {
            // Supply below curve resolution: price proportionally.
            mul_div(reserve_delta, supply_before, reserve_before, Rounding::Down)?
        } else {
            let delta_hat = mul_div(reserve_delta, implied, reserve_before, Rounding::Down)?;
            let target = checked_add(implied, delta_hat, "enter: curve reserve")?;
            self.curve.supply_at(target)?.saturating_sub(supply_before)
        };

        trace!(
            reserve_before,
            supply_before,
            reserve_delta,
            implied,
            minted,
            "[rp-01] enter priced"
        );
        Ok(minted)
    }

    /// Reserve released for burning `shares_burned` out of `supply_before`.
    ///
    /// Burning the whole supply releases the whole reserve.
    pub fn exit(
        &self,
        reserve_before: Amount,
        supply_before: Amount,
        shares_burned: Amount,
    ) -> Result<Amount, PoolError> {
        if shares_burned > supply_before {
            return Err(PoolError::InsufficientShares {
                required: shares_burned,
                available: supply_before,
            });
        }
        if shares_burned == 0 {
            return Ok(0);
        }
        if shares_burned == supply_before {
            return Ok(reserve_before);
        }

        let implied = self.implied_reserve(supply_before)?;
        if implied == 0 {
            return mul_div(reserve_before, shares_burned, supply_before, Rounding::Down);
        }

        let remaining_hat = self
            .curve
            .reserve_at(supply_before - shares_burned, Rounding::Up)?;
        let released_hat = implied.saturating_sub(remaining_hat);
        let released = mul_div(released_hat, reserve_before, implied, Rounding::Down)?;

        trace!(
            reserve_before,
            supply_before,
            shares_burned,
            released,
            "[rp-01] exit priced"
        );
        Ok(released)
    }

    /// Reserve released for burning `shares_burned` from a pool that sits
    /// exactly on the curve (`S = C(R)`).
    pub fn exit_inverse(
        &self,
        reserve_balance: Amount,
        shares_burned: Amount,
    ) -> Result<Amount, PoolError> {
        let supply = self.curve.supply_at(reserve_balance)?;
        if shares_burned > supply {
            return Err(PoolError::InsufficientShares {
                required: shares_burned,
                available: supply,
            });
        }
        let remaining = self.curve.reserve_at(supply - shares_burned, Rounding::Up)?;
        Ok(reserve_balance.saturating_sub(remaining))
    }

    /// Shares that must be burned to release at least `reserve_amount`.
    ///
    /// `shares_for_exit(R, S, R) == S` exactly.
    pub fn shares_for_exit(
        &self,
        reserve_before: Amount,
        supply_before: Amount,
        reserve_amount: Amount,
    ) -> Result<Amount, PoolError> {
        if reserve_amount > reserve_before {
            return Err(PoolError::InsufficientReserve {
                required: reserve_amount,
                available: reserve_before,
            });
        }
        if reserve_amount == reserve_before {
            return Ok(supply_before);
        }
        if reserve_amount == 0 {
            return Ok(0);
        }

        let implied = self.implied_reserve(supply_before)?;
        if implied == 0 {
            return mul_div(supply_before, reserve_amount, reserve_before, Rounding::Up);
        }

        let amount_hat = mul_div(reserve_amount, implied, reserve_before, Rounding::Up)?.min(implied);
        let remaining_supply = self.curve.supply_at(implied - amount_hat)?;
        Ok(supply_before.saturating_sub(remaining_supply))
    }
}

fn checked_add(a: Amount, b: Amount, context: &'static str) -> Result<Amount, PoolError> {
    a.checked_add(b).ok_or(PoolError::ArithmeticOverflow(context))
}
