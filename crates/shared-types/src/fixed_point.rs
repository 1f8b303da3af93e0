//! # Fixed-Point Arithmetic
//!
//! All fractional math in the pool runs through [`mul_div`]. Products are
//! widened to `U256` so `a * b` never overflows before the division, and the
//! quotient is narrowed back to `u128` with a checked conversion.
//!
//! | Direction | Used for |
//! |-----------|----------|
//! | `Rounding::Down` | anything paid out (shares minted, reserve released) |
//! | `Rounding::Up` | anything retained or charged (fees, reserve required) |

use crate::entities::{Amount, U256};
use crate::errors::PoolError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point scale: `1e18` represents 100%.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Rounding direction for a single division.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    Down,
    Up,
}

/// Computes `a * b / d` with the requested rounding.
///
/// Fails with `ArithmeticOverflow` when `d == 0` or the quotient does not
/// fit in `u128`.
pub fn mul_div(a: Amount, b: Amount, d: Amount, rounding: Rounding) -> Result<Amount, PoolError> {
    if d == 0 {
        return Err(PoolError::ArithmeticOverflow("mul_div: zero divisor"));
    }
    let product = U256::from(a) * U256::from(b);
    let divisor = U256::from(d);
    let (mut quotient, remainder) = product.div_mod(divisor);
    if rounding == Rounding::Up && !remainder.is_zero() {
        quotient += U256::one();
    }
    narrow(quotient, "mul_div")
}

/// Narrows a `U256` back to `Amount`.
pub fn narrow(value: U256, context: &'static str) -> Result<Amount, PoolError> {
    if value > U256::from(u128::MAX) {
        return Err(PoolError::ArithmeticOverflow(context));
    }
    Ok(value.as_u128())
}

/// A fraction of [`SCALE`], e.g. a fee or penalty rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u128);

impl Rate {
    pub const ZERO: Rate = Rate(0);
    pub const ONE: Rate = Rate(SCALE);

    /// Wraps a raw scaled value. Values above `ONE` are representable but
    /// rejected by `checked`.
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole-percent constructor. `from_percent(5)` is 5%.
    pub const fn from_percent(percent: u128) -> Self {
        Self(percent * (SCALE / 100))
    }

    /// Basis-point constructor. `from_bps(250)` is 2.5%.
    pub const fn from_bps(bps: u128) -> Self {
        Self(bps * (SCALE / 10_000))
    }

    /// Returns the rate if it lies within `[0, ONE]`.
    pub fn checked(raw: u128) -> Option<Self> {
        (raw <= SCALE).then_some(Self(raw))
    }

    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_within_unit(&self) -> bool {
        self.0 <= SCALE
    }

    /// `ONE - self`, saturating at zero.
    pub fn complement(&self) -> Rate {
        Rate(SCALE.saturating_sub(self.0))
    }

    /// Applies the rate to an amount.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount, PoolError> {
        mul_div(amount, self.0, SCALE, rounding)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / (SCALE / 100);
        let frac = (self.0 % (SCALE / 100)) / (SCALE / 1_000_000);
        write!(f, "{}.{:04}%", whole, frac)
    }
}
