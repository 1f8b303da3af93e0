//! Configuration for the curve engine

use crate::domain::{Curve, OffsetSqrtCurve, SqrtCurve};
use serde::{Deserialize, Serialize};
use shared_types::{PoolError, SCALE};

/// Curve selection, as read from a config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveConfig {
    /// `C(R) = sqrt(R * k)`
    Sqrt { k: u128 },
    /// `C(R) = (sqrt(b^2 + 4aR) - b) / 2`
    OffsetSqrt { a: u128, b: u128 },
}

impl Default for CurveConfig {
    /// One reserve unit backs one share at `R = SCALE`.
    fn default() -> Self {
        CurveConfig::Sqrt { k: SCALE }
    }
}

impl CurveConfig {
    /// Validate parameters and build the curve.
    pub fn build(&self) -> Result<Curve, PoolError> {
        match *self {
            CurveConfig::Sqrt { k } => SqrtCurve::new(k).map(Curve::Sqrt),
            CurveConfig::OffsetSqrt { a, b } => OffsetSqrtCurve::new(a, b).map(Curve::OffsetSqrt),
        }
    }
}
