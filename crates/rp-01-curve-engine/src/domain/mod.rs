//! Curve definitions.

pub mod curve;

pub use curve::{BondingCurve, Curve, OffsetSqrtCurve, SqrtCurve};
