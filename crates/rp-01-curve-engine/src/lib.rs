//! # RP-01: Curve Engine
//!
//! Pure pricing between reserve amounts and share amounts through a
//! monotonic bonding curve. Holds no state of its own; the reserve ledger
//! passes in its totals on every call.
//!
//! ## Architecture
//!
//! - **Algorithms**: `isqrt` over `U256`
//! - **Domain**: `BondingCurve` trait, `SqrtCurve`, `OffsetSqrtCurve`
//! - **Engine**: curve-coordinate `enter` / `exit` / `exit_inverse` / `shares_for_exit`
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Monotonic | `C` strictly increasing, `C(0) = 0` |
//! | Pool-favoring | Every conversion rounds toward the pool |
//! | Full exit | `exit(R, S, S) == R` and `shares_for_exit(R, S, R) == S` |
//! | No yield capture | `enter` prices at the curve-implied reserve, not the raw one |

pub mod algorithms;
pub mod config;
pub mod domain;
pub mod engine;

pub use algorithms::isqrt;
pub use config::CurveConfig;
pub use domain::{BondingCurve, Curve, OffsetSqrtCurve, SqrtCurve};
pub use engine::CurveEngine;
