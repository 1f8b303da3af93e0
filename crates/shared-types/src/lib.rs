//! # Shared Types Crate
//!
//! This crate contains the account, amount and fixed-point types and the
//! `PoolError` taxonomy used by every component of the pool.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-component types are defined here.
//! - **One Rounding Chokepoint**: Every scaled multiplication goes through
//!   [`fixed_point::mul_div`] with an explicit [`Rounding`] direction.
//! - **No Silent Wrapping**: Overflow surfaces as
//!   [`PoolError::ArithmeticOverflow`].

pub mod entities;
pub mod errors;
pub mod fixed_point;

pub use entities::*;
pub use errors::*;
pub use fixed_point::{mul_div, Rate, Rounding, SCALE};
