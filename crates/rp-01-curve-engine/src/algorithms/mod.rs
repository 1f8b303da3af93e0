//! Numeric algorithms for the curve engine.

pub mod isqrt;

pub use isqrt::isqrt;
