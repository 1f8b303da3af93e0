//! Integer square root over `U256`.
//!
//! Newton's method started from a power of two that over-estimates the
//! root, so the sequence decreases monotonically and stops at the floor.
//! Each step at least halves the error once above the root, so any 256-bit
//! input converges in well under 140 iterations.

use primitive_types::U256;

/// Floor of the square root of `n`.
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    if n == U256::one() {
        return U256::one();
    }

    // sqrt(n) < 2^((bits - 1) / 2 + 1)
    let shift = (n.bits() - 1) / 2 + 1;
    let mut x = U256::one() << shift;

    loop {
        let next_x = (x + n / x) >> 1;
        if next_x >= x {
            return x;
        }
        x = next_x;
    }
}
