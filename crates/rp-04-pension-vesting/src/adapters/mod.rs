//! Adapters for pension plan ports.

pub mod clock;

pub use clock::ManualClock;
