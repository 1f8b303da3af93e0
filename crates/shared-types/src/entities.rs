//! # Core Domain Entities
//!
//! Defines the identities and units shared by every pool component.
//!
//! ## Type Decisions
//!
//! - `Amount = u128` - Reserve and share quantities in base units (18
//!   decimals). Intermediate products are widened to `U256` inside
//!   `fixed_point`, never stored.
//! - `Timestamp = u64` - Seconds from the external monotonic clock.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

// Re-export U256 from primitive-types for use across all components
pub use primitive_types::U256;

/// Reserve or share quantity in base units.
pub type Amount = u128;

/// Clock reading in seconds.
pub type Timestamp = u64;

/// A 20-byte account identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Account(pub [u8; 20]);

impl Account {
    /// The all-zero account. Never holds balances.
    pub const ZERO: Account = Account([0u8; 20]);

    /// Build an account whose last byte is `id`. Handy for fixtures.
    pub fn from_low_u8(id: u8) -> Self {
        let mut bytes = [0u8; 20];
        bytes[19] = id;
        Self(bytes)
    }

    /// Derive a deterministic sub-account from this one.
    ///
    /// The result is the last 20 bytes of `keccak256(domain || self)`, so
    /// different domains never collide with each other or with the owner.
    pub fn derive(&self, domain: &[u8]) -> Account {
        let mut hasher = Keccak256::new();
        hasher.update(domain);
        hasher.update(self.0);
        let digest = hasher.finalize();
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Account(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for Account {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// State-mutating operations, as seen by the access policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Deposit,
    Withdraw,
    ClosePlan,
    ConfigurePlans,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdraw",
            Operation::ClosePlan => "close_plan",
            Operation::ConfigurePlans => "configure_plans",
        };
        f.write_str(name)
    }
}
