//! Outbound (Driven) ports for the reserve ledger.
//!
//! The ledger owns the totals; token bookkeeping, yield generation and
//! access policy live behind these traits.

use shared_types::{Account, Amount, Operation, PoolError};

/// Fungible share token. Only the ledger mints and burns.
pub trait ShareToken: Send + Sync {
    fn mint(&self, account: &Account, amount: Amount) -> Result<(), PoolError>;

    /// Fails with `InsufficientShares` if `account` holds less than `amount`.
    fn burn(&self, account: &Account, amount: Amount) -> Result<(), PoolError>;

    fn balance_of(&self, account: &Account) -> Amount;

    fn total_supply(&self) -> Amount;
}

/// Fungible reserve token, seen from the pool's custody account.
pub trait ReserveToken: Send + Sync {
    /// Moves `amount` from `from` into custody.
    ///
    /// Fails with `InsufficientReserve` if `from` cannot cover it.
    fn transfer_in(&self, from: &Account, amount: Amount) -> Result<(), PoolError>;

    /// Moves `amount` from custody to `to`.
    fn transfer_out(&self, to: &Account, amount: Amount) -> Result<(), PoolError>;

    fn balance_of(&self, account: &Account) -> Amount;
}

/// Opaque interest-bearing reserve fed from custody.
pub trait YieldReserve: Send + Sync {
    /// Moves `amount` from custody into the reserve.
    fn invest(&self, amount: Amount) -> Result<(), PoolError>;

    /// Returns up to `amount` to custody and reports what actually arrived.
    fn divest(&self, amount: Amount) -> Result<Amount, PoolError>;

    /// Current value of everything invested, including accrual.
    fn current_value(&self) -> Result<Amount, PoolError>;
}

/// Access gate consulted before every state-mutating call.
pub trait AccessPolicy: Send + Sync {
    fn is_allowed(&self, account: &Account, operation: Operation) -> bool;

    /// `Ok(())` or `Unauthorized`.
    fn authorize(&self, account: &Account, operation: Operation) -> Result<(), PoolError> {
        if self.is_allowed(account, operation) {
            Ok(())
        } else {
            Err(PoolError::Unauthorized {
                account: *account,
                operation,
            })
        }
    }
}
