//! In-memory collaborators.
//!
//! Used by tests and by single-process embeddings. Each adapter can be told
//! to fail so that the ledger's compensation paths can be exercised.

use crate::ports::{ReserveToken, ShareToken, YieldReserve};
use parking_lot::RwLock;
use shared_types::{Account, Amount, PoolError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct ShareBook {
    balances: HashMap<Account, Amount>,
    total_supply: Amount,
}

/// In-memory share token.
#[derive(Default)]
pub struct InMemoryShareToken {
    book: RwLock<ShareBook>,
    halted: AtomicBool,
}

impl InMemoryShareToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// While halted, `mint` fails with a collaborator error.
    pub fn set_halted(&self, halted: bool) {
        self.halted.store(halted, Ordering::SeqCst);
    }
}

impl ShareToken for InMemoryShareToken {
    fn mint(&self, account: &Account, amount: Amount) -> Result<(), PoolError> {
        if self.halted.load(Ordering::SeqCst) {
            return Err(PoolError::Collaborator("share token halted".into()));
        }
        let mut book = self.book.write();
        let total_supply = book
            .total_supply
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow("share token supply"))?;
        *book.balances.entry(*account).or_insert(0) += amount;
        book.total_supply = total_supply;
        Ok(())
    }

    fn burn(&self, account: &Account, amount: Amount) -> Result<(), PoolError> {
        let mut book = self.book.write();
        let balance = book.balances.get(account).copied().unwrap_or(0);
        if balance < amount {
            return Err(PoolError::InsufficientShares {
                required: amount,
                available: balance,
            });
        }
        if balance == amount {
            book.balances.remove(account);
        } else {
            book.balances.insert(*account, balance - amount);
        }
        book.total_supply -= amount;
        Ok(())
    }

    fn balance_of(&self, account: &Account) -> Amount {
        self.book.read().balances.get(account).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> Amount {
        self.book.read().total_supply
    }
}

/// In-memory reserve token with a single custody account.
pub struct InMemoryReserveToken {
    custodian: Account,
    balances: RwLock<HashMap<Account, Amount>>,
    frozen: RwLock<HashSet<Account>>,
}

impl InMemoryReserveToken {
    pub fn new(custodian: Account) -> Self {
        Self {
            custodian,
            balances: RwLock::new(HashMap::new()),
            frozen: RwLock::new(HashSet::new()),
        }
    }

    pub fn custodian(&self) -> Account {
        self.custodian
    }

    /// Creates `amount` out of thin air for `account`.
    pub fn mint_to(&self, account: &Account, amount: Amount) {
        let mut balances = self.balances.write();
        let balance = balances.entry(*account).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Transfers touching a frozen account fail.
    pub fn freeze(&self, account: &Account) {
        self.frozen.write().insert(*account);
    }

    pub fn unfreeze(&self, account: &Account) {
        self.frozen.write().remove(account);
    }

    pub fn transfer(&self, from: &Account, to: &Account, amount: Amount) -> Result<(), PoolError> {
        {
            let frozen = self.frozen.read();
            if frozen.contains(from) || frozen.contains(to) {
                return Err(PoolError::Collaborator(format!(
                    "reserve transfer {} -> {} frozen",
                    from, to
                )));
            }
        }
        let mut balances = self.balances.write();
        let available = balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(PoolError::InsufficientReserve {
                required: amount,
                available,
            });
        }
        balances.insert(*from, available - amount);
        let credit = balances.entry(*to).or_insert(0);
        *credit = credit
            .checked_add(amount)
            .ok_or(PoolError::ArithmeticOverflow("reserve token balance"))?;
        Ok(())
    }
}

impl ReserveToken for InMemoryReserveToken {
    fn transfer_in(&self, from: &Account, amount: Amount) -> Result<(), PoolError> {
        self.transfer(from, &self.custodian, amount)
    }

    fn transfer_out(&self, to: &Account, amount: Amount) -> Result<(), PoolError> {
        self.transfer(&self.custodian, to, amount)
    }

    fn balance_of(&self, account: &Account) -> Amount {
        self.balances.read().get(account).copied().unwrap_or(0)
    }
}

/// In-memory yield reserve holding its funds in a vault account of the
/// same reserve token.
pub struct InMemoryYieldReserve {
    token: Arc<InMemoryReserveToken>,
    vault: Account,
    withdraw_cap: RwLock<Option<Amount>>,
}

impl InMemoryYieldReserve {
    pub fn new(token: Arc<InMemoryReserveToken>) -> Self {
        let vault = token.custodian().derive(b"yield-vault");
        Self {
            token,
            vault,
            withdraw_cap: RwLock::new(None),
        }
    }

    pub fn vault(&self) -> Account {
        self.vault
    }

    /// Simulates interest: the vault grows by `amount`.
    pub fn accrue(&self, amount: Amount) {
        self.token.mint_to(&self.vault, amount);
    }

    /// Caps how much a single `divest` returns, simulating illiquidity.
    pub fn set_withdraw_cap(&self, cap: Option<Amount>) {
        *self.withdraw_cap.write() = cap;
    }
}

impl YieldReserve for InMemoryYieldReserve {
    fn invest(&self, amount: Amount) -> Result<(), PoolError> {
        self.token.transfer(&self.token.custodian(), &self.vault, amount)
    }

    fn divest(&self, amount: Amount) -> Result<Amount, PoolError> {
        let mut actual = amount.min(self.token.balance_of(&self.vault));
        if let Some(cap) = *self.withdraw_cap.read() {
            actual = actual.min(cap);
        }
        self.token.transfer(&self.vault, &self.token.custodian(), actual)?;
        Ok(actual)
    }

    fn current_value(&self) -> Result<Amount, PoolError> {
        Ok(self.token.balance_of(&self.vault))
    }
}
