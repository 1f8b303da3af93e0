//! Access policies.

use crate::ports::AccessPolicy;
use parking_lot::RwLock;
use shared_types::{Account, Operation};
use std::collections::HashSet;

/// Allows every account.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccess;

impl AccessPolicy for OpenAccess {
    fn is_allowed(&self, _account: &Account, _operation: Operation) -> bool {
        true
    }
}

/// Allows listed accounts only. Disabling the list opens access to all.
pub struct Whitelist {
    allowed: RwLock<HashSet<Account>>,
    enabled: RwLock<bool>,
}

impl Whitelist {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            allowed: RwLock::new(accounts.into_iter().collect()),
            enabled: RwLock::new(true),
        }
    }

    pub fn add(&self, account: Account) {
        self.allowed.write().insert(account);
    }

    pub fn remove(&self, account: &Account) {
        self.allowed.write().remove(account);
    }

    pub fn set_enabled(&self, enabled: bool) {
        *self.enabled.write() = enabled;
    }
}

impl AccessPolicy for Whitelist {
    fn is_allowed(&self, account: &Account, _operation: Operation) -> bool {
        !*self.enabled.read() || self.allowed.read().contains(account)
    }
}
