//! # Pool Events
//!
//! Defines all event types that flow through the shared bus. Events are
//! published only after the triggering operation has fully applied, so a
//! subscriber never observes an event for a rolled-back mutation.

use serde::{Deserialize, Serialize};
use shared_types::{Account, Amount, Rate, Timestamp};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    // =========================================================================
    // RP-03: LIQUIDITY GATEWAY
    // =========================================================================
    /// Reserve entered the pool and shares were minted.
    Deposit {
        account: Account,
        reserve_amount: Amount,
        shares_minted: Amount,
    },

    /// Shares were burned and reserve released.
    ///
    /// `reserve_user + reserve_pool == reserve_total` always holds.
    Withdraw {
        account: Account,
        shares_burned: Amount,
        reserve_total: Amount,
        reserve_user: Amount,
        reserve_pool: Amount,
    },

    // =========================================================================
    // RP-04: PENSION VESTING
    // =========================================================================
    /// First deposit into an empty plan slot.
    PlanCreated {
        account: Account,
        created_at: Timestamp,
    },

    /// Deposit into a plan (including the creating one).
    PlanDeposit {
        account: Account,
        reserve_amount: Amount,
        shares_minted: Amount,
    },

    /// Vested partial withdrawal from a matured plan.
    PlanWithdraw {
        account: Account,
        shares_burned: Amount,
        reserve_out: Amount,
    },

    /// Plan closed; `shares_forfeited` stayed in the pool.
    PlanClosed {
        account: Account,
        shares_refunded: Amount,
        shares_forfeited: Amount,
        reserve_out: Amount,
    },

    /// Owner replaced the global plan settings.
    PlanSettingsUpdated {
        deposit_period_duration: u64,
        min_penalty: Rate,
        max_penalty: Rate,
        withdraw_period_duration: u64,
        initial_withdraw_allowance: Rate,
    },

    // =========================================================================
    // RP-02: RESERVE LEDGER
    // =========================================================================
    /// Yield reserve value was folded into the reserve balance.
    YieldAccrued {
        previous_value: Amount,
        current_value: Amount,
    },
}

impl PoolEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Deposit { .. } | Self::Withdraw { .. } => EventTopic::Liquidity,
            Self::PlanCreated { .. }
            | Self::PlanDeposit { .. }
            | Self::PlanWithdraw { .. }
            | Self::PlanClosed { .. }
            | Self::PlanSettingsUpdated { .. } => EventTopic::Pension,
            Self::YieldAccrued { .. } => EventTopic::Ledger,
        }
    }

    /// Get the originating component ID (the `rp-0N` number).
    #[must_use]
    pub fn source_component(&self) -> u8 {
        match self.topic() {
            EventTopic::Ledger => 2,
            EventTopic::Liquidity => 3,
            EventTopic::Pension => 4,
            EventTopic::All => 0,
        }
    }

    /// The account the event concerns, if any.
    #[must_use]
    pub fn account(&self) -> Option<Account> {
        match self {
            Self::Deposit { account, .. }
            | Self::Withdraw { account, .. }
            | Self::PlanCreated { account, .. }
            | Self::PlanDeposit { account, .. }
            | Self::PlanWithdraw { account, .. }
            | Self::PlanClosed { account, .. } => Some(*account),
            Self::PlanSettingsUpdated { .. } | Self::YieldAccrued { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Reserve ledger bookkeeping.
    Ledger,
    /// Gateway deposits and withdrawals.
    Liquidity,
    /// Pension plan lifecycle.
    Pension,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Accounts to include. Empty means all accounts; events without an
    /// account never match a non-empty account list.
    pub accounts: Vec<Account>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            accounts: Vec::new(),
        }
    }

    /// Create a filter for events concerning specific accounts.
    #[must_use]
    pub fn for_accounts(accounts: Vec<Account>) -> Self {
        Self {
            topics: Vec::new(),
            accounts,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &PoolEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let account_match = self.accounts.is_empty()
            || event
                .account()
                .is_some_and(|account| self.accounts.contains(&account));

        topic_match && account_match
    }
}
