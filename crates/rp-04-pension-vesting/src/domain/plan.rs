//! Per-account plan records.

use serde::{Deserialize, Serialize};
use shared_types::{Account, Amount, Timestamp};

/// Domain tag for plan custody accounts.
const PLAN_DOMAIN: &[u8] = b"pension-plan";

/// Custody account holding `owner`'s plan shares.
///
/// Plan shares live under this derived account so the owner cannot move
/// them through the plain gateway and bypass the lock.
pub fn plan_account(owner: &Account) -> Account {
    owner.derive(PLAN_DOMAIN)
}

/// A plan slot. `created_at == 0` marks an empty slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionPlan {
    pub created_at: Timestamp,
    /// Shares released so far during the withdraw phase.
    pub shares_withdrawn: Amount,
}

impl PensionPlan {
    pub const EMPTY: PensionPlan = PensionPlan {
        created_at: 0,
        shares_withdrawn: 0,
    };

    pub fn is_active(&self) -> bool {
        self.created_at != 0
    }
}

/// Where a plan sits in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanPhase {
    Empty,
    /// Lock-up running; only full closure with penalty is possible.
    Deposit,
    /// Matured; partial withdrawals up to the vested allowance.
    Withdraw,
}
