//! Inbound (Driving) port: pension plan operations.

use crate::domain::{PensionPlan, PlanSettings};
use rp_02_reserve_ledger::{DepositReceipt, WithdrawReceipt};
use shared_types::{Account, Amount, PoolError};

/// Pension plan operations for a single acting account.
pub trait PensionVestingApi: Send + Sync {
    /// Replaces the global settings. Owner only.
    fn set_plan_settings(&self, caller: Account, settings: PlanSettings) -> Result<(), PoolError>;

    fn plan_settings(&self) -> PlanSettings;

    /// Deposits into `account`'s plan, creating it if the slot is empty.
    fn deposit(
        &self,
        account: Account,
        amount: Amount,
        min_shares_out: Amount,
    ) -> Result<DepositReceipt, PoolError>;

    /// Releases up to the vested allowance of a matured plan.
    fn withdraw(
        &self,
        account: Account,
        shares: Amount,
        min_reserve_out: Amount,
    ) -> Result<WithdrawReceipt, PoolError>;

    /// Closes the plan: redeems the refundable shares, forfeits the rest,
    /// and empties the slot. Returns the reserve paid out.
    fn close_plan(&self, account: Account, min_reserve_out: Amount) -> Result<Amount, PoolError>;

    /// The plan slot; `PensionPlan::EMPTY` when there is no plan.
    fn plans(&self, account: &Account) -> PensionPlan;

    fn withdraw_limit(&self, account: &Account) -> Result<Amount, PoolError>;

    fn p_refund(&self, account: &Account) -> Result<Amount, PoolError>;

    /// Shares currently held by the plan.
    fn plan_shares(&self, account: &Account) -> Amount;
}
