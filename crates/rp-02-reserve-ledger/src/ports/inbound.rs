//! Inbound (Driving) port: the ledger API used by the gateway and the
//! pension ledger.

use crate::domain::{DepositReceipt, ExitQuote, ReserveState, WithdrawReceipt};
use shared_types::{Account, Amount, PoolError};

/// Reserve ledger operations.
///
/// Every mutating call is atomic: it either commits fully or fails with no
/// observable change to shares, reserve totals or custody.
pub trait ReserveLedgerApi: Send + Sync {
    /// Takes `amount` of reserve from `payer` and mints shares to
    /// `recipient`. Fails with `SlippageExceeded` below `min_shares_out`.
    fn deposit(
        &self,
        payer: Account,
        recipient: Account,
        amount: Amount,
        min_shares_out: Amount,
    ) -> Result<DepositReceipt, PoolError>;

    /// Burns `shares` from `holder` and pays the user portion to
    /// `recipient`. Fails with `SlippageExceeded` below `min_reserve_out`.
    fn withdraw(
        &self,
        holder: Account,
        recipient: Account,
        shares: Amount,
        min_reserve_out: Amount,
    ) -> Result<WithdrawReceipt, PoolError>;

    /// Burns `redeem + forfeit` shares from `holder` but pays only the exit
    /// value of `redeem`. The forfeited value stays in the reserve.
    fn redeem_and_forfeit(
        &self,
        holder: Account,
        recipient: Account,
        redeem: Amount,
        forfeit: Amount,
        min_reserve_out: Amount,
    ) -> Result<WithdrawReceipt, PoolError>;

    /// Shares to burn so that the exit total is at least `reserve_amount`.
    fn calculate_pool_exit(&self, reserve_amount: Amount) -> Result<Amount, PoolError>;

    /// Exit total for burning `shares`, split into user and pool portions.
    fn calculate_pool_exit_inverse(&self, shares: Amount) -> Result<ExitQuote, PoolError>;

    /// Re-reads the yield reserve and folds its value into the totals.
    ///
    /// Returns the state before and after.
    fn accrue_yield(&self) -> Result<(ReserveState, ReserveState), PoolError>;

    fn share_balance(&self, account: &Account) -> Amount;

    /// Consistent snapshot of the totals.
    fn state(&self) -> ReserveState;
}
