//! Inbound (Driving) port: user-facing pool entry points.

use rp_02_reserve_ledger::{DepositReceipt, ExitQuote, WithdrawReceipt};
use shared_types::{Account, Amount, PoolError};

/// Pool entry points for a single acting account.
pub trait LiquidityGatewayApi: Send + Sync {
    /// Deposits `amount` of reserve from `account` and mints shares to it.
    fn deposit(
        &self,
        account: Account,
        amount: Amount,
        min_shares_out: Amount,
    ) -> Result<DepositReceipt, PoolError>;

    /// Burns `shares` from `account` and pays the user portion back to it.
    fn withdraw(
        &self,
        account: Account,
        shares: Amount,
        min_reserve_out: Amount,
    ) -> Result<WithdrawReceipt, PoolError>;

    fn calculate_pool_exit(&self, reserve_amount: Amount) -> Result<Amount, PoolError>;

    fn calculate_pool_exit_inverse(&self, shares: Amount) -> Result<ExitQuote, PoolError>;
}
