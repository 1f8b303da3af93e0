//! Liquidity gateway service.
//!
//! Forwards to the reserve ledger with the acting account as both payer and
//! recipient. Slippage is checked inside the ledger's exclusive section, so a
//! guard can never pass on a stale quote. Events are published only after the
//! ledger has committed.

use crate::ports::LiquidityGatewayApi;
use pool_telemetry::{record_error, record_totals, DEPOSITS_TOTAL, WITHDRAWALS_TOTAL};
use rp_02_reserve_ledger::{
    DepositReceipt, ExitQuote, ReserveLedgerApi, ReserveState, WithdrawReceipt,
};
use shared_bus::{EventPublisher, PoolEvent};
use shared_types::{Account, Amount, PoolError};
use std::sync::Arc;
use tracing::{info, warn};

const COMPONENT: &str = "rp-03";

pub struct LiquidityGateway<L: ReserveLedgerApi, P: EventPublisher> {
    ledger: Arc<L>,
    publisher: Arc<P>,
}

impl<L: ReserveLedgerApi, P: EventPublisher> LiquidityGateway<L, P> {
    pub fn new(ledger: Arc<L>, publisher: Arc<P>) -> Self {
        Self { ledger, publisher }
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Folds the yield reserve's latest value into the totals and announces
    /// it when it moved.
    pub fn accrue_yield(&self) -> Result<ReserveState, PoolError> {
        let (before, after) = self
            .ledger
            .accrue_yield()
            .map_err(|e| rejected("accrue_yield", e))?;
        if before.invested_balance != after.invested_balance {
            self.publisher.publish(PoolEvent::YieldAccrued {
                previous_value: before.invested_balance,
                current_value: after.invested_balance,
            });
            record_totals(after.total_reserve_balance, after.total_share_supply);
        }
        Ok(after)
    }
}

fn rejected(operation: &'static str, error: PoolError) -> PoolError {
    record_error(COMPONENT, error.kind());
    warn!(operation, error = %error, "[rp-03] Operation rejected");
    error
}

impl<L: ReserveLedgerApi, P: EventPublisher> LiquidityGatewayApi for LiquidityGateway<L, P> {
    fn deposit(
        &self,
        account: Account,
        amount: Amount,
        min_shares_out: Amount,
    ) -> Result<DepositReceipt, PoolError> {
        let receipt = self
            .ledger
            .deposit(account, account, amount, min_shares_out)
            .map_err(|e| rejected("deposit", e))?;

        DEPOSITS_TOTAL.inc();
        record_totals(
            receipt.state_after.total_reserve_balance,
            receipt.state_after.total_share_supply,
        );
        let subscribers = self.publisher.publish(PoolEvent::Deposit {
            account,
            reserve_amount: receipt.reserve_amount,
            shares_minted: receipt.shares_minted,
        });
        info!(
            account = %account,
            amount,
            shares_minted = receipt.shares_minted,
            subscribers,
            "[rp-03] Deposit"
        );
        Ok(receipt)
    }

    fn withdraw(
        &self,
        account: Account,
        shares: Amount,
        min_reserve_out: Amount,
    ) -> Result<WithdrawReceipt, PoolError> {
        let receipt = self
            .ledger
            .withdraw(account, account, shares, min_reserve_out)
            .map_err(|e| rejected("withdraw", e))?;

        WITHDRAWALS_TOTAL.inc();
        record_totals(
            receipt.state_after.total_reserve_balance,
            receipt.state_after.total_share_supply,
        );
        let subscribers = self.publisher.publish(PoolEvent::Withdraw {
            account,
            shares_burned: receipt.shares_burned,
            reserve_total: receipt.quote.total,
            reserve_user: receipt.quote.user,
            reserve_pool: receipt.quote.pool,
        });
        info!(
            account = %account,
            shares,
            reserve_out = receipt.quote.user,
            reserve_retained = receipt.quote.pool,
            subscribers,
            "[rp-03] Withdraw"
        );
        Ok(receipt)
    }

    fn calculate_pool_exit(&self, reserve_amount: Amount) -> Result<Amount, PoolError> {
        self.ledger.calculate_pool_exit(reserve_amount)
    }

    fn calculate_pool_exit_inverse(&self, shares: Amount) -> Result<ExitQuote, PoolError> {
        self.ledger.calculate_pool_exit_inverse(shares)
    }
}
