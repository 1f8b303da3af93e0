//! Reserve state and receipts.

use serde::{Deserialize, Serialize};
use shared_types::{Amount, PoolError};

/// The ledger's authoritative totals.
///
/// `total_reserve_balance` includes the externally invested portion;
/// liquid custody is `total_reserve_balance - invested_balance`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveState {
    pub total_reserve_balance: Amount,
    pub total_share_supply: Amount,
    pub invested_balance: Amount,
}

impl ReserveState {
    /// Reserve held directly in custody.
    pub fn liquid(&self) -> Amount {
        self.total_reserve_balance.saturating_sub(self.invested_balance)
    }

    pub fn is_empty(&self) -> bool {
        self.total_share_supply == 0 && self.total_reserve_balance == 0
    }

    /// Folds a fresh yield-reserve valuation into the totals.
    ///
    /// Losses are folded in the same way as gains.
    pub fn fold_yield(&mut self, current_value: Amount) -> Result<(), PoolError> {
        // No holder to credit; the change is picked up by the first fold
        // after the pool is re-entered.
        if self.total_share_supply == 0 {
            return Ok(());
        }
        if current_value >= self.invested_balance {
            let gain = current_value - self.invested_balance;
            self.total_reserve_balance = self
                .total_reserve_balance
                .checked_add(gain)
                .ok_or(PoolError::ArithmeticOverflow("fold_yield"))?;
        } else {
            let loss = self.invested_balance - current_value;
            self.total_reserve_balance = self.total_reserve_balance.saturating_sub(loss);
        }
        self.invested_balance = current_value;
        Ok(())
    }

    /// Totals after a deposit of `reserve` minting `shares`, of which
    /// `invested` went to the yield reserve.
    pub fn after_deposit(
        &self,
        reserve: Amount,
        shares: Amount,
        invested: Amount,
    ) -> Result<ReserveState, PoolError> {
        Ok(ReserveState {
            total_reserve_balance: self
                .total_reserve_balance
                .checked_add(reserve)
                .ok_or(PoolError::ArithmeticOverflow("deposit: reserve balance"))?,
            total_share_supply: self
                .total_share_supply
                .checked_add(shares)
                .ok_or(PoolError::ArithmeticOverflow("deposit: share supply"))?,
            invested_balance: self
                .invested_balance
                .checked_add(invested)
                .ok_or(PoolError::ArithmeticOverflow("deposit: invested balance"))?,
        })
    }

    /// Totals after burning `shares`, paying `outflow` out of the pool and
    /// divesting `divested` from the yield reserve to cover it.
    pub fn after_exit(
        &self,
        shares: Amount,
        outflow: Amount,
        divested: Amount,
    ) -> Result<ReserveState, PoolError> {
        Ok(ReserveState {
            total_reserve_balance: self.total_reserve_balance.checked_sub(outflow).ok_or(
                PoolError::InsufficientReserve {
                    required: outflow,
                    available: self.total_reserve_balance,
                },
            )?,
            total_share_supply: self.total_share_supply.checked_sub(shares).ok_or(
                PoolError::InsufficientShares {
                    required: shares,
                    available: self.total_share_supply,
                },
            )?,
            invested_balance: self.invested_balance.saturating_sub(divested),
        })
    }
}

/// Quote for burning shares: the curve total and its split.
///
/// `user + pool == total` always.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitQuote {
    pub total: Amount,
    pub user: Amount,
    pub pool: Amount,
}

/// Result of a committed deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub reserve_amount: Amount,
    pub shares_minted: Amount,
    pub state_after: ReserveState,
}

/// Result of a committed withdrawal or redemption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawReceipt {
    /// Shares burned in total (redeemed plus forfeited).
    pub shares_burned: Amount,
    /// Shares burned without any reserve paid for them.
    pub shares_forfeited: Amount,
    pub quote: ExitQuote,
    pub state_after: ReserveState,
}
