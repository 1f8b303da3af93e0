//! Reserve ledger service.
//!
//! All mutations run inside one exclusive section: the state mutex is held
//! from the access check until the new totals are committed, with every
//! collaborator effect in between. Effects are journaled; if any step fails
//! the journal is unwound in reverse and the totals are left untouched.

use crate::config::LedgerConfig;
use crate::domain::invariants;
use crate::domain::{DepositReceipt, ExitQuote, ReserveState, WithdrawReceipt};
use crate::ports::{AccessPolicy, ReserveLedgerApi, ReserveToken, ShareToken, YieldReserve};
use parking_lot::Mutex;
use rp_01_curve_engine::CurveEngine;
use shared_types::{Account, Amount, Operation, PoolError, Rounding};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// A collaborator effect and how to undo it.
#[derive(Debug, Clone, Copy)]
enum Undo {
    /// Reserve was taken in from `to`; send it back.
    Refund { to: Account, amount: Amount },
    /// Reserve was paid to `from`; take it back into custody.
    Reclaim { from: Account, amount: Amount },
    /// Shares were minted; burn them.
    Burn { account: Account, amount: Amount },
    /// Shares were burned; mint them again.
    Remint { account: Account, amount: Amount },
    /// Reserve was invested; divest it.
    Divest(Amount),
    /// Reserve was divested; invest it again.
    Reinvest(Amount),
}

/// The reserve ledger.
pub struct ReserveLedger<S, T, Y, A>
where
    S: ShareToken,
    T: ReserveToken,
    Y: YieldReserve,
    A: AccessPolicy,
{
    config: LedgerConfig,
    engine: CurveEngine,
    shares: Arc<S>,
    reserve: Arc<T>,
    yield_reserve: Arc<Y>,
    access: Arc<A>,
    state: Mutex<ReserveState>,
}

impl<S, T, Y, A> ReserveLedger<S, T, Y, A>
where
    S: ShareToken,
    T: ReserveToken,
    Y: YieldReserve,
    A: AccessPolicy,
{
    /// Creates an empty ledger. Fails with `InvalidSettings` on a bad config.
    pub fn new(
        config: LedgerConfig,
        shares: Arc<S>,
        reserve: Arc<T>,
        yield_reserve: Arc<Y>,
        access: Arc<A>,
    ) -> Result<Self, PoolError> {
        config.validate()?;
        let engine = CurveEngine::new(config.curve.build()?);
        info!(
            curve = ?config.curve,
            withdraw_fee = %config.withdraw_fee,
            retention = ?config.retention,
            "[rp-02] Reserve ledger created"
        );
        Ok(Self {
            config,
            engine,
            shares,
            reserve,
            yield_reserve,
            access,
            state: Mutex::new(ReserveState::default()),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn engine(&self) -> &CurveEngine {
        &self.engine
    }

    /// Raw curve inverse at the current reserve, ignoring supply drift.
    pub fn exit_inverse(&self, shares: Amount) -> Result<Amount, PoolError> {
        let reserve = self.state.lock().total_reserve_balance;
        self.engine.exit_inverse(reserve, shares)
    }

    /// Names of violated invariants; empty when the ledger is consistent
    /// with its collaborators.
    pub fn check_invariants(&self) -> Vec<&'static str> {
        let state = self.state.lock();
        let violated = invariants::violations(
            &state,
            self.shares.total_supply(),
            self.reserve.balance_of(&self.config.custodian),
        );
        if !violated.is_empty() {
            warn!(violated = ?violated, state = ?*state, "[rp-02] Invariant violation");
        }
        violated
    }

    fn fold_yield(&self, state: &mut ReserveState) -> Result<(), PoolError> {
        if state.invested_balance == 0 && self.config.invest_ratio.raw() == 0 {
            return Ok(());
        }
        let value = self.yield_reserve.current_value()?;
        state.fold_yield(value)
    }

    fn quote(&self, state: &ReserveState, redeem: Amount, burn: Amount) -> Result<ExitQuote, PoolError> {
        let total = self.engine.exit(
            state.total_reserve_balance,
            state.total_share_supply,
            redeem,
        )?;
        let retention = &self.config.retention;
        if burn == state.total_share_supply {
            // The last shares carry the whole reserve out, forfeited value included.
            return retention.split_final(
                state.total_reserve_balance,
                total,
                self.config.withdraw_fee,
            );
        }
        retention.split(total, self.config.withdraw_fee, false)
    }

    fn unwind(&self, journal: Vec<Undo>) {
        for undo in journal.into_iter().rev() {
            let result = match undo {
                Undo::Refund { to, amount } => self.reserve.transfer_out(&to, amount),
                Undo::Reclaim { from, amount } => self.reserve.transfer_in(&from, amount),
                Undo::Burn { account, amount } => self.shares.burn(&account, amount),
                Undo::Remint { account, amount } => self.shares.mint(&account, amount),
                Undo::Divest(amount) => self.yield_reserve.divest(amount).map(|_| ()),
                Undo::Reinvest(amount) => self.yield_reserve.invest(amount),
            };
            if let Err(e) = result {
                error!(undo = ?undo, error = %e, "[rp-02] Compensation failed");
            }
        }
    }

    fn deposit_effects(
        &self,
        payer: Account,
        recipient: Account,
        amount: Amount,
        minted: Amount,
        invested: Amount,
        journal: &mut Vec<Undo>,
    ) -> Result<(), PoolError> {
        self.reserve.transfer_in(&payer, amount)?;
        journal.push(Undo::Refund { to: payer, amount });

        self.shares.mint(&recipient, minted)?;
        journal.push(Undo::Burn {
            account: recipient,
            amount: minted,
        });

        if invested > 0 {
            self.yield_reserve.invest(invested)?;
            journal.push(Undo::Divest(invested));
        }
        Ok(())
    }

    /// Pulls `shortfall` back from the yield reserve.
    ///
    /// A short return is re-invested and reported as `InsufficientReserve`.
    fn divest_shortfall(&self, shortfall: Amount, journal: &mut Vec<Undo>) -> Result<Amount, PoolError> {
        if shortfall == 0 {
            return Ok(0);
        }
        let actual = self.yield_reserve.divest(shortfall)?;
        if actual < shortfall {
            if actual > 0 {
                if let Err(e) = self.yield_reserve.invest(actual) {
                    error!(amount = actual, error = %e, "[rp-02] Re-invest after short divest failed");
                }
            }
            return Err(PoolError::InsufficientReserve {
                required: shortfall,
                available: actual,
            });
        }
        journal.push(Undo::Reinvest(actual));
        Ok(actual)
    }

    fn exit_effects(
        &self,
        holder: Account,
        recipient: Account,
        burn: Amount,
        quote: &ExitQuote,
        journal: &mut Vec<Undo>,
    ) -> Result<(), PoolError> {
        self.shares.burn(&holder, burn)?;
        journal.push(Undo::Remint {
            account: holder,
            amount: burn,
        });

        if let Some(beneficiary) = self.config.retention.beneficiary() {
            if quote.pool > 0 {
                self.reserve.transfer_out(&beneficiary, quote.pool)?;
                journal.push(Undo::Reclaim {
                    from: beneficiary,
                    amount: quote.pool,
                });
            }
        }

        if quote.user > 0 {
            self.reserve.transfer_out(&recipient, quote.user)?;
            journal.push(Undo::Reclaim {
                from: recipient,
                amount: quote.user,
            });
        }
        Ok(())
    }

    /// Shared body of `withdraw` and `redeem_and_forfeit`.
    fn exit(
        &self,
        holder: Account,
        recipient: Account,
        redeem: Amount,
        forfeit: Amount,
        min_reserve_out: Amount,
        operation: Operation,
    ) -> Result<WithdrawReceipt, PoolError> {
        self.access.authorize(&recipient, operation)?;
        let burn = redeem
            .checked_add(forfeit)
            .ok_or(PoolError::ArithmeticOverflow("exit: shares burned"))?;
        if burn == 0 {
            return Err(PoolError::InvalidAmount("no shares to burn"));
        }

        let mut state = self.state.lock();
        let mut next = *state;
        self.fold_yield(&mut next)?;

        let balance = self.shares.balance_of(&holder);
        if balance < burn {
            return Err(PoolError::InsufficientShares {
                required: burn,
                available: balance,
            });
        }

        let quote = self.quote(&next, redeem, burn)?;
        if quote.user < min_reserve_out {
            return Err(PoolError::SlippageExceeded {
                minimum: min_reserve_out,
                actual: quote.user,
            });
        }

        let outflow = self.config.retention.outflow(&quote);
        let shortfall = outflow.saturating_sub(next.liquid());

        let mut journal = Vec::new();
        let result = self
            .divest_shortfall(shortfall, &mut journal)
            .and_then(|divested| next.after_exit(burn, outflow, divested))
            .and_then(|after| {
                self.exit_effects(holder, recipient, burn, &quote, &mut journal)
                    .map(|_| after)
            });

        let after = match result {
            Ok(after) => after,
            Err(e) => {
                warn!(
                    holder = %holder,
                    shares = burn,
                    error = %e,
                    "[rp-02] Exit failed, unwinding"
                );
                self.unwind(journal);
                return Err(e);
            }
        };

        *state = after;
        info!(
            holder = %holder,
            recipient = %recipient,
            shares_burned = burn,
            shares_forfeited = forfeit,
            reserve_total = quote.total,
            reserve_user = quote.user,
            reserve_pool = quote.pool,
            "[rp-02] Exit committed"
        );

        Ok(WithdrawReceipt {
            shares_burned: burn,
            shares_forfeited: forfeit,
            quote,
            state_after: after,
        })
    }
}

impl<S, T, Y, A> ReserveLedgerApi for ReserveLedger<S, T, Y, A>
where
    S: ShareToken,
    T: ReserveToken,
    Y: YieldReserve,
    A: AccessPolicy,
{
    #[instrument(skip(self), fields(payer = %payer, recipient = %recipient))]
    fn deposit(
        &self,
        payer: Account,
        recipient: Account,
        amount: Amount,
        min_shares_out: Amount,
    ) -> Result<DepositReceipt, PoolError> {
        self.access.authorize(&payer, Operation::Deposit)?;
        if amount == 0 {
            return Err(PoolError::InvalidAmount("deposit amount is zero"));
        }

        let mut state = self.state.lock();
        let mut next = *state;
        self.fold_yield(&mut next)?;

        let minted = self.engine.enter(
            next.total_reserve_balance,
            next.total_share_supply,
            amount,
        )?;
        if minted == 0 {
            return Err(PoolError::InvalidAmount("deposit too small to mint shares"));
        }
        if minted < min_shares_out {
            return Err(PoolError::SlippageExceeded {
                minimum: min_shares_out,
                actual: minted,
            });
        }

        let invested = self.config.invest_ratio.apply(amount, Rounding::Down)?;
        let after = next.after_deposit(amount, minted, invested)?;

        let mut journal = Vec::new();
        if let Err(e) = self.deposit_effects(payer, recipient, amount, minted, invested, &mut journal) {
            warn!(amount, error = %e, "[rp-02] Deposit failed, unwinding");
            self.unwind(journal);
            return Err(e);
        }

        *state = after;
        info!(
            amount,
            shares_minted = minted,
            invested,
            total_reserve = after.total_reserve_balance,
            total_shares = after.total_share_supply,
            "[rp-02] Deposit committed"
        );

        Ok(DepositReceipt {
            reserve_amount: amount,
            shares_minted: minted,
            state_after: after,
        })
    }

    #[instrument(skip(self), fields(holder = %holder, recipient = %recipient))]
    fn withdraw(
        &self,
        holder: Account,
        recipient: Account,
        shares: Amount,
        min_reserve_out: Amount,
    ) -> Result<WithdrawReceipt, PoolError> {
        self.exit(holder, recipient, shares, 0, min_reserve_out, Operation::Withdraw)
    }

    #[instrument(skip(self), fields(holder = %holder, recipient = %recipient))]
    fn redeem_and_forfeit(
        &self,
        holder: Account,
        recipient: Account,
        redeem: Amount,
        forfeit: Amount,
        min_reserve_out: Amount,
    ) -> Result<WithdrawReceipt, PoolError> {
        self.exit(
            holder,
            recipient,
            redeem,
            forfeit,
            min_reserve_out,
            Operation::ClosePlan,
        )
    }

    fn calculate_pool_exit(&self, reserve_amount: Amount) -> Result<Amount, PoolError> {
        let state = *self.state.lock();
        self.engine.shares_for_exit(
            state.total_reserve_balance,
            state.total_share_supply,
            reserve_amount,
        )
    }

    fn calculate_pool_exit_inverse(&self, shares: Amount) -> Result<ExitQuote, PoolError> {
        let state = *self.state.lock();
        self.quote(&state, shares, shares)
    }

    fn accrue_yield(&self) -> Result<(ReserveState, ReserveState), PoolError> {
        let mut state = self.state.lock();
        let before = *state;
        let value = self.yield_reserve.current_value()?;
        let mut next = before;
        next.fold_yield(value)?;
        *state = next;
        debug!(
            previous = before.invested_balance,
            current = next.invested_balance,
            "[rp-02] Yield accrued"
        );
        Ok((before, next))
    }

    fn share_balance(&self, account: &Account) -> Amount {
        self.shares.balance_of(account)
    }

    fn state(&self) -> ReserveState {
        *self.state.lock()
    }
}
