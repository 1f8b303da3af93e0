//! Pension vesting service.
//!
//! The plan book mutex is held across each call into the reserve ledger
//! (lock order: plan book, then ledger), so a plan record and the shares
//! behind it always change together.

use crate::config::PensionConfig;
use crate::domain::{plan_account, schedule, PensionPlan, PlanSettings};
use crate::ports::{PensionVestingApi, SystemTimeSource, TimeSource};
use parking_lot::Mutex;
use pool_telemetry::{record_error, record_totals, PLANS_CLOSED_TOTAL, SHARES_FORFEITED_TOTAL};
use rp_02_reserve_ledger::{DepositReceipt, ReserveLedgerApi, WithdrawReceipt};
use shared_bus::{EventPublisher, PoolEvent};
use shared_types::{Account, Amount, Operation, PoolError, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "rp-04";

struct PlanBook {
    settings: PlanSettings,
    plans: HashMap<Account, PensionPlan>,
}

impl PlanBook {
    fn plan(&self, account: &Account) -> PensionPlan {
        self.plans.get(account).copied().unwrap_or_default()
    }

    fn active_plan(&self, account: &Account) -> Result<PensionPlan, PoolError> {
        self.plans
            .get(account)
            .copied()
            .filter(PensionPlan::is_active)
            .ok_or(PoolError::NoActivePlan(*account))
    }
}

pub struct PensionVestingLedger<L, P, C = SystemTimeSource>
where
    L: ReserveLedgerApi,
    P: EventPublisher,
    C: TimeSource,
{
    owner: Account,
    ledger: Arc<L>,
    publisher: Arc<P>,
    clock: Arc<C>,
    book: Mutex<PlanBook>,
}

impl<L, P, C> PensionVestingLedger<L, P, C>
where
    L: ReserveLedgerApi,
    P: EventPublisher,
    C: TimeSource,
{
    pub fn new(
        config: PensionConfig,
        ledger: Arc<L>,
        publisher: Arc<P>,
        clock: Arc<C>,
    ) -> Result<Self, PoolError> {
        config.validate()?;
        info!(
            owner = %config.owner,
            settings = ?config.settings,
            "[rp-04] Pension ledger created"
        );
        Ok(Self {
            owner: config.owner,
            ledger,
            publisher,
            clock,
            book: Mutex::new(PlanBook {
                settings: config.settings,
                plans: HashMap::new(),
            }),
        })
    }

    pub fn owner(&self) -> Account {
        self.owner
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    fn plan_balance(&self, account: &Account) -> Amount {
        self.ledger.share_balance(&plan_account(account))
    }

    fn deposit_locked(
        &self,
        book: &mut PlanBook,
        account: Account,
        amount: Amount,
        min_shares_out: Amount,
        now: Timestamp,
    ) -> Result<DepositReceipt, PoolError> {
        let receipt = self
            .ledger
            .deposit(account, plan_account(&account), amount, min_shares_out)?;

        let plan = book.plans.entry(account).or_default();
        if !plan.is_active() {
            // Zero is the empty-slot sentinel.
            *plan = PensionPlan {
                created_at: now.max(1),
                shares_withdrawn: 0,
            };
            self.publisher.publish(PoolEvent::PlanCreated {
                account,
                created_at: plan.created_at,
            });
            info!(account = %account, created_at = plan.created_at, "[rp-04] Plan created");
        }
        Ok(receipt)
    }

    fn withdraw_locked(
        &self,
        book: &mut PlanBook,
        account: Account,
        shares: Amount,
        min_reserve_out: Amount,
        now: Timestamp,
    ) -> Result<WithdrawReceipt, PoolError> {
        let plan = book.active_plan(&account)?;
        if shares == 0 {
            return Err(PoolError::InvalidAmount("plan withdrawal of zero shares"));
        }
        let balance = self.plan_balance(&account);
        let limit = schedule::withdraw_limit(&book.settings, &plan, balance, now)?;
        if shares > limit {
            return Err(PoolError::WithdrawLimitExceeded {
                requested: shares,
                limit,
            });
        }
        let shares_withdrawn = plan
            .shares_withdrawn
            .checked_add(shares)
            .ok_or(PoolError::ArithmeticOverflow("plan: shares withdrawn"))?;

        let receipt =
            self.ledger
                .withdraw(plan_account(&account), account, shares, min_reserve_out)?;
        book.plans.insert(
            account,
            PensionPlan {
                shares_withdrawn,
                ..plan
            },
        );
        Ok(receipt)
    }

    fn close_locked(
        &self,
        book: &mut PlanBook,
        account: Account,
        min_reserve_out: Amount,
        now: Timestamp,
    ) -> Result<(Amount, Amount, Amount), PoolError> {
        let plan = book.active_plan(&account)?;
        let balance = self.plan_balance(&account);
        let refund = schedule::p_refund(&book.settings, &plan, balance, now)?;
        let forfeit = balance - refund;

        let reserve_out = if balance == 0 {
            if min_reserve_out > 0 {
                return Err(PoolError::SlippageExceeded {
                    minimum: min_reserve_out,
                    actual: 0,
                });
            }
            0
        } else {
            self.ledger
                .redeem_and_forfeit(
                    plan_account(&account),
                    account,
                    refund,
                    forfeit,
                    min_reserve_out,
                )?
                .quote
                .user
        };
        book.plans.remove(&account);
        Ok((refund, forfeit, reserve_out))
    }

    fn observe<T>(&self, operation: &'static str, result: Result<T, PoolError>) -> Result<T, PoolError> {
        if let Err(e) = &result {
            record_error(COMPONENT, e.kind());
            warn!(operation, error = %e, "[rp-04] Operation rejected");
        } else {
            let state = self.ledger.state();
            record_totals(state.total_reserve_balance, state.total_share_supply);
        }
        result
    }
}

impl<L, P, C> PensionVestingApi for PensionVestingLedger<L, P, C>
where
    L: ReserveLedgerApi,
    P: EventPublisher,
    C: TimeSource,
{
    fn set_plan_settings(&self, caller: Account, settings: PlanSettings) -> Result<(), PoolError> {
        if caller != self.owner {
            return self.observe(
                "set_plan_settings",
                Err(PoolError::Unauthorized {
                    account: caller,
                    operation: Operation::ConfigurePlans,
                }),
            );
        }
        self.observe("set_plan_settings", settings.validate())?;
        self.book.lock().settings = settings;

        self.publisher.publish(PoolEvent::PlanSettingsUpdated {
            deposit_period_duration: settings.deposit_period_duration,
            min_penalty: settings.min_penalty,
            max_penalty: settings.max_penalty,
            withdraw_period_duration: settings.withdraw_period_duration,
            initial_withdraw_allowance: settings.initial_withdraw_allowance,
        });
        info!(settings = ?settings, "[rp-04] Plan settings updated");
        Ok(())
    }

    fn plan_settings(&self) -> PlanSettings {
        self.book.lock().settings
    }

    fn deposit(
        &self,
        account: Account,
        amount: Amount,
        min_shares_out: Amount,
    ) -> Result<DepositReceipt, PoolError> {
        let mut book = self.book.lock();
        let now = self.clock.now();
        let receipt = self.observe(
            "deposit",
            self.deposit_locked(&mut book, account, amount, min_shares_out, now),
        )?;

        self.publisher.publish(PoolEvent::PlanDeposit {
            account,
            reserve_amount: receipt.reserve_amount,
            shares_minted: receipt.shares_minted,
        });
        debug!(
            account = %account,
            amount,
            shares_minted = receipt.shares_minted,
            "[rp-04] Plan deposit"
        );
        Ok(receipt)
    }

    fn withdraw(
        &self,
        account: Account,
        shares: Amount,
        min_reserve_out: Amount,
    ) -> Result<WithdrawReceipt, PoolError> {
        let mut book = self.book.lock();
        let now = self.clock.now();
        let receipt = self.observe(
            "withdraw",
            self.withdraw_locked(&mut book, account, shares, min_reserve_out, now),
        )?;

        self.publisher.publish(PoolEvent::PlanWithdraw {
            account,
            shares_burned: receipt.shares_burned,
            reserve_out: receipt.quote.user,
        });
        info!(
            account = %account,
            shares,
            reserve_out = receipt.quote.user,
            "[rp-04] Plan withdrawal"
        );
        Ok(receipt)
    }

    fn close_plan(&self, account: Account, min_reserve_out: Amount) -> Result<Amount, PoolError> {
        let mut book = self.book.lock();
        let now = self.clock.now();
        let (refunded, forfeited, reserve_out) = self.observe(
            "close_plan",
            self.close_locked(&mut book, account, min_reserve_out, now),
        )?;

        PLANS_CLOSED_TOTAL.inc();
        SHARES_FORFEITED_TOTAL.inc_by(forfeited as f64);
        self.publisher.publish(PoolEvent::PlanClosed {
            account,
            shares_refunded: refunded,
            shares_forfeited: forfeited,
            reserve_out,
        });
        info!(
            account = %account,
            shares_refunded = refunded,
            shares_forfeited = forfeited,
            reserve_out,
            "[rp-04] Plan closed"
        );
        Ok(reserve_out)
    }

    fn plans(&self, account: &Account) -> PensionPlan {
        self.book.lock().plan(account)
    }

    fn withdraw_limit(&self, account: &Account) -> Result<Amount, PoolError> {
        let book = self.book.lock();
        let plan = book.plan(account);
        schedule::withdraw_limit(
            &book.settings,
            &plan,
            self.plan_balance(account),
            self.clock.now(),
        )
    }

    fn p_refund(&self, account: &Account) -> Result<Amount, PoolError> {
        let book = self.book.lock();
        let plan = book.plan(account);
        schedule::p_refund(
            &book.settings,
            &plan,
            self.plan_balance(account),
            self.clock.now(),
        )
    }

    fn plan_shares(&self, account: &Account) -> Amount {
        self.plan_balance(account)
    }
}
