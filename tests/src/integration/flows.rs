//! # Integration Test Flows
//!
//! End-to-end flows through the gateway, the pension ledger and the reserve
//! ledger sharing one pool.
//!
//! 1. **Full exit**: the last holder walks away with the whole reserve
//! 2. **Retention**: fees stay in the pool or go to a beneficiary
//! 3. **Yield**: accrual raises exit value without being captured by entrants
//! 4. **Atomicity**: failing collaborators leave no trace
//! 5. **Pension on a shared pool**: forfeits benefit gateway holders

#[cfg(test)]
mod tests {
    use crate::integration::harness::{account, custodian, owner, TestPool, FUNDING};
    use rp_02_reserve_ledger::{
        LedgerConfig, ReserveLedgerApi, ReserveToken, RetentionPolicy, ShareToken, YieldReserve,
    };
    use rp_03_liquidity_gateway::LiquidityGatewayApi;
    use rp_04_pension_vesting::{PensionVestingApi, PlanSettings};
    use shared_bus::{EventFilter, EventTopic, PoolEvent};
    use shared_types::{Operation, PoolError, Rate, SCALE};
    use std::sync::Arc;
    use std::thread;

    // =============================================================================
    // FULL EXIT
    // =============================================================================

    #[test]
    fn test_deposit_everything_then_withdraw_everything() {
        let pool = TestPool::standard().unwrap();
        let minted = pool
            .gateway
            .deposit(account(1), FUNDING, 0)
            .unwrap()
            .shares_minted;

        let state = pool.ledger.state();
        assert_eq!(
            pool.gateway
                .calculate_pool_exit(state.total_reserve_balance)
                .unwrap(),
            minted
        );

        pool.gateway.withdraw(account(1), minted, 0).unwrap();
        let state = pool.ledger.state();
        assert_eq!(state.total_share_supply, 0);
        assert_eq!(state.total_reserve_balance, 0);
        assert_eq!(pool.reserve.balance_of(&account(1)), FUNDING);
    }

    #[test]
    fn test_staggered_exits_drain_pool() {
        let pool = TestPool::standard().unwrap();
        for (id, amount) in [(1, 3 * SCALE), (2, 11 * SCALE + 7), (3, 250 * SCALE)] {
            pool.gateway.deposit(account(id), amount, 0).unwrap();
        }

        for id in [2, 1, 3] {
            let shares = pool.shares.balance_of(&account(id));
            pool.gateway.withdraw(account(id), shares, 0).unwrap();
            assert!(pool.ledger.check_invariants().is_empty());
        }

        assert!(pool.ledger.state().is_empty());
        assert_eq!(pool.reserve.balance_of(&custodian()), 0);
        let returned: u128 = (1..=3).map(|id| pool.reserve.balance_of(&account(id))).sum();
        assert_eq!(returned, 3 * FUNDING);
    }

    #[test]
    fn test_round_trip_never_profits() {
        let pool = TestPool::standard().unwrap();
        pool.gateway.deposit(account(1), 50 * SCALE, 0).unwrap();

        for _ in 0..20 {
            let minted = pool
                .gateway
                .deposit(account(2), SCALE, 0)
                .unwrap()
                .shares_minted;
            pool.gateway.withdraw(account(2), minted, 0).unwrap();
        }

        assert!(pool.reserve.balance_of(&account(2)) < FUNDING);
        assert_eq!(pool.shares.balance_of(&account(2)), 0);
    }

    #[test]
    fn test_split_deposit_never_beats_single() {
        let single = TestPool::standard().unwrap();
        let split = TestPool::standard().unwrap();
        for pool in [&single, &split] {
            pool.gateway.deposit(account(1), 40 * SCALE, 0).unwrap();
        }

        let one_shot = single
            .gateway
            .deposit(account(2), 10 * SCALE, 0)
            .unwrap()
            .shares_minted;
        let mut pieces = 0;
        for _ in 0..10 {
            pieces += split
                .gateway
                .deposit(account(2), SCALE, 0)
                .unwrap()
                .shares_minted;
        }
        assert!(pieces <= one_shot);
    }

    // =============================================================================
    // RETENTION POLICY
    // =============================================================================

    #[test]
    fn test_retained_fee_raises_price_for_remaining_holders() {
        let pool = TestPool::standard().unwrap();
        pool.gateway.deposit(account(1), 100 * SCALE, 0).unwrap();
        pool.gateway.deposit(account(2), 100 * SCALE, 0).unwrap();
        let holder_one = pool.shares.balance_of(&account(1));

        let shares = pool.shares.balance_of(&account(2));
        let receipt = pool.gateway.withdraw(account(2), shares, 0).unwrap();
        assert!(receipt.quote.pool > 0);

        // Account 1 now holds the whole supply and exits with everything,
        // its own deposit plus the fee account 2 left behind.
        let exit = pool
            .gateway
            .calculate_pool_exit_inverse(holder_one)
            .unwrap();
        assert_eq!(exit.pool, 0);
        assert_eq!(exit.user, pool.ledger.state().total_reserve_balance);
        assert!(exit.user > 100 * SCALE);
    }

    #[test]
    fn test_collect_policy_routes_fee_to_beneficiary() {
        let beneficiary = account(42);
        let pool = TestPool::new(
            LedgerConfig {
                retention: RetentionPolicy::Collect { beneficiary },
                withdraw_fee: Rate::from_bps(250),
                ..LedgerConfig::default()
            },
            PlanSettings::default(),
            3,
        )
        .unwrap();
        pool.gateway.deposit(account(1), 64 * SCALE, 0).unwrap();
        let shares = pool.shares.balance_of(&account(1));

        let receipt = pool.gateway.withdraw(account(1), shares, 0).unwrap();
        assert_eq!(receipt.quote.total, 64 * SCALE);
        assert_eq!(receipt.quote.pool, 64 * SCALE / 40);
        assert_eq!(pool.reserve.balance_of(&beneficiary), receipt.quote.pool);
        assert_eq!(
            pool.reserve.balance_of(&account(1)),
            FUNDING - receipt.quote.pool
        );
        assert!(pool.ledger.state().is_empty());
    }

    // =============================================================================
    // YIELD
    // =============================================================================

    fn invested_pool() -> TestPool {
        TestPool::new(
            LedgerConfig {
                invest_ratio: Rate::from_percent(75),
                ..LedgerConfig::default()
            },
            PlanSettings::default(),
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_yield_accrues_to_existing_holders() {
        let pool = invested_pool();
        pool.gateway.deposit(account(1), 100 * SCALE, 0).unwrap();
        pool.yield_reserve.accrue(10 * SCALE);
        pool.gateway.accrue_yield().unwrap();

        let early = pool.shares.balance_of(&account(1));
        let quote = pool.gateway.calculate_pool_exit_inverse(early).unwrap();
        assert_eq!(quote.total, 110 * SCALE);

        // A late entrant cannot take any of the accrued yield back out.
        pool.gateway.deposit(account(2), 110 * SCALE, 0).unwrap();
        let late = pool.shares.balance_of(&account(2));
        let quote = pool.gateway.calculate_pool_exit_inverse(late).unwrap();
        assert!(quote.total <= 110 * SCALE);
        assert!(pool.ledger.check_invariants().is_empty());
    }

    #[test]
    fn test_full_exit_pulls_from_yield_reserve() {
        let pool = invested_pool();
        pool.gateway.deposit(account(1), 20 * SCALE, 0).unwrap();
        pool.yield_reserve.accrue(2 * SCALE);

        let shares = pool.shares.balance_of(&account(1));
        let receipt = pool.gateway.withdraw(account(1), shares, 0).unwrap();

        // The withdrawal accrues first, so the gain is paid out too.
        assert_eq!(receipt.quote.user, 22 * SCALE);
        assert_eq!(pool.yield_reserve.current_value().unwrap(), 0);
        assert!(pool.ledger.state().is_empty());
    }

    #[test]
    fn test_yield_loss_lowers_exit_value() {
        let pool = invested_pool();
        pool.gateway.deposit(account(1), 40 * SCALE, 0).unwrap();
        let shares = pool.shares.balance_of(&account(1));
        let before = pool.gateway.calculate_pool_exit_inverse(shares).unwrap();

        // Lose a third of the invested funds.
        let vault = pool.yield_reserve.vault();
        pool.reserve.transfer(&vault, &account(99), 10 * SCALE).unwrap();
        pool.gateway.accrue_yield().unwrap();

        let after = pool.gateway.calculate_pool_exit_inverse(shares).unwrap();
        assert_eq!(after.total, before.total - 10 * SCALE);
    }

    // =============================================================================
    // ATOMICITY
    // =============================================================================

    #[test]
    fn test_unlisted_account_rejected_without_trace() {
        let pool = TestPool::standard().unwrap();
        pool.reserve.mint_to(&account(9), SCALE);
        let mut sub = pool.bus.subscribe(EventFilter::all());

        assert_eq!(
            pool.gateway.deposit(account(9), SCALE, 0),
            Err(PoolError::Unauthorized {
                account: account(9),
                operation: Operation::Deposit
            })
        );
        assert!(sub.drain().is_empty());

        pool.access.add(account(9));
        assert!(pool.gateway.deposit(account(9), SCALE, 0).is_ok());
    }

    #[test]
    fn test_failed_payout_rolls_back_everything() {
        let pool = TestPool::standard().unwrap();
        pool.gateway.deposit(account(1), 30 * SCALE, 0).unwrap();
        let shares = pool.shares.balance_of(&account(1));
        let state = pool.ledger.state();
        let custody = pool.reserve.balance_of(&custodian());

        pool.reserve.freeze(&account(1));
        assert!(matches!(
            pool.gateway.withdraw(account(1), shares, 0),
            Err(PoolError::Collaborator(_))
        ));

        assert_eq!(pool.ledger.state(), state);
        assert_eq!(pool.shares.balance_of(&account(1)), shares);
        assert_eq!(pool.reserve.balance_of(&custodian()), custody);

        pool.reserve.unfreeze(&account(1));
        assert!(pool.gateway.withdraw(account(1), shares, 0).is_ok());
    }

    #[test]
    fn test_illiquid_yield_reserve_blocks_exit() {
        let pool = invested_pool();
        pool.gateway.deposit(account(1), 40 * SCALE, 0).unwrap();
        pool.yield_reserve.set_withdraw_cap(Some(0));
        let shares = pool.shares.balance_of(&account(1));
        let state = pool.ledger.state();

        assert!(matches!(
            pool.gateway.withdraw(account(1), shares, 0),
            Err(PoolError::InsufficientReserve { .. })
        ));
        assert_eq!(pool.ledger.state(), state);

        // Small exits are still served from liquid custody.
        assert!(pool.gateway.withdraw(account(1), shares / 100, 0).is_ok());
    }

    #[test]
    fn test_concurrent_traffic_keeps_books_consistent() {
        let pool = Arc::new(TestPool::standard().unwrap());
        let handles: Vec<_> = (1..=5u8)
            .map(|id| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for round in 0..25u128 {
                        let amount = (round + 1) * SCALE / 3 + id as u128;
                        pool.gateway.deposit(account(id), amount, 0).unwrap();
                        let held = pool.shares.balance_of(&account(id));
                        pool.gateway.withdraw(account(id), held / 2, 0).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(pool.ledger.check_invariants().is_empty());
        let supply: u128 = (1..=5).map(|id| pool.shares.balance_of(&account(id))).sum();
        assert_eq!(supply, pool.ledger.state().total_share_supply);
    }

    // =============================================================================
    // PENSION ON A SHARED POOL
    // =============================================================================

    #[test]
    fn test_plan_lifecycle_alongside_gateway() {
        let pool = TestPool::standard().unwrap();
        let mut pension_events = pool
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Pension]));

        pool.gateway.deposit(account(2), 9 * SCALE, 0).unwrap();
        pool.pension.deposit(account(1), 7 * SCALE, 0).unwrap();
        assert_eq!(pool.pension.plan_shares(&account(1)), SCALE);

        // Quarter of the lock-up: 70% penalty.
        pool.clock.advance(1800);
        assert_eq!(pool.pension.p_refund(&account(1)).unwrap(), 3 * SCALE / 10);

        let paid = pool.pension.close_plan(account(1), 0).unwrap();
        assert!(paid > 0);

        // The gateway holder is now the only holder and keeps the forfeit.
        let gateway_holder = pool.shares.balance_of(&account(2));
        let exit = pool
            .gateway
            .calculate_pool_exit_inverse(gateway_holder)
            .unwrap();
        assert!(exit.user > 9 * SCALE);

        let closed = pension_events
            .drain()
            .into_iter()
            .find(|event| matches!(event, PoolEvent::PlanClosed { .. }));
        assert_eq!(
            closed,
            Some(PoolEvent::PlanClosed {
                account: account(1),
                shares_refunded: 3 * SCALE / 10,
                shares_forfeited: 7 * SCALE / 10,
                reserve_out: paid,
            })
        );
        assert!(pool.ledger.check_invariants().is_empty());
    }

    #[test]
    fn test_lone_plan_close_leaves_empty_pool() {
        let pool = TestPool::standard().unwrap();
        pool.pension.deposit(account(1), 100 * SCALE, 0).unwrap();
        let paid = pool.pension.close_plan(account(1), 0).unwrap();

        // No other holder exists to keep the penalty.
        assert_eq!(paid, 100 * SCALE);
        assert!(pool.ledger.state().is_empty());
        assert!(pool.ledger.check_invariants().is_empty());

        // A dust entrant gets back only what it put in.
        let minted = pool
            .gateway
            .deposit(account(2), 1, 0)
            .unwrap()
            .shares_minted;
        let quote = pool.gateway.calculate_pool_exit_inverse(minted).unwrap();
        assert_eq!(quote.user, 1);
    }

    #[test]
    fn test_lone_plan_close_sends_forfeit_to_beneficiary() {
        let beneficiary = account(98);
        let config = LedgerConfig {
            retention: RetentionPolicy::Collect { beneficiary },
            ..LedgerConfig::default()
        };
        let pool = TestPool::new(config, PlanSettings::default(), 5).unwrap();
        pool.pension.deposit(account(1), 100 * SCALE, 0).unwrap();
        let paid = pool.pension.close_plan(account(1), 0).unwrap();

        assert!(paid < 100 * SCALE);
        assert_eq!(pool.reserve.balance_of(&beneficiary), 100 * SCALE - paid);
        assert!(pool.ledger.state().is_empty());
        assert_eq!(pool.reserve.balance_of(&custodian()), 0);
    }

    #[test]
    fn test_settings_change_applies_to_open_plans() {
        let pool = TestPool::standard().unwrap();
        pool.pension.deposit(account(1), 4 * SCALE, 0).unwrap();
        assert_eq!(pool.pension.withdraw_limit(&account(1)).unwrap(), 0);

        pool.pension
            .set_plan_settings(
                owner(),
                PlanSettings {
                    deposit_period_duration: 0,
                    withdraw_period_duration: 0,
                    ..PlanSettings::default()
                },
            )
            .unwrap();
        assert_eq!(
            pool.pension.withdraw_limit(&account(1)).unwrap(),
            pool.pension.plan_shares(&account(1))
        );
    }
}
