//! # Pool Properties
//!
//! Randomized checks of the pool-level guarantees:
//!
//! | Property | Statement |
//! |----------|-----------|
//! | Full-exit exactness | `calculate_pool_exit(R) == S` after any deposit sequence |
//! | Split conservation | `user + pool == total` for every quote |
//! | Pool-favoring rounding | Deposit/withdraw cycles never grow an account |
//! | Penalty monotonicity | `p_refund` never decreases as time passes |

#[cfg(test)]
mod tests {
    use crate::integration::harness::{account, TestPool, FUNDING};
    use proptest::prelude::*;
    use rp_02_reserve_ledger::{ReserveLedgerApi, ReserveToken};
    use rp_03_liquidity_gateway::LiquidityGatewayApi;
    use rp_04_pension_vesting::PensionVestingApi;
    use shared_types::SCALE;

    fn deposits() -> impl Strategy<Value = Vec<(u8, u128)>> {
        prop::collection::vec((1u8..=5, SCALE / 1_000..10_000 * SCALE), 1..12)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_full_exit_exactness(sequence in deposits()) {
            let pool = TestPool::standard().unwrap();
            for (id, amount) in sequence {
                pool.gateway.deposit(account(id), amount, 0).unwrap();
            }
            let state = pool.ledger.state();
            prop_assert_eq!(
                pool.gateway.calculate_pool_exit(state.total_reserve_balance).unwrap(),
                state.total_share_supply
            );
            let quote = pool
                .gateway
                .calculate_pool_exit_inverse(state.total_share_supply)
                .unwrap();
            prop_assert_eq!(quote.user, state.total_reserve_balance);
        }

        #[test]
        fn prop_split_conservation(sequence in deposits(), fraction in 1u128..=1_000) {
            let pool = TestPool::standard().unwrap();
            for (id, amount) in sequence {
                pool.gateway.deposit(account(id), amount, 0).unwrap();
            }
            let supply = pool.ledger.state().total_share_supply;
            let shares = supply * fraction / 1_000;
            let quote = pool.gateway.calculate_pool_exit_inverse(shares).unwrap();
            prop_assert_eq!(quote.user + quote.pool, quote.total);
            prop_assert!(quote.total <= pool.ledger.state().total_reserve_balance);
        }

        #[test]
        fn prop_cycles_never_profit(
            seed in SCALE..1_000 * SCALE,
            amounts in prop::collection::vec(SCALE / 100..100 * SCALE, 1..10),
        ) {
            let pool = TestPool::standard().unwrap();
            pool.gateway.deposit(account(1), seed, 0).unwrap();
            for amount in amounts {
                let minted = pool.gateway.deposit(account(2), amount, 0).unwrap().shares_minted;
                pool.gateway.withdraw(account(2), minted, 0).unwrap();
            }
            prop_assert!(pool.reserve.balance_of(&account(2)) <= FUNDING);
        }

        #[test]
        fn prop_p_refund_non_decreasing(
            amount in SCALE / 100..1_000 * SCALE,
            steps in prop::collection::vec(0u64..2_000, 1..10),
        ) {
            let pool = TestPool::standard().unwrap();
            pool.pension.deposit(account(1), amount, 0).unwrap();
            let mut last = pool.pension.p_refund(&account(1)).unwrap();
            for step in steps {
                pool.clock.advance(step);
                let refund = pool.pension.p_refund(&account(1)).unwrap();
                prop_assert!(refund >= last);
                prop_assert!(refund <= pool.pension.plan_shares(&account(1)));
                last = refund;
            }
        }
    }
}
