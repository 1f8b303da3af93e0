//! # Test Pool Harness
//!
//! Wires every component together over the in-memory collaborators, the
//! way a single-process embedding would:
//!
//! ```text
//! [Gateway (3)] ──┐
//!                 ├──→ [Reserve Ledger (2)] ──→ [Curve Engine (1)]
//! [Pension (4)] ──┘            │
//!       │                      ├──→ share token / reserve token / yield reserve
//!       └──────→ [Event Bus] ←─┘ (via gateway)
//! ```

use rp_02_reserve_ledger::adapters::{
    InMemoryReserveToken, InMemoryShareToken, InMemoryYieldReserve, Whitelist,
};
use rp_02_reserve_ledger::{LedgerConfig, ReserveLedger};
use rp_03_liquidity_gateway::LiquidityGateway;
use rp_04_pension_vesting::{ManualClock, PensionConfig, PensionVestingLedger, PlanSettings};
use shared_bus::InMemoryEventBus;
use shared_types::{Account, Amount, PoolError, SCALE};
use std::sync::Arc;

pub type Ledger =
    ReserveLedger<InMemoryShareToken, InMemoryReserveToken, InMemoryYieldReserve, Whitelist>;
pub type Gateway = LiquidityGateway<Ledger, InMemoryEventBus>;
pub type Pension = PensionVestingLedger<Ledger, InMemoryEventBus, ManualClock>;

/// Clock origin for every harness.
pub const GENESIS: u64 = 1_700_000_000;

/// Reserve each funded account starts with.
pub const FUNDING: Amount = 1_000_000 * SCALE;

pub fn account(id: u8) -> Account {
    Account::from_low_u8(id)
}

pub fn custodian() -> Account {
    account(250)
}

pub fn owner() -> Account {
    account(251)
}

pub struct TestPool {
    pub ledger: Arc<Ledger>,
    pub gateway: Gateway,
    pub pension: Pension,
    pub shares: Arc<InMemoryShareToken>,
    pub reserve: Arc<InMemoryReserveToken>,
    pub yield_reserve: Arc<InMemoryYieldReserve>,
    pub access: Arc<Whitelist>,
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<ManualClock>,
}

impl TestPool {
    /// Builds a pool with accounts `1..=funded` whitelisted and funded.
    pub fn new(config: LedgerConfig, settings: PlanSettings, funded: u8) -> Result<Self, PoolError> {
        let reserve = Arc::new(InMemoryReserveToken::new(custodian()));
        let shares = Arc::new(InMemoryShareToken::new());
        let yield_reserve = Arc::new(InMemoryYieldReserve::new(reserve.clone()));
        let access = Arc::new(Whitelist::new((1..=funded).map(account)));
        for id in 1..=funded {
            reserve.mint_to(&account(id), FUNDING);
        }

        let ledger = Arc::new(ReserveLedger::new(
            LedgerConfig {
                custodian: custodian(),
                ..config
            },
            shares.clone(),
            reserve.clone(),
            yield_reserve.clone(),
            access.clone(),
        )?);
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(ManualClock::new(GENESIS));
        let gateway = LiquidityGateway::new(ledger.clone(), bus.clone());
        let pension = PensionVestingLedger::new(
            PensionConfig {
                owner: owner(),
                settings,
            },
            ledger.clone(),
            bus.clone(),
            clock.clone(),
        )?;

        Ok(Self {
            ledger,
            gateway,
            pension,
            shares,
            reserve,
            yield_reserve,
            access,
            bus,
            clock,
        })
    }

    /// Default ledger and plan settings, five funded accounts.
    pub fn standard() -> Result<Self, PoolError> {
        Self::new(LedgerConfig::default(), PlanSettings::default(), 5)
    }
}
