//! Configuration for the reserve ledger

use crate::domain::RetentionPolicy;
use rp_01_curve_engine::CurveConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Account, PoolError, Rate};

/// Ledger configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Pricing curve
    pub curve: CurveConfig,
    /// Fraction of every exit total assigned to the pool
    pub withdraw_fee: Rate,
    /// Where the pool portion goes
    pub retention: RetentionPolicy,
    /// Fraction of every deposit forwarded to the yield reserve
    pub invest_ratio: Rate,
    /// Account whose reserve-token balance is the pool's custody
    pub custodian: Account,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            curve: CurveConfig::default(),
            withdraw_fee: Rate::from_percent(5),
            retention: RetentionPolicy::RetainInPool,
            invest_ratio: Rate::ZERO,
            custodian: Account::ZERO,
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<(), PoolError> {
        if !self.withdraw_fee.is_within_unit() {
            return Err(PoolError::InvalidSettings(format!(
                "withdraw fee {} above 100%",
                self.withdraw_fee
            )));
        }
        if !self.invest_ratio.is_within_unit() {
            return Err(PoolError::InvalidSettings(format!(
                "invest ratio {} above 100%",
                self.invest_ratio
            )));
        }
        self.curve.build().map(|_| ())
    }
}
