//! Global plan settings.

use serde::{Deserialize, Serialize};
use shared_types::{PoolError, Rate};

/// Owner-configured schedule shared by every plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    /// Lock-up length `D` in seconds. Zero means plans mature at creation.
    pub deposit_period_duration: u64,
    /// Penalty once the lock-up has fully elapsed.
    pub min_penalty: Rate,
    /// Penalty at creation.
    pub max_penalty: Rate,
    /// Vesting ramp length `W` in seconds. Zero means fully vested at maturity.
    pub withdraw_period_duration: u64,
    /// Fraction of the plan withdrawable as soon as it matures.
    pub initial_withdraw_allowance: Rate,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            deposit_period_duration: 7200,
            min_penalty: Rate::from_percent(10),
            max_penalty: Rate::from_percent(90),
            withdraw_period_duration: 3600,
            initial_withdraw_allowance: Rate::ZERO,
        }
    }
}

impl PlanSettings {
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.min_penalty > self.max_penalty {
            return Err(PoolError::InvalidSettings(format!(
                "min penalty {} above max penalty {}",
                self.min_penalty, self.max_penalty
            )));
        }
        if !self.max_penalty.is_within_unit() {
            return Err(PoolError::InvalidSettings(format!(
                "max penalty {} above 100%",
                self.max_penalty
            )));
        }
        if !self.initial_withdraw_allowance.is_within_unit() {
            return Err(PoolError::InvalidSettings(format!(
                "initial withdraw allowance {} above 100%",
                self.initial_withdraw_allowance
            )));
        }
        Ok(())
    }
}
