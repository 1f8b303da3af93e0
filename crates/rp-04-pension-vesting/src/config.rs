//! Configuration for the pension ledger

use crate::domain::PlanSettings;
use serde::{Deserialize, Serialize};
use shared_types::{Account, PoolError};

/// Pension ledger configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PensionConfig {
    /// Account allowed to replace the plan settings
    pub owner: Account,
    /// Settings in force at startup
    pub settings: PlanSettings,
}

impl PensionConfig {
    pub fn validate(&self) -> Result<(), PoolError> {
        self.settings.validate()
    }
}
