//! Domain layer for pension plans.

pub mod plan;
pub mod schedule;
pub mod settings;

pub use plan::{plan_account, PensionPlan, PlanPhase};
pub use settings::PlanSettings;
