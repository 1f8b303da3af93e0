//! Penalty and vesting schedules.
//!
//! Pure functions of the settings, the plan record, the plan's share
//! balance and the current time. Every rounding choice favors the pool:
//! penalties round up, refunds and allowances round down.

use super::plan::{PensionPlan, PlanPhase};
use super::settings::PlanSettings;
use shared_types::{mul_div, Amount, PoolError, Rate, Rounding, Timestamp, SCALE};

/// Seconds since the plan was created; zero if the clock is behind.
pub fn elapsed(plan: &PensionPlan, now: Timestamp) -> u64 {
    now.saturating_sub(plan.created_at)
}

pub fn phase(settings: &PlanSettings, plan: &PensionPlan, now: Timestamp) -> PlanPhase {
    if !plan.is_active() {
        PlanPhase::Empty
    } else if elapsed(plan, now) < settings.deposit_period_duration {
        PlanPhase::Deposit
    } else {
        PlanPhase::Withdraw
    }
}

/// Penalty after `elapsed` seconds:
/// `min + (max - min) * (D - t) / D`, with `t` clamped to `[0, D]`.
pub fn penalty(settings: &PlanSettings, elapsed: u64) -> Result<Rate, PoolError> {
    let duration = settings.deposit_period_duration;
    if elapsed >= duration {
        return Ok(settings.min_penalty);
    }
    let spread = settings
        .max_penalty
        .raw()
        .saturating_sub(settings.min_penalty.raw());
    let remaining = (duration - elapsed) as u128;
    let extra = mul_div(spread, remaining, duration as u128, Rounding::Up)?;
    Ok(Rate::from_raw(settings.min_penalty.raw() + extra))
}

/// Shares released if the plan were closed now.
pub fn p_refund(
    settings: &PlanSettings,
    plan: &PensionPlan,
    balance: Amount,
    now: Timestamp,
) -> Result<Amount, PoolError> {
    if !plan.is_active() {
        return Ok(0);
    }
    let penalty = penalty(settings, elapsed(plan, now))?;
    penalty.complement().apply(balance, Rounding::Down)
}

/// Fraction of the plan vested after `into_withdraw` seconds of the
/// withdraw phase.
pub fn vested_fraction(settings: &PlanSettings, into_withdraw: u64) -> Result<Rate, PoolError> {
    let window = settings.withdraw_period_duration;
    if into_withdraw >= window {
        return Ok(Rate::ONE);
    }
    let initial = settings.initial_withdraw_allowance;
    let ramp = mul_div(
        initial.complement().raw(),
        into_withdraw as u128,
        window as u128,
        Rounding::Down,
    )?;
    Ok(Rate::from_raw((initial.raw() + ramp).min(SCALE)))
}

/// Shares the plan may release right now.
///
/// Zero outside the withdraw phase. Within it the allowance grows linearly
/// from `initial_withdraw_allowance` of the plan's principal to all of it,
/// net of what has already been released.
pub fn withdraw_limit(
    settings: &PlanSettings,
    plan: &PensionPlan,
    balance: Amount,
    now: Timestamp,
) -> Result<Amount, PoolError> {
    if phase(settings, plan, now) != PlanPhase::Withdraw {
        return Ok(0);
    }
    let into_withdraw = elapsed(plan, now) - settings.deposit_period_duration;
    let principal = balance
        .checked_add(plan.shares_withdrawn)
        .ok_or(PoolError::ArithmeticOverflow("withdraw_limit: principal"))?;
    let allowed = vested_fraction(settings, into_withdraw)?.apply(principal, Rounding::Down)?;
    Ok(allowed.saturating_sub(plan.shares_withdrawn).min(balance))
}
