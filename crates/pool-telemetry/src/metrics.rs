//! Prometheus metrics for reserve-pool components.
//!
//! All metrics follow the naming convention: `rp_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., deposits_total)
//! - **Gauge**: Last observed pool total (e.g., reserve_balance)

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // LIQUIDITY METRICS (rp-03)
    // =========================================================================

    /// Successful gateway deposits
    pub static ref DEPOSITS_TOTAL: Counter = Counter::new(
        "rp_deposits_total",
        "Total number of successful deposits"
    ).expect("metric creation failed");

    /// Successful gateway withdrawals
    pub static ref WITHDRAWALS_TOTAL: Counter = Counter::new(
        "rp_withdrawals_total",
        "Total number of successful withdrawals"
    ).expect("metric creation failed");

    /// Reserve balance after the last mutation
    pub static ref RESERVE_BALANCE: Gauge = Gauge::new(
        "rp_reserve_balance",
        "Total reserve balance after the last mutation"
    ).expect("metric creation failed");

    /// Share supply after the last mutation
    pub static ref SHARE_SUPPLY: Gauge = Gauge::new(
        "rp_share_supply",
        "Total share supply after the last mutation"
    ).expect("metric creation failed");

    // =========================================================================
    // PENSION METRICS (rp-04)
    // =========================================================================

    /// Plans closed (early or matured)
    pub static ref PLANS_CLOSED_TOTAL: Counter = Counter::new(
        "rp_plans_closed_total",
        "Total number of pension plans closed"
    ).expect("metric creation failed");

    /// Shares forfeited to the pool on plan closure
    pub static ref SHARES_FORFEITED_TOTAL: Counter = Counter::new(
        "rp_shares_forfeited_total",
        "Total shares forfeited on plan closure"
    ).expect("metric creation failed");

    // =========================================================================
    // ERROR METRICS
    // =========================================================================

    /// Rejected operations by component and error kind
    pub static ref OPERATION_ERRORS: CounterVec = CounterVec::new(
        Opts::new("rp_operation_errors_total", "Rejected operations by component and kind"),
        &["component", "error_kind"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Idempotent: collectors that are already registered are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(DEPOSITS_TOTAL.clone()),
        Box::new(WITHDRAWALS_TOTAL.clone()),
        Box::new(RESERVE_BALANCE.clone()),
        Box::new(SHARE_SUPPLY.clone()),
        Box::new(PLANS_CLOSED_TOTAL.clone()),
        Box::new(SHARES_FORFEITED_TOTAL.clone()),
        Box::new(OPERATION_ERRORS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Record a rejected operation.
pub fn record_error(component: &str, error_kind: &str) {
    OPERATION_ERRORS
        .with_label_values(&[component, error_kind])
        .inc();
}

/// Record the pool totals after a committed mutation.
///
/// Gauges are `f64`; values above 2^53 lose precision, which is fine for
/// dashboards.
pub fn record_totals(reserve_balance: u128, share_supply: u128) {
    RESERVE_BALANCE.set(reserve_balance as f64);
    SHARE_SUPPLY.set(share_supply as f64);
}
