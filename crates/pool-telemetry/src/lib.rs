//! # Pool Telemetry
//!
//! Logging and metrics for the reserve-pool components.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` registry with an `EnvFilter` and a
//!   pretty or JSON fmt layer
//! - **Metrics**: Prometheus counters and gauges in a crate-global registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pool_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RP_SERVICE_NAME` | `reserve-pool` | Service name in logs |
//! | `RP_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `RP_JSON_LOGS` | `false` | JSON log lines |
//! | `RP_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `RP_COMPONENT_ID` | `00` | Component identifier |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    encode_metrics, record_error, record_totals, register_metrics, DEPOSITS_TOTAL,
    OPERATION_ERRORS, PLANS_CLOSED_TOTAL, SHARES_FORFEITED_TOTAL, WITHDRAWALS_TOTAL,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize metrics and logging.
///
/// Metrics are registered first so that a logging failure (subscriber
/// already installed) still leaves counters exported. A second call fails
/// only with `LoggingInit`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}
