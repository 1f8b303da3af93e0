//! # Telemetry Integration
//!
//! Pool operations feed the Prometheus registry exported by
//! `pool-telemetry`.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{account, TestPool};
    use pool_telemetry::{
        build_filter, encode_metrics, init_telemetry, register_metrics, TelemetryConfig,
        TelemetryError, DEPOSITS_TOTAL, OPERATION_ERRORS, PLANS_CLOSED_TOTAL,
    };
    use rp_03_liquidity_gateway::LiquidityGatewayApi;
    use rp_04_pension_vesting::PensionVestingApi;
    use shared_types::SCALE;

    #[test]
    fn test_operations_show_up_in_metrics() {
        register_metrics().unwrap();
        let pool = TestPool::standard().unwrap();

        let deposits = DEPOSITS_TOTAL.get();
        let closed = PLANS_CLOSED_TOTAL.get();
        let rejected = OPERATION_ERRORS
            .with_label_values(&["rp-03", "insufficient_shares"])
            .get();

        pool.gateway.deposit(account(1), SCALE, 0).unwrap();
        assert!(pool.gateway.withdraw(account(2), 1, 0).is_err());
        pool.pension.deposit(account(3), SCALE, 0).unwrap();
        pool.pension.close_plan(account(3), 0).unwrap();

        assert!(DEPOSITS_TOTAL.get() >= deposits + 1.0);
        assert!(PLANS_CLOSED_TOTAL.get() >= closed + 1.0);
        assert!(
            OPERATION_ERRORS
                .with_label_values(&["rp-03", "insufficient_shares"])
                .get()
                >= rejected + 1.0
        );

        let text = encode_metrics().unwrap();
        assert!(text.contains("rp_deposits_total"));
        assert!(text.contains("rp_plans_closed_total"));
    }

    fn lookup(key: &str) -> Option<String> {
        match key {
            "RP_LOG_LEVEL" => Some("rp_02_reserve_ledger=debug,warn".to_string()),
            "RUST_LOG" => Some("error".to_string()),
            "RP_CONSOLE_OUTPUT" => Some("0".to_string()),
            "RP_SERVICE_NAME" => Some("pool-it".to_string()),
            "DOCKER_CONTAINER" => Some("1".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_config_parsed_from_lookup() {
        let config = TelemetryConfig::from_lookup(lookup);

        // RP_LOG_LEVEL wins over RUST_LOG; containers default to JSON.
        assert_eq!(config.log_level, "rp_02_reserve_ledger=debug,warn");
        assert_eq!(config.service_name, "pool-it");
        assert_eq!(config.component_id, TelemetryConfig::default().component_id);
        assert!(!config.console_output);
        assert!(config.json_logs);

        let filter = build_filter(&config).unwrap().to_string();
        assert!(filter.contains("rp_02_reserve_ledger=debug"));
    }

    #[test]
    fn test_config_falls_back_to_rust_log() {
        let config = TelemetryConfig::from_lookup(|key| match key {
            "RUST_LOG" => Some("rp_04_pension_vesting=trace".to_string()),
            _ => None,
        });
        assert_eq!(config.log_level, "rp_04_pension_vesting=trace");
        assert!(!config.json_logs);
        assert!(config.console_output);
    }

    #[test]
    fn test_second_init_fails_on_logging_only() {
        let config = TelemetryConfig::from_lookup(lookup);
        let _ = init_telemetry(&config);

        // Metrics registration is idempotent; the global subscriber is not.
        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::LoggingInit(_))
        ));
        assert!(encode_metrics().unwrap().contains("rp_deposits_total"));
    }
}
