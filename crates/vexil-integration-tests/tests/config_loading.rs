//! End-to-end loading: environment → `ResolvedConfig` → display and
//! logging setup.

use vexil_config::{Config, ConfigLayer, ConfigOverrides, ShowFormat};
use vexil_telemetry::{LogConfig, LogFormat, LogTarget};
use vexil_test::{env_map, garbled_env, production_env};

#[test]
fn production_env_round_trips_through_show() {
    let resolved = Config::load_from(&production_env(), &ConfigOverrides::default()).unwrap();

    let toml_out = resolved.show(ShowFormat::Toml, None).unwrap();
    assert!(toml_out.contains("port = 8080  # [environment: VEXIL_PORT]"));
    assert!(toml_out.contains("schema = \"public\"  # [defaults]"));
    assert!(toml_out.contains("Environment variables applied: 11"));

    let json_out = resolved.show(ShowFormat::Json, Some("database")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_out).unwrap();
    assert_eq!(parsed["pool_min"], 2);
    assert_eq!(parsed["pool_max"], 16);
}

#[test]
fn garbled_values_stay_annotated_as_defaults() {
    let resolved = Config::load_from(&garbled_env(), &ConfigOverrides::default()).unwrap();

    assert_eq!(resolved.config, {
        let mut expected = Config::default();
        expected.metrics.interval_ms = 1000;
        expected
    });
    assert_eq!(
        resolved.field_sources.get("server.port"),
        Some(&ConfigLayer::Defaults)
    );
    assert_eq!(
        resolved.field_sources.get("database.pool_max"),
        Some(&ConfigLayer::Defaults)
    );
    // A present but non-truthy token is a real value.
    assert_eq!(
        resolved.field_sources.get("server.enable_request_logger"),
        Some(&ConfigLayer::Environment)
    );
}

#[test]
fn options_fill_in_under_the_environment() {
    let overrides = ConfigOverrides::new()
        .with_metrics_interval_ms(5000)
        .with_cors_origins(["https://options.example.com"]);

    let resolved = Config::load_from(&env_map(&[]), &overrides).unwrap();
    assert_eq!(resolved.config.metrics.interval_ms, 5000);
    assert_eq!(
        resolved.config.security.cors_origins,
        ["https://options.example.com"]
    );
    assert_eq!(
        resolved.field_sources.get("metrics.interval_ms"),
        Some(&ConfigLayer::Options)
    );

    // An unusable env value falls back to the option, not the default.
    let env = env_map(&[("VEXIL_METRICS_INTERVAL_MS", "often")]);
    let resolved = Config::load_from(&env, &overrides).unwrap();
    assert_eq!(resolved.config.metrics.interval_ms, 5000);

    // A usable one wins, clamped to the minimum.
    let env = env_map(&[
        ("VEXIL_METRICS_INTERVAL_MS", "250"),
        ("VEXIL_CORS_ORIGINS", ""),
    ]);
    let resolved = Config::load_from(&env, &overrides).unwrap();
    assert_eq!(resolved.config.metrics.interval_ms, 1000);
    assert!(resolved.config.security.cors_origins.is_empty());
}

#[test]
fn invalid_values_are_rejected_with_field() {
    let cases = [
        ("VEXIL_PORT", "70000", "server.port"),
        ("VEXIL_DATABASE_POOL_MAX", "0", "database.pool_max"),
        ("VEXIL_LOG_FORMAT", "xml", "logging.format"),
    ];
    for (var, value, field) in cases {
        let err = Config::load_from(&env_map(&[(var, value)]), &ConfigOverrides::default())
            .unwrap_err();
        assert_eq!(err.field(), Some(field), "{var}={value}");
    }
}

#[test]
fn logging_section_feeds_telemetry() {
    let env = env_map(&[
        ("VEXIL_LOG_LEVEL", "debug"),
        ("VEXIL_LOG_FORMAT", "compact"),
        ("VEXIL_LOG_DIRECTIVES", "vexil_env=trace, vexil_config=info"),
    ]);
    let resolved = Config::load_from(&env, &ConfigOverrides::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let log_env = env_map(&[
        ("VEXIL_LOG_DIR", dir.path().to_str().unwrap()),
        ("VEXIL_LOG_TIMESTAMPS", "0"),
    ]);
    let log_config = LogConfig::from(&resolved.config.logging).with_env(&log_env);

    assert_eq!(log_config.level, "debug");
    assert_eq!(log_config.format, LogFormat::Compact);
    assert_eq!(
        log_config.directives,
        vec!["vexil_env=trace", "vexil_config=info"]
    );
    assert_eq!(log_config.target, LogTarget::File(dir.path().to_path_buf()));
    assert!(!log_config.timestamps);
    assert!(!log_config.ansi);
}
