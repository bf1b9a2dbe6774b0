//! Tests for configuration validation

use render_dispatch::config::SchedulerConfig;

#[test]
fn test_default_config_is_valid() {
    assert!(SchedulerConfig::default().validate().is_ok());
}

#[test]
fn test_config_invalid_queue_size() {
    let invalid = SchedulerConfig {
        max_queue_size: 0,
        ..SchedulerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_sweep_interval() {
    let invalid = SchedulerConfig {
        sweep_interval_ms: 0,
        ..SchedulerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_dispatch_timeout() {
    let invalid = SchedulerConfig {
        dispatch_timeout_ms: 0,
        ..SchedulerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_zero_retries_is_valid() {
    // A budget of zero means "never retry"; that is a legal policy.
    let cfg = SchedulerConfig {
        max_retries: 0,
        ..SchedulerConfig::default()
    };
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "max_queue_size": 500,
        "sweep_interval_ms": 5000,
        "dispatch_timeout_ms": 120000,
        "max_retries": 2
    }"#;

    let cfg = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.max_queue_size, 500);
    assert_eq!(cfg.max_retries, 2);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    let json = r#"{
        "max_queue_size": 0,
        "sweep_interval_ms": 5000,
        "dispatch_timeout_ms": 120000,
        "max_retries": 2
    }"#;

    assert!(SchedulerConfig::from_json_str(json).is_err());
}
