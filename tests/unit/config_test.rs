//! Tests for configuration validation and loading

use scrub_sched::config::SchedConf;
use scrub_sched::core::SchedError;

#[test]
fn test_sched_conf_validation() {
    let valid = SchedConf {
        shallow_interval_secs: 3600.0,
        deep_interval_secs: 7200.0,
        interval_randomize_ratio: 0.0,
        max_shallow_secs: Some(0.0),
        max_deep_secs: None,
    };
    assert!(valid.validate().is_ok());
}

#[test]
fn test_sched_conf_invalid_intervals() {
    let zero = SchedConf {
        shallow_interval_secs: 0.0,
        ..SchedConf::default()
    };
    assert!(matches!(zero.validate(), Err(SchedError::InvalidConfig(_))));

    let nan = SchedConf {
        deep_interval_secs: f64::NAN,
        ..SchedConf::default()
    };
    assert!(nan.validate().is_err());
}

#[test]
fn test_sched_conf_invalid_ratio() {
    let invalid = SchedConf {
        interval_randomize_ratio: -0.1,
        ..SchedConf::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_sched_conf_invalid_extension() {
    let invalid = SchedConf {
        max_deep_secs: Some(f64::INFINITY),
        ..SchedConf::default()
    };
    let err = invalid.validate().unwrap_err();
    assert!(err.to_string().contains("max_deep_secs"));
}

#[test]
fn test_sched_conf_from_json() {
    let json = r#"{
        "shallow_interval_secs": 86400,
        "deep_interval_secs": 604800,
        "interval_randomize_ratio": 0.4,
        "max_shallow_secs": 604800,
        "max_deep_secs": 1209600
    }"#;

    let config = SchedConf::from_json_str(json).unwrap();
    assert_eq!(config.interval_randomize_ratio, 0.4);
    assert_eq!(config.max_deep_secs, Some(1_209_600.0));
}

#[test]
fn test_sched_conf_from_json_rejects_bad_input() {
    assert!(matches!(
        SchedConf::from_json_str("{not json"),
        Err(SchedError::Parse(_))
    ));
    assert!(matches!(
        SchedConf::from_json_str(r#"{"interval_randomize_ratio": -1}"#),
        Err(SchedError::InvalidConfig(_))
    ));
}

#[test]
fn test_load_from_path() {
    let path = std::env::temp_dir().join(format!("scrub-sched-conf-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"shallow_interval_secs": 60}"#).unwrap();

    let config = SchedConf::load_from_path(&path).unwrap();
    assert_eq!(config.shallow_interval_secs, 60.0);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_from_missing_path_has_context() {
    let err = SchedConf::load_from_path("/nonexistent/scrub-sched.json").unwrap_err();
    assert!(err.to_string().contains("failed to read scrub config"));
}

#[test]
fn test_json_roundtrip_keeps_unset_deadlines() {
    let config = SchedConf::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"max_deep_secs\":null"));
    assert_eq!(SchedConf::from_json_str(&json).unwrap(), config);
}
