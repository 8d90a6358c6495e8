//! Tests for error types

use scrub_sched::core::SchedError;

#[test]
fn test_invalid_config_error() {
    let err = SchedError::InvalidConfig("ratio".to_string());
    assert_eq!(format!("{}", err), "invalid config: ratio");
}

#[test]
fn test_invalid_timestamp_error() {
    let err = SchedError::InvalidTimestamp("x.y".to_string());
    assert_eq!(format!("{}", err), "invalid timestamp: x.y");
}

#[test]
fn test_invalid_pgid_error() {
    let err = SchedError::InvalidPgId("nope".to_string());
    assert_eq!(format!("{}", err), "invalid pg id: nope");
}

#[test]
fn test_parse_error() {
    let err = SchedError::Parse("eof".to_string());
    assert_eq!(format!("{}", err), "parse error: eof");
}

#[test]
fn test_parse_errors_surface_from_identifiers() {
    let err = "12:00".parse::<scrub_sched::util::UTime>().unwrap_err();
    assert!(matches!(err, SchedError::InvalidTimestamp(_)));
    let err = "1".parse::<scrub_sched::util::PgId>().unwrap_err();
    assert!(matches!(err, SchedError::InvalidPgId(_)));
}
