//! Tests for the urgency policy table

use scrub_sched::core::policy::*;
use scrub_sched::util::Urgency;

#[test]
fn test_noscrub_flags() {
    assert!(observes_noscrub_flags(Urgency::PeriodicRegular));
    assert!(observes_noscrub_flags(Urgency::Overdue));
    assert!(!observes_noscrub_flags(Urgency::AfterRepair));
    assert!(!observes_noscrub_flags(Urgency::OperatorRequested));
}

#[test]
fn test_allowed_hours() {
    assert!(observes_allowed_hours(Urgency::AfterRepair));
    assert!(!observes_allowed_hours(Urgency::OperatorRequested));
    assert!(!observes_allowed_hours(Urgency::MustRepair));
}

#[test]
fn test_load_limit_and_reservation() {
    for u in [Urgency::Off, Urgency::PeriodicRegular, Urgency::Overdue] {
        assert!(observes_load_limit(u));
        assert!(requires_reservation(u));
    }
    for u in [Urgency::AfterRepair, Urgency::OperatorRequested, Urgency::MustRepair] {
        assert!(!observes_load_limit(u));
        assert!(!requires_reservation(u));
    }
}

#[test]
fn test_randomization_only_periodic() {
    assert!(requires_randomization(Urgency::PeriodicRegular));
    assert!(!requires_randomization(Urgency::Off));
    assert!(!requires_randomization(Urgency::Overdue));
    assert!(!requires_randomization(Urgency::OperatorRequested));
}

#[test]
fn test_max_concurrency() {
    assert!(observes_max_concurrency(Urgency::AfterRepair));
    assert!(!observes_max_concurrency(Urgency::OperatorRequested));
}

#[test]
fn test_policy_row_serializes() {
    let row = UrgencyPolicy::for_urgency(Urgency::AfterRepair);
    let json = serde_json::to_value(row).unwrap();
    assert_eq!(json["requires_reservation"], false);
    assert_eq!(json["observes_allowed_hours"], true);
}
