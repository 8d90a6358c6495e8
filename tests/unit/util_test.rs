//! Tests for utility types

use scrub_sched::util::{add_offset, DelayCause, FixedJitter, JitterSource, PgId, ScrubLevel, UTime, Urgency};

#[test]
fn test_urgency_ordering() {
    assert!(Urgency::MustRepair > Urgency::OperatorRequested);
    assert!(Urgency::OperatorRequested > Urgency::AfterRepair);
    assert!(Urgency::AfterRepair > Urgency::PeriodicRegular);
    assert!(Urgency::PeriodicRegular > Urgency::Off);
}

#[test]
fn test_add_offset_free_function() {
    let base = UTime::new(1_000, 250_000_000);
    assert_eq!(add_offset(base, 2.75), UTime::from_secs(1_003));
}

#[test]
fn test_repeated_offsets_start_from_base() {
    let base = UTime::from_secs(0);
    let mut t = base;
    for _ in 0..10 {
        t = t.add_offset(0.1);
    }
    // 0.1s splits into exactly 100ms each step
    assert_eq!(t, UTime::from_secs(1));
}

#[test]
fn test_utime_serializes_as_string() {
    let t = UTime::new(42, 1);
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"42.000000001\"");
    let back: UTime = serde_json::from_str("\"42.000000001\"").unwrap();
    assert_eq!(back, t);
    assert!(serde_json::from_str::<UTime>("\"soon\"").is_err());
}

#[test]
fn test_pgid_sharded() {
    let pg: PgId = "7.ffs1".parse().unwrap();
    assert_eq!(pg, PgId::new(7, 0xff).with_shard(1));
}

#[test]
fn test_display_names() {
    assert_eq!(ScrubLevel::Shallow.to_string(), "shallow");
    assert_eq!(Urgency::AfterRepair.to_string(), "after_repair");
    assert_eq!(DelayCause::Replicas.to_string(), "replicas");
    assert_eq!(DelayCause::default(), DelayCause::None);
}

#[test]
fn test_fixed_jitter_through_trait_object() {
    let mut j: Box<dyn JitterSource> = Box::new(FixedJitter::new(0.25));
    assert_eq!(j.sample_unit(), 0.25);
}
