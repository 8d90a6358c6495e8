//! Orderings between the shallow and deep entries of a job.
//!
//! `Ordering::Less` means the left entry goes first. Urgency dominates: a
//! higher-urgency entry is preferred regardless of its timestamps.

use std::cmp::Ordering;

use crate::util::clock::UTime;
use crate::util::serde::ScrubLevel;

use super::target::SchedEntry;

/// Deep before shallow when everything else ties; a deep scrub covers
/// what a shallow one would check.
fn cmp_levels(l: ScrubLevel, r: ScrubLevel) -> Ordering {
    match (l, r) {
        (ScrubLevel::Deep, ScrubLevel::Shallow) => Ordering::Less,
        (ScrubLevel::Shallow, ScrubLevel::Deep) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Order two entries by when they will be due, ignoring readiness.
///
/// Higher urgency first, then earlier `not_before`, then deep before
/// shallow, then earlier `scheduled_at`. Always yields an answer.
#[must_use]
pub fn cmp_future_entries(l: &SchedEntry, r: &SchedEntry) -> Ordering {
    r.urgency
        .cmp(&l.urgency)
        .then_with(|| l.schedule.not_before.cmp(&r.schedule.not_before))
        .then_with(|| cmp_levels(l.level, r.level))
        .then_with(|| l.schedule.scheduled_at.cmp(&r.schedule.scheduled_at))
}

/// Order two entries in the context of `now`.
///
/// Returns `None` when neither entry is ripe, since then there is nothing to
/// choose between. Otherwise higher urgency first, then a ripe entry before
/// an unripe one, then the [`cmp_future_entries`] tie-breakers.
#[must_use]
pub fn cmp_entries(now: UTime, l: &SchedEntry, r: &SchedEntry) -> Option<Ordering> {
    let l_ripe = l.is_ripe(now);
    let r_ripe = r.is_ripe(now);
    if !l_ripe && !r_ripe {
        return None;
    }
    Some(
        r.urgency
            .cmp(&l.urgency)
            .then_with(|| r_ripe.cmp(&l_ripe))
            .then_with(|| cmp_future_entries(l, r)),
    )
}
