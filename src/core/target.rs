//! Per-level schedule records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::clock::UTime;
use crate::util::serde::{DelayCause, PgId, ScrubLevel, Urgency};

/// The three timestamps governing one scrub level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTimes {
    /// Nominal due time; shown to operators and anchors the deadline.
    pub scheduled_at: UTime,
    /// Escalation time. [`UTime::ZERO`] means no deadline is configured.
    pub deadline: UTime,
    /// Earliest instant the target may be considered ready.
    pub not_before: UTime,
}

impl Default for ScheduleTimes {
    /// Not ready: every stamp at [`UTime::MAX`].
    fn default() -> Self {
        Self {
            scheduled_at: UTime::MAX,
            deadline: UTime::MAX,
            not_before: UTime::MAX,
        }
    }
}

impl ScheduleTimes {
    /// True when a deadline is configured.
    #[must_use]
    pub const fn has_deadline(&self) -> bool {
        !self.deadline.is_zero()
    }
}

/// The schedule of one (placement group, level) pair as seen by the
/// dispatch queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedEntry {
    /// Owning placement group.
    pub pgid: PgId,
    /// Shallow or deep.
    pub level: ScrubLevel,
    /// Why the scrub is scheduled.
    pub urgency: Urgency,
    /// Timing.
    pub schedule: ScheduleTimes,
    /// Cause of the most recent delay.
    pub last_issue: DelayCause,
}

impl SchedEntry {
    /// Reset-state entry for `(pgid, level)`.
    #[must_use]
    pub fn new(pgid: PgId, level: ScrubLevel) -> Self {
        Self {
            pgid,
            level,
            urgency: Urgency::Off,
            schedule: ScheduleTimes::default(),
            last_issue: DelayCause::None,
        }
    }

    /// Scheduled, and its not-before time has been reached.
    #[must_use]
    pub fn is_ripe(&self, now: UTime) -> bool {
        self.urgency > Urgency::Off && self.schedule.not_before <= now
    }
}

/// One scrub level of a [`crate::core::ScrubJob`].
///
/// `queued` mirrors membership in the external dispatch queue; the queue
/// owns it and flips it through the job's bulk setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedTarget {
    pub(crate) sched_info: SchedEntry,
    pub(crate) queued: bool,
}

impl SchedTarget {
    /// A not-ready, unqueued target at the lowest urgency.
    #[must_use]
    pub fn new(pgid: PgId, level: ScrubLevel) -> Self {
        Self {
            sched_info: SchedEntry::new(pgid, level),
            queued: false,
        }
    }

    /// Restore the defaults for this target's placement group and level.
    pub fn reset(&mut self) {
        *self = Self::new(self.sched_info.pgid, self.sched_info.level);
    }

    /// Raise the urgency to at least `u`. Never lowers it.
    pub fn raise_urgency_to(&mut self, u: Urgency) {
        self.sched_info.urgency = self.sched_info.urgency.max(u);
    }

    /// Set the nominal time directly, as explicit requests do before
    /// raising the urgency. Readiness follows on the next
    /// [`crate::core::ScrubJob::adjust_schedule`].
    pub fn set_scheduled_at(&mut self, t: UTime) {
        self.sched_info.schedule.scheduled_at = t;
    }

    /// The level this target represents.
    #[must_use]
    pub const fn level(&self) -> ScrubLevel {
        self.sched_info.level
    }

    /// Shorthand for `level() == Deep`.
    #[must_use]
    pub fn is_deep(&self) -> bool {
        self.sched_info.level == ScrubLevel::Deep
    }

    /// Current urgency.
    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        self.sched_info.urgency
    }

    /// Timing of this target.
    #[must_use]
    pub const fn schedule(&self) -> &ScheduleTimes {
        &self.sched_info.schedule
    }

    /// Cause of the most recent delay.
    #[must_use]
    pub const fn last_issue(&self) -> DelayCause {
        self.sched_info.last_issue
    }

    /// Whether the dispatch queue holds this target.
    #[must_use]
    pub const fn is_queued(&self) -> bool {
        self.queued
    }

    /// The entry as handed to the dispatch queue.
    #[must_use]
    pub const fn queued_element(&self) -> &SchedEntry {
        &self.sched_info
    }

    /// See [`SchedEntry::is_ripe`].
    #[must_use]
    pub fn is_ripe(&self, now: UTime) -> bool {
        self.sched_info.is_ripe(now)
    }

    /// A periodic target whose configured deadline has passed.
    #[must_use]
    pub fn is_overdue(&self, now: UTime) -> bool {
        let sched = &self.sched_info.schedule;
        self.sched_info.urgency == Urgency::PeriodicRegular
            && sched.has_deadline()
            && sched.deadline <= now
    }
}

impl fmt::Display for SchedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.sched_info;
        write!(
            f,
            "{}/{}: nb:{} target:{} deadline:{} urgency:{} issue:{}{}",
            e.pgid,
            if self.is_deep() { "dp" } else { "sh" },
            e.schedule.not_before,
            e.schedule.scheduled_at,
            e.schedule.deadline,
            e.urgency,
            e.last_issue,
            if self.queued { " queued" } else { "" },
        )
    }
}
