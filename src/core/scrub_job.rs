//! The per-placement-group scrub job.
//!
//! A [`ScrubJob`] owns one shallow and one deep [`SchedTarget`]. It decides
//! when each level is next due (interval, jitter and deadline), which level
//! goes first, and how far a failed attempt pushes a level back.
//!
//! The job does no locking of its own: the owning placement group's lock
//! serializes every call. Nothing here reads the clock; `now` is always
//! supplied by the caller.

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SchedConf;
use crate::util::clock::UTime;
use crate::util::jitter::JitterSource;
use crate::util::serde::{DelayCause, DelayReady, NodeId, PgId, ScrubLevel, Urgency};

use super::compare::{cmp_entries, cmp_future_entries};
use super::policy::requires_randomization;
use super::target::SchedTarget;

/// Outcome of asking which level is ready to run now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// This level is ready and is the one to run.
    Ready(ScrubLevel),
    /// Nothing is ready yet.
    NotReady,
}

impl Selection {
    /// The selected level, if any.
    #[must_use]
    pub const fn level(self) -> Option<ScrubLevel> {
        match self {
            Self::Ready(level) => Some(level),
            Self::NotReady => None,
        }
    }

    /// True for [`Selection::Ready`].
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Snapshot of the earliest target, as reported to monitoring tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrubJobDump {
    /// Placement group.
    pub pgid: PgId,
    /// `not_before` of the earliest target.
    pub sched_time: UTime,
    /// `scheduled_at` of the earliest target.
    pub orig_sched_time: UTime,
    /// Deadline of the earliest target.
    pub deadline: UTime,
    /// Urgency is operator-requested or higher.
    pub forced: bool,
}

/// Scheduling state of one placement group on one node.
#[derive(Debug, Clone)]
pub struct ScrubJob {
    pgid: PgId,
    whoami: NodeId,
    registered: bool,
    shallow_target: SchedTarget,
    deep_target: SchedTarget,
}

impl ScrubJob {
    /// A fresh, unregistered job with both targets in their reset state.
    #[must_use]
    pub fn new(pgid: PgId, node_id: NodeId) -> Self {
        Self {
            pgid,
            whoami: node_id,
            registered: false,
            shallow_target: SchedTarget::new(pgid, ScrubLevel::Shallow),
            deep_target: SchedTarget::new(pgid, ScrubLevel::Deep),
        }
    }

    /// Placement group this job schedules.
    #[must_use]
    pub const fn pgid(&self) -> PgId {
        self.pgid
    }

    /// Node hosting the placement group.
    #[must_use]
    pub const fn node_id(&self) -> NodeId {
        self.whoami
    }

    /// Whether the placement group currently takes part in scheduling.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.registered
    }

    /// Set by the dispatcher on creation, removal or role change.
    pub fn set_registered(&mut self, registered: bool) {
        self.registered = registered;
    }

    /// The target for `level`.
    #[must_use]
    pub const fn target(&self, level: ScrubLevel) -> &SchedTarget {
        match level {
            ScrubLevel::Shallow => &self.shallow_target,
            ScrubLevel::Deep => &self.deep_target,
        }
    }

    /// Mutable access to the target for `level`.
    pub fn target_mut(&mut self, level: ScrubLevel) -> &mut SchedTarget {
        match level {
            ScrubLevel::Shallow => &mut self.shallow_target,
            ScrubLevel::Deep => &mut self.deep_target,
        }
    }

    /// True if the dispatch queue holds either target.
    #[must_use]
    pub const fn is_queued(&self) -> bool {
        self.shallow_target.queued || self.deep_target.queued
    }

    /// Both targets entered the dispatch queue.
    pub fn set_both_targets_queued(&mut self) {
        self.shallow_target.queued = true;
        self.deep_target.queued = true;
    }

    /// Both targets left the dispatch queue.
    pub fn clear_both_targets_queued(&mut self) {
        self.shallow_target.queued = false;
        self.deep_target.queued = false;
    }

    /// Recompute the schedule of one level.
    ///
    /// Explicitly requested targets (any urgency that is not randomized)
    /// keep their `scheduled_at` and have `not_before` and `deadline`
    /// collapsed onto it.
    ///
    /// Periodic targets are anchored at `last_scrub`. A target that is already
    /// due stays due unless `delay_ready` asks otherwise; in that case, or
    /// if `last_scrub` lies ahead of `now`, the target moves one interval
    /// plus a jitter of up to `interval * interval_randomize_ratio` forward.
    /// The deadline is `last_scrub` plus the level's configured extension,
    /// or [`UTime::ZERO`] when none is set. `not_before` never falls below
    /// `last_scrub`.
    pub fn adjust_schedule<J: JitterSource + ?Sized>(
        &mut self,
        level: ScrubLevel,
        last_scrub: UTime,
        conf: &SchedConf,
        now: UTime,
        delay_ready: DelayReady,
        jitter: &mut J,
    ) {
        tracing::debug!(
            pgid = %self.pgid,
            osd = self.whoami,
            %level,
            current = %self.target(level),
            last_stamp = %last_scrub,
            also_ready = delay_ready == DelayReady::DelayReady,
            "adjusting schedule"
        );

        let target = self.target_mut(level);
        let urgency = target.urgency();
        let times = &mut target.sched_info.schedule;

        if requires_randomization(urgency) {
            let mut adj_target = last_scrub;
            if delay_ready == DelayReady::DelayReady || last_scrub > now {
                let interval = conf.interval_for(level);
                adj_target = adj_target
                    .add_offset(interval)
                    .add_offset(interval * conf.interval_randomize_ratio * jitter.sample_unit());
            }

            times.deadline = conf
                .max_extension_for(level)
                .map_or(UTime::ZERO, |ext| last_scrub.add_offset(ext));
            times.scheduled_at = adj_target;
            times.not_before = last_scrub.max(adj_target);
        } else {
            times.not_before = times.scheduled_at;
            times.deadline = times.scheduled_at;
        }

        let adjusted = self.target(level).schedule();
        tracing::debug!(
            pgid = %self.pgid,
            osd = self.whoami,
            %level,
            not_before = %adjusted.not_before,
            scheduled_at = %adjusted.scheduled_at,
            deadline = %adjusted.deadline,
            state = %self.state_desc(),
            "schedule adjusted"
        );
    }

    /// Push `level` back after a failed attempt to start it.
    ///
    /// `not_before` becomes `max(now, not_before) + delay`, so repeated
    /// calls only ever move it forward. `cause` is kept for diagnostics.
    pub fn delay_on_failure(
        &mut self,
        level: ScrubLevel,
        delay: Duration,
        cause: DelayCause,
        now: UTime,
    ) -> &mut SchedTarget {
        let (pgid, whoami) = (self.pgid, self.whoami);
        let target = self.target_mut(level);
        let sched = &mut target.sched_info.schedule;
        sched.not_before = now.max(sched.not_before) + delay;
        target.sched_info.last_issue = cause;

        tracing::debug!(
            pgid = %pgid,
            osd = whoami,
            %level,
            %cause,
            delay_secs = delay.as_secs_f64(),
            not_before = %target.sched_info.schedule.not_before,
            "target delayed"
        );
        target
    }

    /// Raise every periodic target whose deadline has passed to
    /// [`Urgency::Overdue`] and collapse its deadline onto `scheduled_at`.
    /// `not_before` only moves forward, so a pending backoff is kept.
    /// Returns whether any target changed.
    pub fn escalate_overdue(&mut self, now: UTime) -> bool {
        let mut changed = false;
        for level in [ScrubLevel::Shallow, ScrubLevel::Deep] {
            let target = self.target_mut(level);
            if target.is_overdue(now) {
                target.raise_urgency_to(Urgency::Overdue);
                let times = &mut target.sched_info.schedule;
                times.not_before = times.not_before.max(times.scheduled_at);
                times.deadline = times.scheduled_at;
                tracing::info!(pgid = %self.pgid, %level, "scrub target is overdue");
                changed = true;
            }
        }
        changed
    }

    /// The level to run now, if any.
    ///
    /// Picks between the two targets with [`cmp_entries`] and returns the
    /// winner only if it is ripe. A ready low-urgency target does not
    /// override a higher-urgency one that is not yet due.
    #[must_use]
    pub fn earliest_eligible(&self, now: UTime) -> Selection {
        let Some(ord) = cmp_entries(
            now,
            self.shallow_target.queued_element(),
            self.deep_target.queued_element(),
        ) else {
            return Selection::NotReady;
        };
        let winner = if ord == Ordering::Less {
            &self.shallow_target
        } else {
            &self.deep_target
        };
        if winner.is_ripe(now) {
            Selection::Ready(winner.level())
        } else {
            Selection::NotReady
        }
    }

    /// Level of the soonest-due target, ready or not.
    #[must_use]
    pub fn earliest_level(&self) -> ScrubLevel {
        match cmp_future_entries(
            self.shallow_target.queued_element(),
            self.deep_target.queued_element(),
        ) {
            Ordering::Less => ScrubLevel::Shallow,
            _ => ScrubLevel::Deep,
        }
    }

    /// The soonest-due target, ready or not.
    #[must_use]
    pub fn earliest_target(&self) -> &SchedTarget {
        self.target(self.earliest_level())
    }

    /// Mutable form of [`Self::earliest_target`].
    pub fn earliest_target_mut(&mut self) -> &mut SchedTarget {
        let level = self.earliest_level();
        self.target_mut(level)
    }

    /// `not_before` of the earliest target.
    #[must_use]
    pub fn get_sched_time(&self) -> UTime {
        self.earliest_target().schedule().not_before
    }

    /// Human-readable scheduling status.
    ///
    /// `deep_expected` is the caller's expectation that the next run is a
    /// deep scrub; it is noted when a shallow target is the one ready.
    #[must_use]
    pub fn scheduling_state(&self, now: UTime, deep_expected: bool) -> String {
        if !self.registered {
            return "not registered for scrubbing".to_string();
        }
        if !self.is_queued() {
            // off the queue while registered: a scrub is in flight
            return "scrubbing".to_string();
        }

        match self.earliest_eligible(now) {
            Selection::Ready(level) => {
                let ready = self.target(level);
                format!(
                    "queued for {}scrub at {}{}",
                    if ready.is_deep() { "deep " } else { "" },
                    ready.schedule().scheduled_at,
                    if deep_expected && !ready.is_deep() {
                        " (deep scrub expected)"
                    } else {
                        ""
                    },
                )
            }
            Selection::NotReady => {
                let nearest = self.earliest_target();
                format!(
                    "{}scrub scheduled @ {} ({})",
                    if nearest.is_deep() { "deep " } else { "" },
                    nearest.schedule().not_before,
                    nearest.schedule().scheduled_at,
                )
            }
        }
    }

    /// Short registration/queue summary for log lines.
    #[must_use]
    pub fn state_desc(&self) -> String {
        format!(
            "{} queued:{}",
            if self.registered { "registered" } else { "not-registered" },
            self.is_queued()
        )
    }

    /// Snapshot of the earliest target for introspection tools.
    #[must_use]
    pub fn dump(&self) -> ScrubJobDump {
        let entry = self.earliest_target().queued_element();
        ScrubJobDump {
            pgid: self.pgid,
            sched_time: entry.schedule.not_before,
            orig_sched_time: entry.schedule.scheduled_at,
            deadline: entry.schedule.deadline,
            forced: entry.urgency >= Urgency::OperatorRequested,
        }
    }
}

impl fmt::Display for ScrubJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pg[{}] osd.{} {} | {} | {}",
            self.pgid,
            self.whoami,
            self.state_desc(),
            self.shallow_target,
            self.deep_target
        )
    }
}
