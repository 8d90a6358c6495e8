//! Restrictions and exemptions per urgency tier.
//!
//! These are pure functions of the urgency. The scheduling core itself only
//! consults [`requires_randomization`]; the rest are for the admission layer
//! that decides whether a ready target may actually start.

use crate::util::serde::Urgency;

/// Obeys administrator-set "no scrub" flags.
#[must_use]
pub fn observes_noscrub_flags(urgency: Urgency) -> bool {
    urgency < Urgency::AfterRepair
}

/// Obeys the configured scrub time window.
#[must_use]
pub fn observes_allowed_hours(urgency: Urgency) -> bool {
    urgency < Urgency::OperatorRequested
}

/// Deferred while node load exceeds the configured threshold.
#[must_use]
pub fn observes_load_limit(urgency: Urgency) -> bool {
    urgency < Urgency::AfterRepair
}

/// Must acquire replica reservations before starting.
#[must_use]
pub fn requires_reservation(urgency: Urgency) -> bool {
    urgency < Urgency::AfterRepair
}

/// Schedule times are jittered and deadlined from the interval config.
/// Every other tier carries an explicit target time.
#[must_use]
pub fn requires_randomization(urgency: Urgency) -> bool {
    urgency == Urgency::PeriodicRegular
}

/// Counted against the node-wide scrub concurrency cap.
#[must_use]
pub fn observes_max_concurrency(urgency: Urgency) -> bool {
    urgency < Urgency::OperatorRequested
}

/// Snapshot of every predicate for one urgency, for admission code that
/// wants the whole row at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct UrgencyPolicy {
    /// See [`observes_noscrub_flags`].
    pub observes_noscrub_flags: bool,
    /// See [`observes_allowed_hours`].
    pub observes_allowed_hours: bool,
    /// See [`observes_load_limit`].
    pub observes_load_limit: bool,
    /// See [`requires_reservation`].
    pub requires_reservation: bool,
    /// See [`requires_randomization`].
    pub requires_randomization: bool,
    /// See [`observes_max_concurrency`].
    pub observes_max_concurrency: bool,
}

impl UrgencyPolicy {
    /// Evaluate all predicates for `urgency`.
    #[must_use]
    pub fn for_urgency(urgency: Urgency) -> Self {
        Self {
            observes_noscrub_flags: observes_noscrub_flags(urgency),
            observes_allowed_hours: observes_allowed_hours(urgency),
            observes_load_limit: observes_load_limit(urgency),
            requires_reservation: requires_reservation(urgency),
            requires_randomization: requires_randomization(urgency),
            observes_max_concurrency: observes_max_concurrency(urgency),
        }
    }
}
