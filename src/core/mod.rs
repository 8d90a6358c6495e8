//! Per-placement-group scrub scheduling: targets, ordering and policy.

pub mod compare;
pub mod error;
pub mod policy;
pub mod scrub_job;
pub mod target;

pub use compare::{cmp_entries, cmp_future_entries};
pub use error::{AppResult, SchedError};
pub use policy::{
    observes_allowed_hours, observes_load_limit, observes_max_concurrency,
    observes_noscrub_flags, requires_randomization, requires_reservation, UrgencyPolicy,
};
pub use scrub_job::{ScrubJob, ScrubJobDump, Selection};
pub use target::{SchedEntry, SchedTarget, ScheduleTimes};
