//! # Scrub Sched
//!
//! Per-placement-group scheduling state for background consistency checks
//! ("scrubs") in a replicated storage cluster.
//!
//! Every placement group (PG) hosted on a node carries one [`core::ScrubJob`].
//! The job tracks two independently aged targets, a cheap *shallow* pass and
//! an expensive *deep* pass, and answers the questions a node-wide dispatcher
//! asks on every scheduling tick:
//!
//! - **What is ready now?** [`core::ScrubJob::earliest_eligible`]
//! - **What is due soonest, ready or not?** [`core::ScrubJob::earliest_target`]
//! - **When is the next due time after a scrub or config change?**
//!   [`core::ScrubJob::adjust_schedule`]
//! - **How far back does a failed attempt push a level?**
//!   [`core::ScrubJob::delay_on_failure`]
//!
//! The job never executes a scrub, never reads the clock and never locks; the
//! caller passes `now`, holds the PG lock and owns the dispatch queue.
//!
//! ## Urgency
//!
//! Each target carries an [`util::Urgency`]. Higher urgency always wins
//! target selection. Only periodic targets are jittered and deadlined;
//! explicit requests keep the time they were given. The admission layer
//! consults [`core::policy`] to learn which restrictions a tier observes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use scrub_sched::config::SchedConf;
//! use scrub_sched::core::{ScrubJob, Selection};
//! use scrub_sched::util::{DelayReady, PgId, RandomJitter, ScrubLevel, UTime, Urgency};
//!
//! let conf = SchedConf::load_from_env_and_defaults()?;
//! let mut jitter = RandomJitter::new(SmallRng::from_os_rng());
//! let mut job = ScrubJob::new(PgId::new(3, 0x1f), 0);
//! job.set_registered(true);
//!
//! let now = UTime::now();
//! for level in [ScrubLevel::Shallow, ScrubLevel::Deep] {
//!     job.target_mut(level).raise_urgency_to(Urgency::PeriodicRegular);
//!     job.adjust_schedule(level, last_stamp(level), &conf, now, DelayReady::NoDelay, &mut jitter);
//! }
//! job.set_both_targets_queued();
//!
//! if let Selection::Ready(level) = job.earliest_eligible(now) {
//!     // hand (pg, level) to the scrub engine
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Per-PG scheduling state, target ordering and urgency policy.
pub mod core;
/// Configuration snapshot for schedule recomputation.
pub mod config;
/// Timestamps, jitter sources, identifiers and telemetry.
pub mod util;
