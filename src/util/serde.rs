//! Shared identifiers and enums used across the scheduler.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::SchedError;

/// Numeric identifier of a storage node.
pub type NodeId = i32;

/// Placement group identity: pool, placement seed and optional shard.
///
/// Rendered as `<pool>.<seed-hex>` with an `s<shard>` suffix for sharded
/// (erasure-coded) groups, e.g. `3.1f` or `3.1fs2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PgId {
    /// Pool number.
    pub pool: u64,
    /// Placement seed within the pool.
    pub seed: u32,
    /// Shard for erasure-coded pools.
    pub shard: Option<u8>,
}

impl PgId {
    /// Unsharded placement group.
    #[must_use]
    pub const fn new(pool: u64, seed: u32) -> Self {
        Self {
            pool,
            seed,
            shard: None,
        }
    }

    /// Shard of an erasure-coded placement group.
    #[must_use]
    pub const fn with_shard(mut self, shard: u8) -> Self {
        self.shard = Some(shard);
        self
    }
}

impl fmt::Display for PgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:x}", self.pool, self.seed)?;
        if let Some(shard) = self.shard {
            write!(f, "s{shard}")?;
        }
        Ok(())
    }
}

impl FromStr for PgId {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchedError::InvalidPgId(s.to_string());
        let (pool, rest) = s.split_once('.').ok_or_else(invalid)?;
        let (seed, shard) = match rest.split_once('s') {
            Some((seed, shard)) => (seed, Some(shard.parse::<u8>().map_err(|_| invalid())?)),
            None => (rest, None),
        };
        Ok(Self {
            pool: pool.parse().map_err(|_| invalid())?,
            seed: u32::from_str_radix(seed, 16).map_err(|_| invalid())?,
            shard,
        })
    }
}

impl From<PgId> for String {
    fn from(pg: PgId) -> Self {
        pg.to_string()
    }
}

impl TryFrom<String> for PgId {
    type Error = SchedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Which scrub variant a schedule target represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrubLevel {
    /// Cheap metadata-only pass.
    Shallow,
    /// Full data pass.
    Deep,
}

impl fmt::Display for ScrubLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shallow => write!(f, "shallow"),
            Self::Deep => write!(f, "deep"),
        }
    }
}

/// Why a scrub is scheduled, ordered from least to most urgent.
///
/// Higher urgency always wins target selection. The restrictions each tier
/// observes are in [`crate::core::policy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Not scheduled. Reset state; never ready.
    #[default]
    Off,
    /// The regular periodic scrub.
    PeriodicRegular,
    /// A periodic scrub that has passed its deadline.
    Overdue,
    /// Follow-up scrub after a repair completed.
    AfterRepair,
    /// Explicitly requested by an administrator.
    OperatorRequested,
    /// A deep scrub with repair is required after errors were found.
    MustRepair,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Off => "off",
            Self::PeriodicRegular => "periodic_regular",
            Self::Overdue => "overdue",
            Self::AfterRepair => "after_repair",
            Self::OperatorRequested => "operator_requested",
            Self::MustRepair => "must_repair",
        };
        f.write_str(s)
    }
}

/// The reason a target's readiness was last pushed back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayCause {
    /// No delay recorded.
    #[default]
    None,
    /// Replica reservation was denied.
    Replicas,
    /// Blocked by no-scrub flags.
    Flags,
    /// The placement group was not in a scrubbable state.
    PgState,
    /// Outside the allowed scrub hours.
    Time,
    /// Node-local resources (concurrency or load) were exhausted.
    LocalResources,
    /// A started scrub was aborted.
    Aborted,
    /// Configuration changed the scrub interval.
    Interval,
    /// Scrub parameters were rejected.
    ScrubParams,
}

impl fmt::Display for DelayCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "ok",
            Self::Replicas => "replicas",
            Self::Flags => "noscrub",
            Self::PgState => "pg-state",
            Self::Time => "time/period",
            Self::LocalResources => "local-cnt",
            Self::Aborted => "aborted",
            Self::Interval => "interval",
            Self::ScrubParams => "scrub-params",
        };
        f.write_str(s)
    }
}

/// Whether schedule recomputation may push an already-ready periodic target
/// into the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayReady {
    /// Recompute with jitter even if the target is already due.
    DelayReady,
    /// Leave an already-due target eligible.
    NoDelay,
}
