//! Wall-clock timestamps for the scrub schedule.
//!
//! [`UTime`] is a seconds + nanoseconds pair since the Unix epoch. The zero
//! value doubles as the "no deadline" sentinel and [`UTime::MAX`] marks a
//! target that is not ready at all.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::SchedError;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// A point in time, seconds and nanoseconds since the Unix epoch.
///
/// Ordering is lexicographic over `(secs, nanos)`; `nanos` is always kept
/// below one second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct UTime {
    secs: u64,
    nanos: u32,
}

impl UTime {
    /// The epoch. Also used as the "unset" deadline sentinel.
    pub const ZERO: Self = Self { secs: 0, nanos: 0 };
    /// The latest representable instant; a target at `MAX` is never ready.
    pub const MAX: Self = Self {
        secs: u64::MAX,
        nanos: NANOS_PER_SEC - 1,
    };

    /// Build a timestamp, carrying excess nanoseconds into seconds.
    #[must_use]
    pub const fn new(secs: u64, nanos: u32) -> Self {
        let carry = (nanos / NANOS_PER_SEC) as u64;
        Self {
            secs: secs.saturating_add(carry),
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// Whole seconds since the epoch.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs, nanos: 0 }
    }

    /// Seconds component.
    #[must_use]
    pub const fn secs(self) -> u64 {
        self.secs
    }

    /// Sub-second component in nanoseconds.
    #[must_use]
    pub const fn nanos(self) -> u32 {
        self.nanos
    }

    /// True for the epoch / "no deadline" sentinel.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// Current wall-clock time. The scheduling core never calls this itself;
    /// callers sample the clock once per tick and pass it in.
    #[must_use]
    pub fn now() -> Self {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(Self::ZERO, Self::from)
    }

    /// Advance by a (possibly fractional) number of seconds.
    ///
    /// The integral part is added to `secs` and the fractional part,
    /// truncated (not rounded) to whole nanoseconds, to `nanos`. Decimal
    /// fractions that are inexact in binary can land one nanosecond low:
    /// `1.15` adds `1s + 149_999_999ns`. Truncation keeps a jitter drawn
    /// from `[0, 1)` strictly below its upper bound. Results saturate at
    /// [`UTime::ZERO`] and [`UTime::MAX`]; a NaN offset leaves the
    /// timestamp unchanged.
    #[must_use]
    pub fn add_offset(self, seconds: f64) -> Self {
        if seconds.is_nan() {
            return self;
        }
        if seconds.is_infinite() {
            return if seconds > 0.0 { Self::MAX } else { Self::ZERO };
        }
        // float-to-int `as` casts saturate, which is what we want here
        #[allow(clippy::cast_possible_truncation)]
        let whole = seconds.trunc() as i64;
        #[allow(clippy::cast_possible_truncation)]
        let frac_ns = (seconds.fract() * f64::from(NANOS_PER_SEC)) as i64;

        let nanos = i128::from(self.nanos) + i128::from(frac_ns);
        let secs = i128::from(self.secs)
            + i128::from(whole)
            + nanos.div_euclid(i128::from(NANOS_PER_SEC));
        let nanos = nanos.rem_euclid(i128::from(NANOS_PER_SEC));

        if secs < 0 {
            return Self::ZERO;
        }
        match (u64::try_from(secs), u32::try_from(nanos)) {
            (Ok(secs), Ok(nanos)) => Self { secs, nanos },
            _ => Self::MAX,
        }
    }
}

/// Free-function form of [`UTime::add_offset`].
#[must_use]
pub fn add_offset(t: UTime, seconds: f64) -> UTime {
    t.add_offset(seconds)
}

impl From<Duration> for UTime {
    fn from(d: Duration) -> Self {
        Self {
            secs: d.as_secs(),
            nanos: d.subsec_nanos(),
        }
    }
}

impl Add<Duration> for UTime {
    type Output = Self;

    /// Saturating addition.
    fn add(self, rhs: Duration) -> Self {
        let nanos = self.nanos + rhs.subsec_nanos();
        let carry = u64::from(nanos / NANOS_PER_SEC);
        match self
            .secs
            .checked_add(rhs.as_secs())
            .and_then(|s| s.checked_add(carry))
        {
            Some(secs) => Self {
                secs,
                nanos: nanos % NANOS_PER_SEC,
            },
            None => Self::MAX,
        }
    }
}

impl fmt::Display for UTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

impl FromStr for UTime {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchedError::InvalidTimestamp(s.to_string());
        let (secs, frac) = s.split_once('.').unwrap_or((s, ""));
        let secs = secs.parse::<u64>().map_err(|_| invalid())?;
        if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // right-pad so "5" means 500ms, not 5ns
        let nanos = if frac.is_empty() {
            0
        } else {
            format!("{frac:0<9}").parse::<u32>().map_err(|_| invalid())?
        };
        Ok(Self { secs, nanos })
    }
}

impl From<UTime> for String {
    fn from(t: UTime) -> Self {
        t.to_string()
    }
}

impl TryFrom<String> for UTime {
    type Error = SchedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
