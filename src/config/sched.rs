//! Scrub scheduling configuration.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, SchedError};
use crate::util::serde::ScrubLevel;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_PATH_ENV: &str = "SCRUB_SCHED_CONFIG";

const DAY_SECS: f64 = 24.0 * 60.0 * 60.0;

/// Interval and deadline settings applied when recomputing a schedule.
///
/// Durations are in (possibly fractional) seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedConf {
    /// Period between shallow scrubs.
    pub shallow_interval_secs: f64,
    /// Period between deep scrubs.
    pub deep_interval_secs: f64,
    /// Upper bound of the jitter, as a fraction of the interval.
    pub interval_randomize_ratio: f64,
    /// Shallow deadline, measured from the last shallow scrub. Unset means
    /// no deadline.
    pub max_shallow_secs: Option<f64>,
    /// Deep deadline, measured from the last deep scrub. Unset means no
    /// deadline.
    pub max_deep_secs: Option<f64>,
}

impl Default for SchedConf {
    fn default() -> Self {
        Self {
            shallow_interval_secs: DAY_SECS,
            deep_interval_secs: 7.0 * DAY_SECS,
            interval_randomize_ratio: 0.5,
            max_shallow_secs: Some(7.0 * DAY_SECS),
            max_deep_secs: None,
        }
    }
}

impl SchedConf {
    /// Interval for `level`.
    #[must_use]
    pub const fn interval_for(&self, level: ScrubLevel) -> f64 {
        match level {
            ScrubLevel::Shallow => self.shallow_interval_secs,
            ScrubLevel::Deep => self.deep_interval_secs,
        }
    }

    /// Deadline extension for `level`, if one is configured.
    #[must_use]
    pub const fn max_extension_for(&self, level: ScrubLevel) -> Option<f64> {
        match level {
            ScrubLevel::Shallow => self.max_shallow_secs,
            ScrubLevel::Deep => self.max_deep_secs,
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// [`SchedError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SchedError> {
        let invalid = |msg: &str| Err(SchedError::InvalidConfig(msg.into()));
        if !(self.shallow_interval_secs.is_finite() && self.shallow_interval_secs > 0.0) {
            return invalid("shallow_interval_secs must be a positive number");
        }
        if !(self.deep_interval_secs.is_finite() && self.deep_interval_secs > 0.0) {
            return invalid("deep_interval_secs must be a positive number");
        }
        if !(self.interval_randomize_ratio.is_finite() && self.interval_randomize_ratio >= 0.0) {
            return invalid("interval_randomize_ratio must be a non-negative number");
        }
        for (name, ext) in [
            ("max_shallow_secs", self.max_shallow_secs),
            ("max_deep_secs", self.max_deep_secs),
        ] {
            if let Some(v) = ext {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(SchedError::InvalidConfig(format!(
                        "{name} must be a non-negative number"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate. Missing fields
    /// take their defaults.
    ///
    /// # Errors
    ///
    /// [`SchedError::Parse`] on malformed JSON, or a validation error.
    pub fn from_json_str(input: &str) -> Result<Self, SchedError> {
        let cfg: Self =
            serde_json::from_str(input).map_err(|e| SchedError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// I/O, parse and validation failures, with the path as context.
    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scrub config {}", path.display()))?;
        let cfg = Self::from_json_str(&raw)
            .with_context(|| format!("invalid scrub config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded scrub schedule config");
        Ok(cfg)
    }

    /// Load `.env` if present, then read the file named by
    /// [`CONFIG_PATH_ENV`], falling back to defaults when it is unset.
    ///
    /// # Errors
    ///
    /// See [`Self::load_from_path`].
    pub fn load_from_env_and_defaults() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_path(path),
            Err(_) => {
                tracing::debug!("{CONFIG_PATH_ENV} not set, using default scrub schedule config");
                Ok(Self::default())
            }
        }
    }
}
