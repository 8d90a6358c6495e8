//! Jitter sampling for periodic schedules.
//!
//! The random source is injected by the caller rather than drawn from a
//! process-wide generator, so schedule computation stays reproducible in
//! tests.

use rand::Rng;

/// Source of uniform samples in `[0, 1)`.
pub trait JitterSource {
    /// Draw the next sample. Implementations must stay within `[0, 1)`.
    fn sample_unit(&mut self) -> f64;
}

/// Jitter drawn from any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RandomJitter<R> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    /// Wrap a generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give the generator back.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> JitterSource for RandomJitter<R> {
    fn sample_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// A constant sample. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(f64);

impl FixedJitter {
    /// Largest value strictly below one.
    const UPPER: f64 = 1.0 - f64::EPSILON;

    /// Always sample `value`, clamped into range. NaN becomes zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, Self::UPPER))
    }

    /// No jitter at all.
    #[must_use]
    pub const fn none() -> Self {
        Self(0.0)
    }
}

impl JitterSource for FixedJitter {
    fn sample_unit(&mut self) -> f64 {
        self.0
    }
}
