//! Linear interpolation of a value into a 0..1 fraction of a range.

use crate::{SafetyError, SafetyResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A validated `[lo, hi]` interval used to express a value as a fraction of it.
///
/// Construction checks `lo < hi` once, so mapping values on the control path
/// cannot fail.
///
/// # Examples
///
/// ```
/// use vcu_safety::LinearRange;
///
/// let ramp = LinearRange::new(75_000.0, 80_000.0)?;
/// assert!((ramp.fraction(76_000.0) - 0.2).abs() < 1e-6);
/// assert_eq!(ramp.fraction_clamped(90_000.0), 1.0);
/// # Ok::<(), vcu_safety::SafetyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearRange {
    lo: f32,
    hi: f32,
}

impl LinearRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError::InvalidRange`] if either bound is non-finite or
    /// `lo >= hi`.
    pub fn new(lo: f32, hi: f32) -> SafetyResult<Self> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(SafetyError::InvalidRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Range for bounds already checked by `SafetyThresholds::validate`.
    pub(crate) fn from_validated(lo: f32, hi: f32) -> Self {
        debug_assert!(lo < hi, "range bounds must be validated before use");
        Self { lo, hi }
    }

    /// Lower bound.
    pub fn lo(&self) -> f32 {
        self.lo
    }

    /// Upper bound.
    pub fn hi(&self) -> f32 {
        self.hi
    }

    /// `(value - lo) / (hi - lo)`, unclamped.
    pub fn fraction(&self, value: f32) -> f32 {
        (value - self.lo) / (self.hi - self.lo)
    }

    /// Same as [`fraction`](Self::fraction) but limited to `[0.0, 1.0]`.
    ///
    /// A NaN input maps to `0.0`.
    pub fn fraction_clamped(&self, value: f32) -> f32 {
        let f = self.fraction(value);
        if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
    }

    /// Map `value` with or without clamping.
    pub fn map(&self, value: f32, clamp: bool) -> f32 {
        if clamp {
            self.fraction_clamped(value)
        } else {
            self.fraction(value)
        }
    }
}

/// One-shot form of [`LinearRange::map`].
///
/// # Errors
///
/// Returns [`SafetyError::InvalidRange`] when `lo < hi` does not hold.
pub fn fraction(value: f32, lo: f32, hi: f32, clamp: bool) -> SafetyResult<f32> {
    LinearRange::new(lo, hi).map(|range| range.map(value, clamp))
}
