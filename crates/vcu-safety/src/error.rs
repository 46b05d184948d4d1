//! Error types for safety configuration.
//!
//! Nothing on the per-cycle path returns these. Sensor and driver failures are
//! reported as fault bits; errors only come out of building ranges and
//! validating thresholds.

use thiserror::Error;

/// Safety configuration errors.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SafetyError {
    /// A linear range was built with `lo >= hi` or a non-finite bound.
    #[error("Invalid range: lower bound {lo} must be finite and below upper bound {hi}")]
    InvalidRange {
        /// Lower bound that was supplied.
        lo: f32,
        /// Upper bound that was supplied.
        hi: f32,
    },

    /// A threshold is outside its permitted domain.
    #[error("Invalid threshold '{name}': {reason}")]
    InvalidThreshold {
        /// Name of the offending threshold field.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl SafetyError {
    /// Create a new invalid threshold error.
    pub fn invalid_threshold(name: &'static str, reason: &'static str) -> Self {
        SafetyError::InvalidThreshold { name, reason }
    }

    /// Name of the threshold that failed validation, if any.
    pub fn threshold_name(&self) -> Option<&'static str> {
        match self {
            SafetyError::InvalidThreshold { name, .. } => Some(name),
            SafetyError::InvalidRange { .. } => None,
        }
    }
}

/// Result type for safety configuration operations.
pub type SafetyResult<T> = Result<T, SafetyError>;
