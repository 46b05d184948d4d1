//! Cross-sensor plausibility checks.
//!
//! Two checks live here:
//!
//! - **Pedal sync**: the two torque encoder channels must agree within the
//!   configured travel deviation. Recomputed every cycle.
//! - **Brake/throttle plausibility**: a latch. It sets when the brakes are
//!   actuated while the accelerator is past the set travel, and it only
//!   releases once the accelerator drops below the clear travel, whatever the
//!   brake does.
//!
//! ```text
//!            brake > 2 % && tps > 25 %
//! ┌─────────┐ ─────────────────────────▶ ┌─────────┐
//! │ Normal  │                            │ Latched │ ◀─┐ otherwise
//! └─────────┘ ◀───────────────────────── └─────────┘ ──┘
//!                     tps < 5 %
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{SafetyThresholds, TorqueEncoderReading};

/// Result of comparing the two torque encoder channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PedalSync {
    /// Absolute travel difference between the channels.
    pub deviation: f32,
    /// Deviation strictly exceeded the allowed maximum.
    pub out_of_sync: bool,
}

/// Slack for f32 rounding when comparing against the allowed deviation.
const SYNC_TOLERANCE: f32 = 1e-6;

/// Compare channel travel fractions.
///
/// A deviation equal to `max_deviation` (within f32 rounding) is still in
/// sync. A non-finite deviation counts as out of sync.
pub fn pedal_sync(tps: &TorqueEncoderReading, max_deviation: f32) -> PedalSync {
    let [tps0, tps1] = &tps.channels;
    let deviation = (tps1.travel - tps0.travel).abs();
    PedalSync {
        deviation,
        out_of_sync: !(deviation <= max_deviation + SYNC_TOLERANCE),
    }
}

/// Latch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LatchState {
    /// No implausibility.
    #[default]
    Normal,
    /// Implausibility seen and not yet released.
    Latched,
}

/// A state change reported by [`ImplausibilityLatch::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchTransition {
    /// `Normal -> Latched`.
    Latched,
    /// `Latched -> Normal`.
    Released,
}

/// Brake/throttle plausibility latch.
#[derive(Debug, Clone, Default)]
pub struct ImplausibilityLatch {
    state: LatchState,
}

impl ImplausibilityLatch {
    /// A latch in the `Normal` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LatchState {
        self.state
    }

    /// Returns true while latched.
    pub fn is_latched(&self) -> bool {
        self.state == LatchState::Latched
    }

    /// Advance the latch with this cycle's travel fractions.
    ///
    /// Returns the transition taken, if any.
    pub fn update(
        &mut self,
        tps_travel: f32,
        bps_travel: f32,
        thresholds: &SafetyThresholds,
    ) -> Option<LatchTransition> {
        match self.state {
            LatchState::Normal => {
                if bps_travel > thresholds.brake_actuated_travel
                    && tps_travel > thresholds.implausibility_set_travel
                {
                    self.state = LatchState::Latched;
                    return Some(LatchTransition::Latched);
                }
                None
            }
            LatchState::Latched => {
                if tps_travel < thresholds.implausibility_clear_travel {
                    self.state = LatchState::Normal;
                    return Some(LatchTransition::Released);
                }
                None
            }
        }
    }

    /// Force the latch back to `Normal`.
    pub fn reset(&mut self) {
        self.state = LatchState::Normal;
    }
}
