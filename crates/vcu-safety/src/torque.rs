//! Torque limiting.
//!
//! The limiter scales the motor controller's torque command by a multiplier
//! in `[0.0, 1.0]`. Hard-zero conditions are checked first; otherwise the
//! multiplier is the minimum over the power envelope ramp and the BMS
//! current-limit ramp.
//!
//! # RT Safety
//!
//! No allocation, no branching on unbounded data, constant work per call.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    BatteryManagement, FaultFlags, LinearRange, MotorControl, NoticeFlags, SafetyResult,
    SafetyThresholds,
};

/// Why torque was forced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HardZeroCause {
    /// At least one fault is active.
    Faulted,
    /// HVIL termination sense lost; torque must be zero before the
    /// motor controller relay opens.
    InterlockOpen,
    /// Regenerative command below the minimum regen speed.
    RegenBelowMinSpeed,
    /// Commanded torque was NaN or infinite.
    InvalidCommand,
}

/// The constraint that set the final multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LimitReason {
    /// Nothing reduced torque.
    Unlimited,
    /// Torque forced to zero.
    HardZero(HardZeroCause),
    /// Power envelope ramp.
    PowerEnvelope,
    /// BMS discharge or charge current limit.
    CurrentLimit,
}

/// Multiplier chosen for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TorqueLimit {
    /// Scale factor in `[0.0, 1.0]`.
    pub multiplier: f32,
    /// Constraint that produced the multiplier.
    pub reason: LimitReason,
}

impl TorqueLimit {
    /// No reduction.
    pub const UNLIMITED: Self = Self {
        multiplier: 1.0,
        reason: LimitReason::Unlimited,
    };

    /// Zero torque for the given cause.
    pub fn hard_zero(cause: HardZeroCause) -> Self {
        Self {
            multiplier: 0.0,
            reason: LimitReason::HardZero(cause),
        }
    }

    /// Returns true if torque was forced to zero.
    pub fn is_hard_zero(&self) -> bool {
        matches!(self.reason, LimitReason::HardZero(_))
    }

    /// Scale a torque command. Non-finite commands become zero.
    pub fn apply(&self, torque: f32) -> f32 {
        if torque.is_finite() {
            torque * self.multiplier
        } else {
            0.0
        }
    }

    fn tighten(self, candidate: f32, reason: LimitReason) -> Self {
        if candidate < self.multiplier {
            Self {
                multiplier: candidate,
                reason,
            }
        } else {
            self
        }
    }
}

/// Computes and applies the torque multiplier.
#[derive(Debug, Clone)]
pub struct TorqueLimiter {
    power_gate_w: i32,
    power_ramp: LinearRange,
    current_limit: LinearRange,
    regen_min_speed_kph: f32,
}

impl Default for TorqueLimiter {
    fn default() -> Self {
        Self::from_validated(&SafetyThresholds::default())
    }
}

impl TorqueLimiter {
    /// Build a limiter from thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if the thresholds fail validation.
    pub fn new(thresholds: &SafetyThresholds) -> SafetyResult<Self> {
        thresholds.validate()?;
        Ok(Self {
            power_gate_w: thresholds.power_notice_w,
            power_ramp: LinearRange::new(
                thresholds.power_ramp_start_w as f32,
                thresholds.power_ramp_end_w as f32,
            )?,
            current_limit: LinearRange::new(
                0.0,
                f32::from(thresholds.current_limit_full_scale),
            )?,
            regen_min_speed_kph: thresholds.regen_min_speed_kph,
        })
    }

    pub(crate) fn from_validated(thresholds: &SafetyThresholds) -> Self {
        Self {
            power_gate_w: thresholds.power_notice_w,
            power_ramp: LinearRange::from_validated(
                thresholds.power_ramp_start_w as f32,
                thresholds.power_ramp_end_w as f32,
            ),
            current_limit: LinearRange::from_validated(
                0.0,
                f32::from(thresholds.current_limit_full_scale),
            ),
            regen_min_speed_kph: thresholds.regen_min_speed_kph,
        }
    }

    fn hard_zero_cause(
        &self,
        faults: FaultFlags,
        notices: NoticeFlags,
        commanded: f32,
        ground_speed_kph: f32,
    ) -> Option<HardZeroCause> {
        if !faults.is_empty() {
            return Some(HardZeroCause::Faulted);
        }
        if notices.contains(NoticeFlags::HVIL_TERM_SENSE_LOST) {
            return Some(HardZeroCause::InterlockOpen);
        }
        // An unreadable speed counts as slow.
        if commanded < 0.0 && !(ground_speed_kph >= self.regen_min_speed_kph) {
            return Some(HardZeroCause::RegenBelowMinSpeed);
        }
        if !commanded.is_finite() {
            return Some(HardZeroCause::InvalidCommand);
        }
        None
    }

    /// Compute the multiplier without touching the motor controller.
    pub fn limit<B, M>(
        &self,
        faults: FaultFlags,
        notices: NoticeFlags,
        bms: &B,
        mcm: &M,
    ) -> TorqueLimit
    where
        B: BatteryManagement + ?Sized,
        M: MotorControl + ?Sized,
    {
        let commanded = mcm.commanded_torque();
        if let Some(cause) =
            self.hard_zero_cause(faults, notices, commanded, mcm.ground_speed_kph())
        {
            return TorqueLimit::hard_zero(cause);
        }

        let mut limit = TorqueLimit::UNLIMITED;

        let bms_power = bms.power_w();
        let mcm_power = mcm.power_w();
        if bms_power > self.power_gate_w || mcm_power > self.power_gate_w {
            let peak = bms_power.max(mcm_power) as f32;
            limit = limit.tighten(
                1.0 - self.power_ramp.fraction_clamped(peak),
                LimitReason::PowerEnvelope,
            );
        }

        let current_limit = if commanded > 0.0 {
            bms.discharge_current_limit()
        } else {
            // TODO: ramp regen down as ground speed approaches 15 km/h once
            // the target curve is agreed; only the hard cut below the
            // minimum regen speed applies today.
            bms.charge_current_limit()
        };
        limit.tighten(
            self.current_limit.fraction_clamped(f32::from(current_limit)),
            LimitReason::CurrentLimit,
        )
    }

    /// Compute the multiplier and rewrite the motor controller's command.
    pub fn apply<B, M>(
        &self,
        faults: FaultFlags,
        notices: NoticeFlags,
        bms: &B,
        mcm: &mut M,
    ) -> TorqueLimit
    where
        B: BatteryManagement + ?Sized,
        M: MotorControl + ?Sized,
    {
        let limit = self.limit(faults, notices, bms, mcm);
        let torque = limit.apply(mcm.commanded_torque());
        mcm.set_commanded_torque(torque);
        limit
    }
}
