//! Detection thresholds and limiter tuning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{SafetyError, SafetyResult};

/// Thresholds for fault detection and torque limiting.
///
/// Defaults carry the competition-rule values: 10 % pedal sensor deviation,
/// brake/throttle plausibility at 2 % / 25 % with release below 5 %, and the
/// 80 kW power envelope with the limiter ramping in from 75 kW.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SafetyThresholds {
    /// Maximum travel difference between the two torque encoder channels.
    pub pedal_sync_max_deviation: f32,
    /// Brake travel above which the mechanical brakes count as actuated.
    pub brake_actuated_travel: f32,
    /// Accelerator travel that latches the brake/throttle implausibility.
    pub implausibility_set_travel: f32,
    /// Accelerator travel the driver must drop below to release the latch.
    pub implausibility_clear_travel: f32,
    /// LV battery reading (mV) at or below which the battery is critical.
    pub lv_battery_critical_mv: u16,
    /// LV battery reading (mV) at or below which the battery is low.
    pub lv_battery_low_mv: u16,
    /// Power (W) above which an over-power notice is raised.
    pub power_notice_w: i32,
    /// Power (W) at which the envelope ramp starts removing torque.
    pub power_ramp_start_w: i32,
    /// Power (W) at which the envelope ramp reaches zero torque.
    pub power_ramp_end_w: i32,
    /// Ground speed (km/h) below which regenerative torque is refused.
    pub regen_min_speed_kph: f32,
    /// BMS current-limit value meaning "no limit".
    pub current_limit_full_scale: u8,
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self {
            pedal_sync_max_deviation: 0.10,
            brake_actuated_travel: 0.02,
            implausibility_set_travel: 0.25,
            implausibility_clear_travel: 0.05,
            lv_battery_critical_mv: 12_730,
            lv_battery_low_mv: 13_100,
            power_notice_w: 75_000,
            power_ramp_start_w: 75_000,
            power_ramp_end_w: 80_000,
            regen_min_speed_kph: 5.0,
            current_limit_full_scale: 0xFF,
        }
    }
}

fn check_fraction(name: &'static str, value: f32) -> SafetyResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SafetyError::invalid_threshold(
            name,
            "must be a travel fraction in [0, 1]",
        ));
    }
    Ok(())
}

impl SafetyThresholds {
    /// Validate thresholds are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError::InvalidThreshold`] naming the first offending
    /// field.
    pub fn validate(&self) -> SafetyResult<()> {
        check_fraction("pedal_sync_max_deviation", self.pedal_sync_max_deviation)?;
        check_fraction("brake_actuated_travel", self.brake_actuated_travel)?;
        check_fraction("implausibility_set_travel", self.implausibility_set_travel)?;
        check_fraction(
            "implausibility_clear_travel",
            self.implausibility_clear_travel,
        )?;
        if self.implausibility_clear_travel >= self.implausibility_set_travel {
            return Err(SafetyError::invalid_threshold(
                "implausibility_clear_travel",
                "must be below implausibility_set_travel",
            ));
        }
        if self.lv_battery_critical_mv >= self.lv_battery_low_mv {
            return Err(SafetyError::invalid_threshold(
                "lv_battery_critical_mv",
                "must be below lv_battery_low_mv",
            ));
        }
        // The ramp runs in f32; distinct large watt values can round together.
        if self.power_ramp_start_w as f32 >= self.power_ramp_end_w as f32 {
            return Err(SafetyError::invalid_threshold(
                "power_ramp_start_w",
                "must be below power_ramp_end_w",
            ));
        }
        if !(self.regen_min_speed_kph >= 0.0 && self.regen_min_speed_kph.is_finite()) {
            return Err(SafetyError::invalid_threshold(
                "regen_min_speed_kph",
                "must be a finite, non-negative speed",
            ));
        }
        if self.current_limit_full_scale == 0 {
            return Err(SafetyError::invalid_threshold(
                "current_limit_full_scale",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}
