//! Low-voltage battery tiers and informational notices.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FaultFlags, NoticeFlags, SafetyThresholds, WarningFlags};

/// Low-voltage battery charge tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BatteryTier {
    /// At or below the critical level (roughly 10 % charge).
    Critical,
    /// At or below the low level.
    Low,
    /// Above the low level.
    Nominal,
}

impl BatteryTier {
    /// Classify a reading.
    pub fn from_millivolts(millivolts: u16, thresholds: &SafetyThresholds) -> Self {
        if millivolts <= thresholds.lv_battery_critical_mv {
            BatteryTier::Critical
        } else if millivolts <= thresholds.lv_battery_low_mv {
            BatteryTier::Low
        } else {
            BatteryTier::Nominal
        }
    }

    /// Fault bits this tier raises.
    pub fn faults(self) -> FaultFlags {
        match self {
            BatteryTier::Critical => FaultFlags::LV_BATTERY_VERY_LOW,
            BatteryTier::Low | BatteryTier::Nominal => FaultFlags::empty(),
        }
    }

    /// Warning bits this tier raises.
    pub fn warnings(self) -> WarningFlags {
        match self {
            BatteryTier::Critical | BatteryTier::Low => WarningFlags::LV_BATTERY_LOW,
            BatteryTier::Nominal => WarningFlags::empty(),
        }
    }
}

/// Compute the notice set from HVIL sense and subsystem power draw.
pub fn notices(
    hvil_term_sense: bool,
    bms_power_w: i32,
    mcm_power_w: i32,
    thresholds: &SafetyThresholds,
) -> NoticeFlags {
    let mut notices = NoticeFlags::empty();
    notices.set(NoticeFlags::HVIL_TERM_SENSE_LOST, !hvil_term_sense);
    notices.set(
        NoticeFlags::BMS_OVER_POWER,
        bms_power_w > thresholds.power_notice_w,
    );
    notices.set(
        NoticeFlags::MCM_OVER_POWER,
        mcm_power_w > thresholds.power_notice_w,
    );
    notices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_tier_boundaries() {
        let t = SafetyThresholds::default();
        assert_eq!(BatteryTier::from_millivolts(0, &t), BatteryTier::Critical);
        assert_eq!(BatteryTier::from_millivolts(12_730, &t), BatteryTier::Critical);
        assert_eq!(BatteryTier::from_millivolts(12_731, &t), BatteryTier::Low);
        assert_eq!(BatteryTier::from_millivolts(13_100, &t), BatteryTier::Low);
        assert_eq!(BatteryTier::from_millivolts(13_101, &t), BatteryTier::Nominal);
    }

    #[test]
    fn test_battery_tier_flags() {
        assert_eq!(BatteryTier::Critical.faults(), FaultFlags::LV_BATTERY_VERY_LOW);
        assert_eq!(BatteryTier::Critical.warnings(), WarningFlags::LV_BATTERY_LOW);
        assert!(BatteryTier::Low.faults().is_empty());
        assert_eq!(BatteryTier::Low.warnings(), WarningFlags::LV_BATTERY_LOW);
        assert!(BatteryTier::Nominal.faults().is_empty());
        assert!(BatteryTier::Nominal.warnings().is_empty());
    }

    #[test]
    fn test_notices() {
        let t = SafetyThresholds::default();
        assert!(notices(true, 0, 0, &t).is_empty());
        assert_eq!(
            notices(false, 0, 0, &t),
            NoticeFlags::HVIL_TERM_SENSE_LOST
        );
        assert!(notices(true, 75_000, 75_000, &t).is_empty());
        assert_eq!(
            notices(true, 75_001, 0, &t),
            NoticeFlags::BMS_OVER_POWER
        );
        assert_eq!(
            notices(true, 0, 75_001, &t),
            NoticeFlags::MCM_OVER_POWER
        );
    }
}
