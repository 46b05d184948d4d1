//! Fault, warning and notice flag sets.
//!
//! Bit positions match the layout the vehicle control unit has always reported
//! over its diagnostic channel, so telemetry decoders keep working. Unused
//! positions are reserved.

use bitflags::bitflags;

bitflags! {
    /// Conditions that require motor torque to be suppressed.
    ///
    /// Any non-empty set means "not safe to command torque".
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FaultFlags: u32 {
        /// A torque encoder reading is outside its spec-sheet range.
        const TPS_OUT_OF_RANGE     = 0x0000_0001;
        /// The brake pressure reading is outside its spec-sheet range.
        const BPS_OUT_OF_RANGE     = 0x0000_0002;
        /// A torque encoder channel failed to power up or configure.
        const TPS_POWER_FAILURE    = 0x0000_0004;
        /// The brake pressure channel failed to power up or configure.
        const BPS_POWER_FAILURE    = 0x0000_0008;
        /// Torque encoder signal failure. Detected and logged, never raised.
        const TPS_SIGNAL_FAILURE   = 0x0000_0010;
        /// The brake pressure channel failed to initialize or read.
        const BPS_SIGNAL_FAILURE   = 0x0000_0020;
        /// A torque encoder channel is not calibrated.
        const TPS_NOT_CALIBRATED   = 0x0000_0040;
        /// The brake pressure channel is not calibrated.
        const BPS_NOT_CALIBRATED   = 0x0000_0080;
        /// Torque encoder channels disagree by more than the allowed travel.
        const TPS_OUT_OF_SYNC      = 0x0000_0100;
        /// Reserved: only one brake channel is fitted.
        const BPS_OUT_OF_SYNC      = 0x0000_0200;
        /// Brake and accelerator applied together; latched.
        const TPS_BPS_IMPLAUSIBLE  = 0x0000_0400;
        /// Low-voltage battery below its critical level.
        const LV_BATTERY_VERY_LOW  = 0x0001_0000;
    }
}

bitflags! {
    /// Degraded but non-blocking conditions.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WarningFlags: u16 {
        /// Low-voltage battery is low (also set while critical).
        const LV_BATTERY_LOW = 0x0001;
    }
}

bitflags! {
    /// Informational state other logic may consult.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NoticeFlags: u16 {
        /// HVIL termination sense reads low.
        const HVIL_TERM_SENSE_LOST = 0x0001;
        /// Battery management system reports more than the notice power.
        const BMS_OVER_POWER       = 0x0010;
        /// Motor controller reports more than the notice power.
        const MCM_OVER_POWER       = 0x0020;
    }
}

impl FaultFlags {
    /// Faults that are defined but never raised by the evaluator.
    pub const NEVER_RAISED: Self = Self::TPS_SIGNAL_FAILURE.union(Self::BPS_OUT_OF_SYNC);
}
