//! Sensor health and range faults.
//!
//! Every bit produced here reflects only the current cycle's readings; a
//! fault clears as soon as its condition stops holding.

use crate::{BrakePressureReading, FaultFlags, TorqueEncoderReading};

/// Outcome of one sensor health pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorFaultReport {
    /// Faults raised this cycle.
    pub faults: FaultFlags,
    /// A torque encoder signal step failed.
    ///
    /// Reported for diagnostics only: [`FaultFlags::TPS_SIGNAL_FAILURE`] is
    /// not raised for it.
    pub tps_signal_error: bool,
}

/// Evaluate calibration, driver status and spec-range faults.
///
/// # RT Safety
///
/// No allocation, fixed amount of work.
pub fn sensor_faults(tps: &TorqueEncoderReading, bps: &BrakePressureReading) -> SensorFaultReport {
    let mut faults = FaultFlags::empty();
    let [tps0, tps1] = &tps.channels;
    let bps0 = &bps.channel;

    faults.set(
        FaultFlags::TPS_NOT_CALIBRATED,
        !tps0.calibrated || !tps1.calibrated,
    );
    faults.set(FaultFlags::BPS_NOT_CALIBRATED, !bps0.calibrated);

    faults.set(
        FaultFlags::TPS_POWER_FAILURE,
        !tps0.status.power_ok() || !tps1.status.power_ok(),
    );
    faults.set(FaultFlags::BPS_POWER_FAILURE, !bps0.status.power_ok());
    faults.set(FaultFlags::BPS_SIGNAL_FAILURE, !bps0.status.signal_ok());

    // Spec-sheet limits, not calibration limits.
    faults.set(
        FaultFlags::TPS_OUT_OF_RANGE,
        !tps0.in_spec_range() || !tps1.in_spec_range(),
    );
    faults.set(FaultFlags::BPS_OUT_OF_RANGE, !bps0.in_spec_range());

    SensorFaultReport {
        faults,
        tps_signal_error: !tps0.status.signal_ok() || !tps1.status.signal_ok(),
    }
}
