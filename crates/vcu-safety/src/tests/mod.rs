//! Checker-level tests.

use crate::*;


/// Keeps every event for inspection.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub events: Vec<DiagnosticEvent>,
}

impl DiagnosticSink for RecordingSink {
    fn record(&mut self, event: &DiagnosticEvent) {
        self.events.push(*event);
    }
}

/// Readings with every sensor healthy, pedals released, battery charged.
pub(crate) fn nominal_sensors() -> SensorSnapshot {
    SensorSnapshot {
        tps: TorqueEncoderReading::new(
            PedalChannel::new(400, 200, 4800),
            PedalChannel::new(4400, 200, 4800),
            0.0,
        ),
        bps: BrakePressureReading::new(PedalChannel::new(600, 500, 4500), 0.0),
        lv_battery_mv: 13_800,
        hvil_term_sense: true,
    }
}

/// Nominal readings with the given pedal travel on both encoder channels.
pub(crate) fn pedals(tps_travel: f32, bps_travel: f32) -> SensorSnapshot {
    let mut sensors = nominal_sensors();
    sensors.tps.channels[0].travel = tps_travel;
    sensors.tps.channels[1].travel = tps_travel;
    sensors.tps.travel = tps_travel;
    sensors.bps.channel.travel = bps_travel;
    sensors.bps.travel = bps_travel;
    sensors
}

pub(crate) fn idle_bms() -> BmsSnapshot {
    BmsSnapshot {
        power_w: 5_000,
        dcl: 255,
        ccl: 255,
    }
}

pub(crate) fn cruising_mcm(torque: f32) -> McmSnapshot {
    McmSnapshot {
        power_w: 5_000,
        ground_speed_kph: 40.0,
        torque,
    }
}
