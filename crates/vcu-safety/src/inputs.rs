//! Per-cycle readings supplied by the sensor drivers and subsystems.
//!
//! Sensor readings are plain snapshots. The battery management system and
//! motor controller are reached through traits, because the limiter writes
//! the torque command back to the motor controller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result code of a single driver I/O operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IoStatus {
    /// Operation succeeded.
    #[default]
    Ok,
    /// Driver error code.
    Error(u16),
}

impl IoStatus {
    /// Returns true if the operation succeeded.
    pub fn is_ok(self) -> bool {
        matches!(self, IoStatus::Ok)
    }
}

/// I/O status of the four driver steps behind one sensor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelStatus {
    /// Sensor supply initialization.
    pub power_init: IoStatus,
    /// Sensor supply configuration.
    pub power_configure: IoStatus,
    /// Signal input initialization.
    pub signal_init: IoStatus,
    /// Latest signal read.
    pub signal_read: IoStatus,
}

impl ChannelStatus {
    /// Both power steps succeeded.
    pub fn power_ok(&self) -> bool {
        self.power_init.is_ok() && self.power_configure.is_ok()
    }

    /// Both signal steps succeeded.
    pub fn signal_ok(&self) -> bool {
        self.signal_init.is_ok() && self.signal_read.is_ok()
    }
}

/// One analog pedal sensor channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PedalChannel {
    /// Raw ADC reading.
    pub raw: u16,
    /// Spec-sheet minimum valid reading.
    pub spec_min: u16,
    /// Spec-sheet maximum valid reading.
    pub spec_max: u16,
    /// Whether the channel has been calibrated.
    pub calibrated: bool,
    /// Driver status for this channel.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: ChannelStatus,
    /// Calibrated travel fraction in `[0.0, 1.0]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub travel: f32,
}

impl PedalChannel {
    /// A calibrated, healthy channel at zero travel.
    pub fn new(raw: u16, spec_min: u16, spec_max: u16) -> Self {
        Self {
            raw,
            spec_min,
            spec_max,
            calibrated: true,
            status: ChannelStatus::default(),
            travel: 0.0,
        }
    }

    /// Set the travel fraction.
    pub fn with_travel(mut self, travel: f32) -> Self {
        self.travel = travel;
        self
    }

    /// Set the driver status.
    pub fn with_status(mut self, status: ChannelStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark the channel uncalibrated.
    pub fn uncalibrated(mut self) -> Self {
        self.calibrated = false;
        self
    }

    /// Raw reading lies within `[spec_min, spec_max]`, bounds inclusive.
    pub fn in_spec_range(&self) -> bool {
        (self.spec_min..=self.spec_max).contains(&self.raw)
    }
}

/// Dual-channel torque encoder (accelerator pedal).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TorqueEncoderReading {
    /// The two redundant channels.
    pub channels: [PedalChannel; 2],
    /// Combined pedal travel fraction.
    pub travel: f32,
}

impl TorqueEncoderReading {
    /// Build a reading from both channels and the combined travel.
    pub fn new(tps0: PedalChannel, tps1: PedalChannel, travel: f32) -> Self {
        Self {
            channels: [tps0, tps1],
            travel,
        }
    }
}

/// Brake pressure sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrakePressureReading {
    /// The single fitted channel.
    pub channel: PedalChannel,
    /// Brake travel fraction.
    pub travel: f32,
}

impl BrakePressureReading {
    /// Build a reading from its channel and travel.
    pub fn new(channel: PedalChannel, travel: f32) -> Self {
        Self { channel, travel }
    }
}

/// Everything the evaluators read from sensors in one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSnapshot {
    /// Torque encoder.
    pub tps: TorqueEncoderReading,
    /// Brake pressure sensor.
    pub bps: BrakePressureReading,
    /// Low-voltage battery reading in millivolts.
    pub lv_battery_mv: u16,
    /// HVIL termination sense; `false` means the loop is open.
    pub hvil_term_sense: bool,
}

/// Read-only view of the battery management system.
pub trait BatteryManagement {
    /// Instantaneous pack power in watts.
    fn power_w(&self) -> i32;
    /// Discharge current limit, 0..=255 scaled.
    fn discharge_current_limit(&self) -> u8;
    /// Charge current limit, 0..=255 scaled.
    fn charge_current_limit(&self) -> u8;
}

/// The motor controller: power and speed readings plus the torque command.
pub trait MotorControl {
    /// Instantaneous electrical power in watts.
    fn power_w(&self) -> i32;
    /// Ground speed in km/h.
    fn ground_speed_kph(&self) -> f32;
    /// Commanded torque; positive drives, negative regenerates.
    fn commanded_torque(&self) -> f32;
    /// Replace the commanded torque.
    fn set_commanded_torque(&mut self, torque: f32);
}

/// BMS values captured for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BmsSnapshot {
    /// Pack power in watts.
    pub power_w: i32,
    /// Discharge current limit.
    pub dcl: u8,
    /// Charge current limit.
    pub ccl: u8,
}

impl BatteryManagement for BmsSnapshot {
    fn power_w(&self) -> i32 {
        self.power_w
    }

    fn discharge_current_limit(&self) -> u8 {
        self.dcl
    }

    fn charge_current_limit(&self) -> u8 {
        self.ccl
    }
}

/// Motor controller values captured for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct McmSnapshot {
    /// Electrical power in watts.
    pub power_w: i32,
    /// Ground speed in km/h.
    pub ground_speed_kph: f32,
    /// Commanded torque.
    pub torque: f32,
}

impl MotorControl for McmSnapshot {
    fn power_w(&self) -> i32 {
        self.power_w
    }

    fn ground_speed_kph(&self) -> f32 {
        self.ground_speed_kph
    }

    fn commanded_torque(&self) -> f32 {
        self.torque
    }

    fn set_commanded_torque(&mut self, torque: f32) {
        self.torque = torque;
    }
}
