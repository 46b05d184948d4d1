//! Safety arbitration for an electric vehicle control unit.
//!
//! Each control cycle this crate turns sensor and subsystem readings into a
//! fault, warning and notice state, and scales the motor torque command so it
//! satisfies the safety rules and the power envelope.
//!
//! # Architecture
//!
//! - **LinearRange**: value-to-fraction mapping used by the limiter
//! - **sensor_faults**: calibration, driver status and spec-range faults
//! - **pedal_sync / ImplausibilityLatch**: cross-sensor plausibility
//! - **BatteryTier / notices**: LV battery tiers, HVIL and over-power notices
//! - **TorqueLimiter**: hard-zero conditions plus power and current ramps
//! - **SafetyChecker**: owns the three flag sets and runs the cycle
//!
//! # RT-Safety
//!
//! `SafetyChecker::update` and `SafetyChecker::reduce_torque`:
//! - do not allocate
//! - do not block (sinks drop what they cannot deliver)
//! - do a fixed amount of work per call
//!
//! # Cycle
//!
//! ```text
//! readings ──▶ update() ──▶ faults / warnings / notices ──▶ reduce_torque()
//!                  │                                               │
//!                  ▼                                               ▼
//!           DiagnosticSink                              motor torque command
//! ```
//!
//! # Example
//!
//! ```rust
//! use vcu_safety::{BmsSnapshot, FaultFlags, McmSnapshot, NoticeFlags, TorqueLimiter};
//!
//! let limiter = TorqueLimiter::default();
//! let bms = BmsSnapshot { power_w: 76_000, dcl: 200, ccl: 255 };
//! let mut mcm = McmSnapshot { power_w: 70_000, ground_speed_kph: 50.0, torque: 100.0 };
//!
//! let limit = limiter.apply(FaultFlags::empty(), NoticeFlags::empty(), &bms, &mut mcm);
//! assert!((limit.multiplier - 200.0 / 255.0).abs() < 1e-6);
//! assert!((mcm.torque - 78.43).abs() < 0.01);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod checker;
mod diagnostics;
mod error;
mod faults;
mod flags;
mod implausibility;
mod inputs;
mod scale;
mod thresholds;
mod torque;
mod warnings;

pub mod prelude;

pub use checker::SafetyChecker;
pub use diagnostics::{
    DiagnosticEvent, DiagnosticSink, EventSeverity, MAX_LINE_LEN, NullSink, TracingSink,
    WriterSink,
};
pub use error::{SafetyError, SafetyResult};
pub use faults::{SensorFaultReport, sensor_faults};
pub use flags::{FaultFlags, NoticeFlags, WarningFlags};
pub use implausibility::{
    ImplausibilityLatch, LatchState, LatchTransition, PedalSync, pedal_sync,
};
pub use inputs::{
    BatteryManagement, BmsSnapshot, BrakePressureReading, ChannelStatus, IoStatus, McmSnapshot,
    MotorControl, PedalChannel, SensorSnapshot, TorqueEncoderReading,
};
pub use scale::{LinearRange, fraction};
pub use thresholds::SafetyThresholds;
pub use torque::{HardZeroCause, LimitReason, TorqueLimit, TorqueLimiter};
pub use warnings::{BatteryTier, notices};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
