//! Prelude for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use vcu_safety::prelude::*;
//! ```

pub use crate::{
    BatteryManagement, BmsSnapshot, BrakePressureReading, ChannelStatus, DiagnosticEvent,
    DiagnosticSink, EventSeverity, FaultFlags, HardZeroCause, IoStatus, LatchState, LimitReason,
    McmSnapshot, MotorControl, NoticeFlags, NullSink, PedalChannel, SafetyChecker, SafetyError,
    SafetyResult, SafetyThresholds, SensorSnapshot, TorqueEncoderReading, TorqueLimit,
    TorqueLimiter, TracingSink, WarningFlags, WriterSink,
};
