//! The safety checker: owns the fault, warning and notice sets.

use crate::diagnostics::{DiagnosticEvent, DiagnosticSink, TracingSink};
use crate::faults::sensor_faults;
use crate::implausibility::{ImplausibilityLatch, LatchState, LatchTransition, pedal_sync};
use crate::torque::{TorqueLimit, TorqueLimiter};
use crate::warnings::{BatteryTier, notices};
use crate::{
    BatteryManagement, FaultFlags, MotorControl, NoticeFlags, SafetyResult, SafetyThresholds,
    SensorSnapshot, WarningFlags,
};

/// Safety state for one control loop.
///
/// Owned by the control-loop task. Each cycle the caller runs
/// [`update`](Self::update) with fresh readings, then
/// [`reduce_torque`](Self::reduce_torque) to scale the motor command. The
/// flag sets can only change through `update`.
///
/// # Example
///
/// ```rust
/// use vcu_safety::prelude::*;
///
/// let mut checker = SafetyChecker::new(NullSink);
/// let tps = TorqueEncoderReading::new(
///     PedalChannel::new(1200, 200, 4800).with_travel(0.4),
///     PedalChannel::new(1250, 200, 4800).with_travel(0.42),
///     0.41,
/// );
/// let bps = BrakePressureReading::new(PedalChannel::new(600, 500, 4500), 0.0);
/// let sensors = SensorSnapshot {
///     tps,
///     bps,
///     lv_battery_mv: 13_800,
///     hvil_term_sense: true,
/// };
/// let bms = BmsSnapshot { power_w: 20_000, dcl: 255, ccl: 255 };
/// let mut mcm = McmSnapshot { power_w: 19_000, ground_speed_kph: 30.0, torque: 120.0 };
///
/// checker.update(&sensors, &bms, &mcm);
/// assert!(checker.is_safe());
///
/// let limit = checker.reduce_torque(&bms, &mut mcm);
/// assert_eq!(limit.multiplier, 1.0);
/// assert_eq!(mcm.torque, 120.0);
/// ```
#[derive(Debug)]
pub struct SafetyChecker<S: DiagnosticSink = TracingSink> {
    faults: FaultFlags,
    warnings: WarningFlags,
    notices: NoticeFlags,
    latch: ImplausibilityLatch,
    thresholds: SafetyThresholds,
    limiter: TorqueLimiter,
    sink: S,
}

impl Default for SafetyChecker<TracingSink> {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl<S: DiagnosticSink> SafetyChecker<S> {
    /// Create a checker with default thresholds. All sets start empty.
    pub fn new(sink: S) -> Self {
        let thresholds = SafetyThresholds::default();
        let limiter = TorqueLimiter::from_validated(&thresholds);
        Self::from_parts(sink, thresholds, limiter)
    }

    /// Create a checker with custom thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if the thresholds fail validation.
    pub fn with_thresholds(sink: S, thresholds: SafetyThresholds) -> SafetyResult<Self> {
        let limiter = TorqueLimiter::new(&thresholds)?;
        Ok(Self::from_parts(sink, thresholds, limiter))
    }

    fn from_parts(mut sink: S, thresholds: SafetyThresholds, limiter: TorqueLimiter) -> Self {
        sink.record(&DiagnosticEvent::CheckerCreated);
        Self {
            faults: FaultFlags::empty(),
            warnings: WarningFlags::empty(),
            notices: NoticeFlags::empty(),
            latch: ImplausibilityLatch::new(),
            thresholds,
            limiter,
            sink,
        }
    }

    /// Re-evaluate faults, warnings and notices from this cycle's readings.
    ///
    /// Every bit is recomputed except the brake/throttle implausibility,
    /// which follows its latch.
    pub fn update<B, M>(&mut self, sensors: &SensorSnapshot, bms: &B, mcm: &M)
    where
        B: BatteryManagement + ?Sized,
        M: MotorControl + ?Sized,
    {
        let report = sensor_faults(&sensors.tps, &sensors.bps);
        let mut faults = report.faults;
        if report.tps_signal_error {
            self.sink.record(&DiagnosticEvent::TpsSignalError);
        }

        let sync = pedal_sync(&sensors.tps, self.thresholds.pedal_sync_max_deviation);
        if sync.out_of_sync {
            faults |= FaultFlags::TPS_OUT_OF_SYNC;
            self.sink.record(&DiagnosticEvent::PedalsOutOfSync {
                deviation: sync.deviation,
            });
        }

        let tps_travel = sensors.tps.travel;
        let bps_travel = sensors.bps.travel;
        match self.latch.update(tps_travel, bps_travel, &self.thresholds) {
            Some(LatchTransition::Latched) => {
                self.sink.record(&DiagnosticEvent::ImplausibilityLatched {
                    tps_travel,
                    bps_travel,
                });
            }
            Some(LatchTransition::Released) => {
                self.sink
                    .record(&DiagnosticEvent::ImplausibilityReleased { tps_travel });
            }
            None => {}
        }
        faults.set(FaultFlags::TPS_BPS_IMPLAUSIBLE, self.latch.is_latched());

        let millivolts = sensors.lv_battery_mv;
        let tier = BatteryTier::from_millivolts(millivolts, &self.thresholds);
        match tier {
            BatteryTier::Critical => {
                self.sink
                    .record(&DiagnosticEvent::LvBatteryCritical { millivolts });
            }
            BatteryTier::Low => {
                self.sink.record(&DiagnosticEvent::LvBatteryLow { millivolts });
            }
            BatteryTier::Nominal => {}
        }
        faults |= tier.faults();

        self.faults = faults;
        self.warnings = tier.warnings();
        self.notices = notices(
            sensors.hvil_term_sense,
            bms.power_w(),
            mcm.power_w(),
            &self.thresholds,
        );
    }

    /// Scale the motor controller's torque command for this cycle.
    ///
    /// Reads the flag sets from the last [`update`](Self::update). The only
    /// side effect is the rewritten torque command.
    pub fn reduce_torque<B, M>(&self, bms: &B, mcm: &mut M) -> TorqueLimit
    where
        B: BatteryManagement + ?Sized,
        M: MotorControl + ?Sized,
    {
        self.limiter.apply(self.faults, self.notices, bms, mcm)
    }

    /// Returns true when no fault is active.
    pub fn is_safe(&self) -> bool {
        self.faults.is_empty()
    }

    /// Active faults.
    pub fn faults(&self) -> FaultFlags {
        self.faults
    }

    /// Active warnings.
    pub fn warnings(&self) -> WarningFlags {
        self.warnings
    }

    /// Active notices.
    pub fn notices(&self) -> NoticeFlags {
        self.notices
    }

    /// State of the brake/throttle implausibility latch.
    pub fn latch_state(&self) -> LatchState {
        self.latch.state()
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &SafetyThresholds {
        &self.thresholds
    }

    /// Borrow the diagnostic sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the diagnostic sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the checker and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
