//! Diagnostic events and the sinks that record them.
//!
//! The evaluators never log. [`SafetyChecker`](crate::SafetyChecker) turns
//! their outcomes into [`DiagnosticEvent`]s and hands them to the injected
//! [`DiagnosticSink`]. Sinks are infallible from the caller's point of view:
//! a sink that cannot deliver an event drops it.

use core::fmt::{self, Write as _};
use std::io::Write;

/// How urgent an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventSeverity {
    /// Informational.
    Info,
    /// Degraded operation.
    Warning,
    /// A fault condition.
    Error,
}

/// Something the safety checker wants an operator to see.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagnosticEvent {
    /// The checker was constructed.
    CheckerCreated,
    /// A torque encoder signal step failed.
    TpsSignalError,
    /// Torque encoder channels disagree.
    PedalsOutOfSync {
        /// Travel difference between the channels.
        deviation: f32,
    },
    /// Brake/throttle implausibility latched.
    ImplausibilityLatched {
        /// Combined accelerator travel.
        tps_travel: f32,
        /// Brake travel.
        bps_travel: f32,
    },
    /// Brake/throttle implausibility released.
    ImplausibilityReleased {
        /// Combined accelerator travel.
        tps_travel: f32,
    },
    /// Low-voltage battery at or below its critical level.
    LvBatteryCritical {
        /// Battery reading.
        millivolts: u16,
    },
    /// Low-voltage battery low.
    LvBatteryLow {
        /// Battery reading.
        millivolts: u16,
    },
}

impl DiagnosticEvent {
    /// Severity of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            DiagnosticEvent::CheckerCreated | DiagnosticEvent::ImplausibilityReleased { .. } => {
                EventSeverity::Info
            }
            DiagnosticEvent::TpsSignalError | DiagnosticEvent::LvBatteryLow { .. } => {
                EventSeverity::Warning
            }
            DiagnosticEvent::PedalsOutOfSync { .. }
            | DiagnosticEvent::ImplausibilityLatched { .. }
            | DiagnosticEvent::LvBatteryCritical { .. } => EventSeverity::Error,
        }
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEvent::CheckerCreated => write!(f, "Safety checker initialized"),
            DiagnosticEvent::TpsSignalError => write!(f, "TPS signal error"),
            DiagnosticEvent::PedalsOutOfSync { deviation } => {
                write!(f, "TPS discrepancy of {:.1}%", deviation * 100.0)
            }
            DiagnosticEvent::ImplausibilityLatched {
                tps_travel,
                bps_travel,
            } => write!(
                f,
                "Brake/throttle implausibility latched (tps {:.0}%, brake {:.0}%)",
                tps_travel * 100.0,
                bps_travel * 100.0
            ),
            DiagnosticEvent::ImplausibilityReleased { tps_travel } => write!(
                f,
                "Brake/throttle implausibility released (tps {:.0}%)",
                tps_travel * 100.0
            ),
            DiagnosticEvent::LvBatteryCritical { millivolts } => write!(
                f,
                "LV battery {}.{:03}V BELOW 10%",
                millivolts / 1000,
                millivolts % 1000
            ),
            DiagnosticEvent::LvBatteryLow { millivolts } => write!(
                f,
                "LV battery {}.{:03}V LOW",
                millivolts / 1000,
                millivolts % 1000
            ),
        }
    }
}

/// Receives diagnostic events from the safety checker.
pub trait DiagnosticSink {
    /// Record an event. Must not block and must not fail.
    fn record(&mut self, event: &DiagnosticEvent);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn record(&mut self, event: &DiagnosticEvent) {
        (**self).record(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _event: &DiagnosticEvent) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, event: &DiagnosticEvent) {
        match *event {
            DiagnosticEvent::CheckerCreated => {
                tracing::debug!("{}", event);
            }
            DiagnosticEvent::TpsSignalError => {
                tracing::warn!("{}", event);
            }
            DiagnosticEvent::PedalsOutOfSync { deviation } => {
                tracing::error!(deviation, "{}", event);
            }
            DiagnosticEvent::ImplausibilityLatched {
                tps_travel,
                bps_travel,
            } => {
                tracing::error!(tps_travel, bps_travel, "{}", event);
            }
            DiagnosticEvent::ImplausibilityReleased { tps_travel } => {
                tracing::info!(tps_travel, "{}", event);
            }
            DiagnosticEvent::LvBatteryCritical { millivolts } => {
                tracing::error!(millivolts, "{}", event);
            }
            DiagnosticEvent::LvBatteryLow { millivolts } => {
                tracing::warn!(millivolts, "{}", event);
            }
        }
    }
}

/// Longest line [`WriterSink`] formats.
pub const MAX_LINE_LEN: usize = 96;

/// Writes one line per event to a byte stream, such as a serial console.
///
/// Lines are formatted into a fixed-capacity buffer. Lines that do not fit or
/// cannot be written are counted and dropped.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    dropped: u32,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer, dropped: 0 }
    }

    /// Number of events that could not be delivered.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn record(&mut self, event: &DiagnosticEvent) {
        let mut line: heapless::String<MAX_LINE_LEN> = heapless::String::new();
        if writeln!(line, "{}", event).is_err()
            || self.writer.write_all(line.as_bytes()).is_err()
        {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}
