//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::json;
use vcu_safety::{HardZeroCause, LimitReason, SafetyThresholds};

/// One replayed cycle as printed.
#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub cycle: usize,
    pub faults: u32,
    pub warnings: u16,
    pub notices: u16,
    pub safe: bool,
    pub latched: bool,
    pub multiplier: f32,
    pub reason: &'static str,
    pub torque_in: f32,
    pub torque_out: f32,
}

/// Short label for a limit reason.
pub fn reason_label(reason: LimitReason) -> &'static str {
    match reason {
        LimitReason::Unlimited => "unlimited",
        LimitReason::PowerEnvelope => "power-envelope",
        LimitReason::CurrentLimit => "current-limit",
        LimitReason::HardZero(HardZeroCause::Faulted) => "faulted",
        LimitReason::HardZero(HardZeroCause::InterlockOpen) => "interlock-open",
        LimitReason::HardZero(HardZeroCause::RegenBelowMinSpeed) => "regen-below-min-speed",
        LimitReason::HardZero(HardZeroCause::InvalidCommand) => "invalid-command",
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": format!("{error:#}"),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

pub fn print_cycle(report: &CycleReport, json: bool) {
    if json {
        match serde_json::to_string(report) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format cycle as JSON: {e}"),
        }
        return;
    }

    let safe = if report.safe {
        "safe".green()
    } else {
        "UNSAFE".red().bold()
    };
    println!(
        "cycle {:>4}  faults={:#010x} warnings={:#06x} notices={:#06x}  {}  x{:.3} {}  torque {:.2} -> {:.2}",
        report.cycle,
        report.faults,
        report.warnings,
        report.notices,
        safe,
        report.multiplier,
        report.reason,
        report.torque_in,
        report.torque_out,
    );
}

pub fn print_replay_summary(cycles: usize, unsafe_cycles: usize, json: bool) {
    if json {
        return;
    }
    let summary = format!("{cycles} cycles, {unsafe_cycles} unsafe");
    if unsafe_cycles == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }
}

pub fn print_thresholds(thresholds: &SafetyThresholds) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(thresholds)?);
    Ok(())
}

pub fn print_check_ok(path: &str, json: bool) {
    if json {
        println!("{}", json!({ "success": true, "file": path }));
    } else {
        println!("{} {}", "✓".green(), format!("{path}: thresholds are valid").bold());
    }
}
