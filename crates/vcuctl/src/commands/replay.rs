//! Replay recorded cycles through the safety checker

use std::path::Path;

use anyhow::Result;
use vcu_safety::{LatchState, MotorControl, SafetyChecker, TracingSink};

use crate::output::{self, CycleReport};
use crate::scenario::Scenario;

/// Execute replay command
pub fn execute(file: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(file)?;
    tracing::info!(
        path = %file.display(),
        cycles = scenario.cycles.len(),
        custom_thresholds = scenario.thresholds.is_some(),
        "Replaying scenario"
    );

    let mut checker = match scenario.thresholds {
        Some(thresholds) => SafetyChecker::with_thresholds(TracingSink, thresholds)
            .map_err(crate::error::CliError::from)?,
        None => SafetyChecker::new(TracingSink),
    };

    let mut unsafe_cycles = 0usize;
    for (index, cycle) in scenario.cycles.iter().enumerate() {
        checker.update(&cycle.sensors, &cycle.bms, &cycle.mcm);

        let mut mcm = cycle.mcm;
        let torque_in = mcm.commanded_torque();
        let limit = checker.reduce_torque(&cycle.bms, &mut mcm);
        tracing::debug!(
            cycle = index,
            faults = checker.faults().bits(),
            multiplier = limit.multiplier,
            "Cycle complete"
        );

        if !checker.is_safe() {
            unsafe_cycles = unsafe_cycles.saturating_add(1);
        }
        output::print_cycle(
            &CycleReport {
                cycle: index,
                faults: checker.faults().bits(),
                warnings: checker.warnings().bits(),
                notices: checker.notices().bits(),
                safe: checker.is_safe(),
                latched: checker.latch_state() == LatchState::Latched,
                multiplier: limit.multiplier,
                reason: output::reason_label(limit.reason),
                torque_in,
                torque_out: mcm.commanded_torque(),
            },
            json,
        );
    }

    output::print_replay_summary(scenario.cycles.len(), unsafe_cycles, json);
    Ok(())
}
