//! Print the default thresholds

use anyhow::Result;
use vcu_safety::SafetyThresholds;

use crate::output;

/// Execute thresholds command
pub fn execute() -> Result<()> {
    output::print_thresholds(&SafetyThresholds::default())
}
