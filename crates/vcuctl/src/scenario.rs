//! Recorded bench scenarios.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use vcu_safety::{BmsSnapshot, McmSnapshot, SafetyThresholds, SensorSnapshot};

use crate::error::CliError;

/// A recorded sequence of control cycles.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Thresholds to run with; defaults when absent.
    #[serde(default)]
    pub thresholds: Option<SafetyThresholds>,
    pub cycles: Vec<Cycle>,
}

/// Everything one control cycle reads.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cycle {
    pub sensors: SensorSnapshot,
    pub bms: BmsSnapshot,
    pub mcm: McmSnapshot,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = read(path)?;
        let scenario: Scenario =
            serde_json::from_str(&text).map_err(|source| CliError::MalformedScenario {
                path: path.to_path_buf(),
                source,
            })?;
        if scenario.cycles.is_empty() {
            return Err(CliError::EmptyScenario(path.to_path_buf()));
        }
        Ok(scenario)
    }
}

pub fn load_thresholds(path: &Path) -> Result<SafetyThresholds, CliError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::MalformedThresholds {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}
