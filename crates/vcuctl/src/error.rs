//! Error types for vcuctl

use std::path::PathBuf;

use thiserror::Error;
use vcu_safety::SafetyError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] SafetyError),

    #[error("Invalid thresholds file {path}")]
    MalformedThresholds {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid scenario file {path}")]
    MalformedScenario {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Scenario file {0} has no cycles")]
    EmptyScenario(PathBuf),

    #[error("Cannot read {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidConfiguration(_) | CliError::MalformedThresholds { .. } => 2,
            CliError::MalformedScenario { .. }
            | CliError::EmptyScenario(_)
            | CliError::Unreadable { .. } => 3,
        }
    }
}
