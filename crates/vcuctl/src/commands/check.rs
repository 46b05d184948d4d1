//! Validate a thresholds file

use std::path::Path;

use anyhow::Result;

use crate::error::CliError;
use crate::output;
use crate::scenario;

/// Execute check command
pub fn execute(file: &Path, json: bool) -> Result<()> {
    let thresholds = scenario::load_thresholds(file)?;
    thresholds.validate().map_err(CliError::from)?;
    tracing::info!(path = %file.display(), "Thresholds valid");
    output::print_check_ok(&file.display().to_string(), json);
    Ok(())
}
