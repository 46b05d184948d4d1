//! vcuctl - VCU safety bench tool
//!
//! Replays recorded control cycles through the safety checker and validates
//! threshold files before they are flashed.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "vcuctl")]
#[command(about = "VCU safety bench tool - replay recorded cycles and check thresholds")]
#[command(version)]
#[command(long_about = "
vcuctl runs the vehicle control unit safety checker off-vehicle.
Recorded cycles are replayed in order through a single checker, so the
brake/throttle implausibility latch carries across cycles exactly as it does
on the car.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded scenario through the safety checker
    Replay {
        /// Scenario JSON file
        file: PathBuf,
    },

    /// Print the default thresholds as JSON
    Thresholds,

    /// Validate a thresholds JSON file
    Check {
        /// Thresholds JSON file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vcuctl={log_level},vcu_safety={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Replay { file } => commands::replay::execute(file, cli.json),
        Commands::Thresholds => commands::thresholds::execute(),
        Commands::Check { file } => commands::check::execute(file, cli.json),
    }
}
