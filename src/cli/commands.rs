//! CLI command handlers.

use log::{error, info};
use std::path::Path;
use std::process::ExitCode;

use crate::config::EngineConfig;
use crate::engine::SimulationEngine;
use crate::error::TraceResult;

use super::output::{print_help, print_run_summary, print_version, RunSummary};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            config_path,
            frames,
            seed_override,
            verbose: _,
        } => {
            let summary = run_simulation(config_path.as_deref(), frames, seed_override)
                .and_then(|summary| print_run_summary(&summary));
            match summary {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("run failed: {e}");
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Check { config_path } => match check_config(&config_path) {
            Ok(config) => {
                println!(
                    "✓ {} is valid: {} traces x {} points, {:?} integrator",
                    config_path.display(),
                    config.num_traces,
                    config.trace_capacity,
                    config.integrator
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("✗ {}: {e}", config_path.display());
                ExitCode::FAILURE
            }
        },
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Build an engine and advance it `frames` times.
///
/// # Errors
///
/// Returns error if the configuration cannot be loaded or is invalid.
pub fn run_simulation(
    config_path: Option<&Path>,
    frames: u64,
    seed_override: Option<u64>,
) -> TraceResult<RunSummary> {
    let mut config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if seed_override.is_some() {
        config.seed = seed_override;
    }

    let mut engine = SimulationEngine::new(config)?;
    for _ in 0..frames {
        engine.advance_frame();
    }

    info!(
        "ran {} frames ({} steps per trace, t = {:.3})",
        engine.clock().frames(),
        engine.clock().steps(),
        engine.clock().sim_time()
    );
    Ok(RunSummary::from_engine(&engine))
}

/// Load and validate a configuration file.
///
/// # Errors
///
/// Returns the first I/O, parse or validation error.
pub fn check_config(path: &Path) -> TraceResult<EngineConfig> {
    EngineConfig::load(path)
}
