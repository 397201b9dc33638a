//! CLI output formatting.

use serde::{Deserialize, Serialize};

use crate::engine::{Parameters, RunState, SimulationEngine};
use crate::error::TraceResult;
use crate::trace::VisibleWindow;

/// Print version information.
pub fn print_version() {
    match option_env!("GIT_HASH") {
        Some(hash) => println!("lorenz-trace {} ({hash})", env!("LORENZ_TRACE_VERSION")),
        None => println!("lorenz-trace {}", env!("LORENZ_TRACE_VERSION")),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"lorenz-trace - Lorenz attractor simulation core

USAGE:
    lorenz-trace <COMMAND> [OPTIONS]

COMMANDS:
    run [config.yaml]           Advance the simulation headless and print a JSON summary
        -n, --frames <N>        Frames to advance (default: 600)
        --seed <N>              Override the configured seed
        -v, --verbose           Enable debug logging

    check <config.yaml>         Validate a configuration file

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    lorenz-trace run
    lorenz-trace run lorenz.yaml --frames 1000 --seed 42
    lorenz-trace check lorenz.yaml

Log level follows RUST_LOG (default: info).
"
    );
}

/// Final state of one trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Render index.
    pub index: usize,
    /// Start point of the current run.
    pub start: [f64; 3],
    /// Current position.
    pub position: [f64; 3],
    /// Points held in the buffer.
    pub written: usize,
    /// Window a renderer would draw this frame.
    pub visible: VisibleWindow,
    /// True if the state is NaN or infinite.
    pub diverged: bool,
}

/// Result of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed that reproduces the run.
    pub seed: u64,
    /// Frames that performed work.
    pub frames: u64,
    /// Steps per trajectory.
    pub steps: u64,
    /// Simulated time covered.
    pub sim_time: f64,
    /// Parameters at the end of the run.
    pub parameters: Parameters,
    /// Pause state at the end of the run.
    pub run_state: RunState,
    /// Largest distance between any two current positions.
    pub max_separation: f64,
    /// Per-trajectory detail.
    pub traces: Vec<TraceSummary>,
}

impl RunSummary {
    /// Snapshot an engine.
    #[must_use]
    pub fn from_engine(engine: &SimulationEngine) -> Self {
        let traces: Vec<TraceSummary> = engine
            .trajectories()
            .iter()
            .enumerate()
            .map(|(index, t)| TraceSummary {
                index,
                start: t.start().into(),
                position: t.position().into(),
                written: t.buffer().written(),
                visible: t.visible_window(engine.max_visible()),
                diverged: !t.is_finite(),
            })
            .collect();

        let positions = engine.positions();
        let max_separation = positions
            .iter()
            .enumerate()
            .flat_map(|(i, a)| positions[i + 1..].iter().map(move |b| a.distance(b)))
            .fold(0.0_f64, f64::max);

        Self {
            seed: engine.seed(),
            frames: engine.clock().frames(),
            steps: engine.clock().steps(),
            sim_time: engine.clock().sim_time(),
            parameters: *engine.parameters(),
            run_state: engine.run_state(),
            max_separation,
            traces,
        }
    }

    /// Pretty JSON rendering.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> TraceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Print a run summary as JSON.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn print_run_summary(summary: &RunSummary) -> TraceResult<()> {
    println!("{}", summary.to_json()?);
    Ok(())
}
