//! CLI module for lorenz-trace.
//!
//! Headless driver around [`SimulationEngine`](crate::engine::SimulationEngine):
//! load a configuration, advance a number of frames, print a summary.
//! Kept out of `main.rs` so argument parsing and commands are testable.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, DEFAULT_FRAMES};
pub use commands::{check_config, run_cli, run_simulation};
pub use output::{print_help, print_run_summary, print_version, RunSummary, TraceSummary};

#[cfg(test)]
mod tests;
