//! lorenz-trace CLI
//!
//! Headless driver for the Lorenz trace engine.

use std::process::ExitCode;

use lorenz_trace::cli::{run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.command.is_verbose() {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    run_cli(args)
}
