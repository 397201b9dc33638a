//! CLI argument parsing.
//!
//! This module provides the argument parser for the lorenz-trace CLI.
//! Parsing is separate from execution so it can be tested directly.

use std::path::PathBuf;

/// Frames advanced by `run` when `--frames` is not given.
pub const DEFAULT_FRAMES: u64 = 600;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the simulation headless and print a summary.
    Run {
        /// Optional configuration file; defaults apply without one.
        config_path: Option<PathBuf>,
        /// Number of frames to advance.
        frames: u64,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Validate a configuration file.
    Check {
        /// Path to the configuration file.
        config_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Command {
    /// True if the command asked for verbose output.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        matches!(self, Self::Run { verbose: true, .. })
    }
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "check" => Self::parse_check_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    ///
    /// The first non-flag argument is the configuration path. Unparseable
    /// numbers are ignored and the default kept.
    fn parse_run_command(args: &[String]) -> Command {
        let mut config_path = None;
        let mut frames = DEFAULT_FRAMES;
        let mut seed_override = None;
        let mut verbose = false;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--frames" | "-n" => {
                    if let Some(n) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                        frames = n;
                    }
                    i += 2;
                }
                "--seed" => {
                    if let Some(seed) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                        seed_override = Some(seed);
                    }
                    i += 2;
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                path if config_path.is_none() && !path.starts_with('-') => {
                    config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Run {
            config_path,
            frames,
            seed_override,
            verbose,
        }
    }

    /// Parse the 'check' command arguments.
    fn parse_check_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'check' command requires a configuration path");
            return Command::Help;
        }

        Command::Check {
            config_path: PathBuf::from(&args[2]),
        }
    }
}
