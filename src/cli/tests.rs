//! CLI module tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::args::{Args, Command, DEFAULT_FRAMES};
use super::commands::{check_config, run_simulation};
use super::output::RunSummary;
use std::io::Write;
use std::path::PathBuf;

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["lorenz-trace"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_flags() {
    for flag in ["-h", "--help", "help"] {
        let args = Args::parse_from(["lorenz-trace", flag]);
        assert_eq!(args.command, Command::Help);
    }
}

#[test]
fn test_parse_version_flags() {
    for flag in ["-V", "--version", "version"] {
        let args = Args::parse_from(["lorenz-trace", flag]);
        assert_eq!(args.command, Command::Version);
    }
}

#[test]
fn test_parse_unknown_command_shows_help() {
    let args = Args::parse_from(["lorenz-trace", "render"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_defaults() {
    let args = Args::parse_from(["lorenz-trace", "run"]);
    assert_eq!(
        args.command,
        Command::Run {
            config_path: None,
            frames: DEFAULT_FRAMES,
            seed_override: None,
            verbose: false,
        }
    );
}

#[test]
fn test_parse_run_all_options() {
    let args = Args::parse_from([
        "lorenz-trace",
        "run",
        "lorenz.yaml",
        "--frames",
        "120",
        "--seed",
        "7",
        "-v",
    ]);
    assert_eq!(
        args.command,
        Command::Run {
            config_path: Some(PathBuf::from("lorenz.yaml")),
            frames: 120,
            seed_override: Some(7),
            verbose: true,
        }
    );
    assert!(args.command.is_verbose());
}

#[test]
fn test_parse_run_options_before_path() {
    let args = Args::parse_from(["lorenz-trace", "run", "-n", "5", "cfg.yaml"]);
    match args.command {
        Command::Run {
            config_path,
            frames,
            ..
        } => {
            assert_eq!(config_path, Some(PathBuf::from("cfg.yaml")));
            assert_eq!(frames, 5);
        }
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn test_parse_run_bad_number_keeps_default() {
    let args = Args::parse_from(["lorenz-trace", "run", "--frames", "lots"]);
    match args.command {
        Command::Run { frames, .. } => assert_eq!(frames, DEFAULT_FRAMES),
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn test_parse_check_requires_path() {
    let args = Args::parse_from(["lorenz-trace", "check"]);
    assert_eq!(args.command, Command::Help);

    let args = Args::parse_from(["lorenz-trace", "check", "a.yaml"]);
    assert_eq!(
        args.command,
        Command::Check {
            config_path: PathBuf::from("a.yaml")
        }
    );
    assert!(!args.command.is_verbose());
}

// ============================================================================
// Command tests
// ============================================================================

fn write_config(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write config");
    file
}

#[test]
fn test_run_simulation_with_config_file() {
    let file = write_config(
        r"
num_traces: 2
trace_capacity: 50
parameters:
  steps_per_frame: 2
seed: 5
",
    );

    let summary = run_simulation(Some(file.path()), 10, None).expect("run");

    assert_eq!(summary.seed, 5);
    assert_eq!(summary.frames, 10);
    assert_eq!(summary.steps, 20);
    assert_eq!(summary.traces.len(), 2);
    for t in &summary.traces {
        assert_eq!(t.written, 20);
        assert!(!t.diverged);
    }
}

#[test]
fn test_run_simulation_seed_override_is_reproducible() {
    let a = run_simulation(None, 5, Some(99)).expect("run a");
    let b = run_simulation(None, 5, Some(99)).expect("run b");
    assert_eq!(a, b);
    assert_eq!(a.seed, 99);
}

#[test]
fn test_run_simulation_missing_file_fails() {
    let result = run_simulation(Some(PathBuf::from("/nonexistent.yaml").as_path()), 1, None);
    assert!(result.is_err());
}

#[test]
fn test_check_config_rejects_invalid() {
    let file = write_config("num_traces: 0\n");
    let err = check_config(file.path()).expect_err("invalid");
    assert!(err.is_config_error());
}

#[test]
fn test_check_config_accepts_valid() {
    let file = write_config("integrator: rk4\n");
    assert!(check_config(file.path()).is_ok());
}

#[test]
fn test_summary_json_contains_fields() {
    let summary: RunSummary = run_simulation(None, 1, Some(1)).expect("run");
    let json = summary.to_json().expect("json");
    assert!(json.contains("\"seed\": 1"));
    assert!(json.contains("\"traces\""));
    assert!(json.contains("\"max_separation\""));
}
