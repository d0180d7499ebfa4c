//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without running the commands.

use std::path::PathBuf;

use clap::Parser;

#[path = "../src/cli.rs"]
#[allow(dead_code)]
mod cli;

use cli::{Args, Command};

#[test]
fn test_parse_chart() {
    let args = Args::try_parse_from(["beatclick", "chart", "--beats", "song.json"]).unwrap();
    assert_eq!(args.config, PathBuf::from("beatclick.toml"));
    match args.command {
        Command::Chart {
            beats,
            seed,
            output,
        } => {
            assert_eq!(beats, PathBuf::from("song.json"));
            assert!(seed.is_none());
            assert!(output.is_none());
        }
        _ => panic!("Expected Chart command"),
    }
}

#[test]
fn test_parse_chart_with_seed_and_output() {
    let args = Args::try_parse_from([
        "beatclick", "chart", "--beats", "song.json", "--seed", "42", "-o", "chart.json",
    ])
    .unwrap();
    match args.command {
        Command::Chart { seed, output, .. } => {
            assert_eq!(seed, Some(42));
            assert_eq!(output, Some(PathBuf::from("chart.json")));
        }
        _ => panic!("Expected Chart command"),
    }
}

#[test]
fn test_parse_config_after_subcommand() {
    let args = Args::try_parse_from([
        "beatclick", "chart", "--beats", "song.json", "--config", "hard.toml",
    ])
    .unwrap();
    assert_eq!(args.config, PathBuf::from("hard.toml"));
}

#[test]
fn test_parse_replay() {
    let args = Args::try_parse_from([
        "beatclick", "replay", "--chart", "chart.json", "--trace", "trace.json", "--json",
    ])
    .unwrap();
    match args.command {
        Command::Replay {
            chart,
            trace,
            json,
            archive,
        } => {
            assert_eq!(chart, PathBuf::from("chart.json"));
            assert_eq!(trace, PathBuf::from("trace.json"));
            assert!(json);
            assert!(archive.is_none());
        }
        _ => panic!("Expected Replay command"),
    }
}

#[test]
fn test_parse_simulate_defaults() {
    let args = Args::try_parse_from(["beatclick", "simulate", "--beats", "song.json"]).unwrap();
    match args.command {
        Command::Simulate {
            accuracy,
            seed,
            coarse_clock,
            archive,
            totals,
            ..
        } => {
            assert_eq!(accuracy, 0.9);
            assert!(seed.is_none());
            assert!(!coarse_clock);
            assert!(archive.is_none());
            assert!(totals.is_none());
        }
        _ => panic!("Expected Simulate command"),
    }
}

#[test]
fn test_parse_simulate_full() {
    let args = Args::try_parse_from([
        "beatclick",
        "simulate",
        "--beats",
        "song.json",
        "--accuracy",
        "0.5",
        "--coarse-clock",
        "--archive",
        "sessions",
        "--totals",
        "totals.json",
    ])
    .unwrap();
    match args.command {
        Command::Simulate {
            accuracy,
            coarse_clock,
            archive,
            totals,
            ..
        } => {
            assert_eq!(accuracy, 0.5);
            assert!(coarse_clock);
            assert_eq!(archive, Some(PathBuf::from("sessions")));
            assert_eq!(totals, Some(PathBuf::from("totals.json")));
        }
        _ => panic!("Expected Simulate command"),
    }
}

#[test]
fn test_missing_required_arg_fails() {
    // chart requires --beats
    assert!(Args::try_parse_from(["beatclick", "chart"]).is_err());
    // replay requires --trace
    assert!(Args::try_parse_from(["beatclick", "replay", "--chart", "c.json"]).is_err());
}

#[test]
fn test_subcommand_required() {
    assert!(Args::try_parse_from(["beatclick"]).is_err());
}

#[test]
fn test_invalid_command_fails() {
    let result = Args::try_parse_from(["beatclick", "invalid-command"]);
    assert!(result.is_err());
}
