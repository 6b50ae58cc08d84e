// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI parsing tests
//!
//! These tests verify flag parsing, subcommand arguments and the log level
//! derived from the verbosity flags.

use std::path::PathBuf;

use clap::Parser;
use linescope::config::{Command, Config};
use tracing::Level;

// ============================================================================
// Global flags
// ============================================================================

#[test]
fn test_no_arguments_defaults_to_summary() {
    let config = Config::try_parse_from(["linescope"]).expect("parse should succeed");
    assert_eq!(config.command(), Command::Summary);
    assert_eq!(config.log_level(), Level::INFO);
}

#[test]
fn test_input_short_and_long() {
    let config =
        Config::try_parse_from(["linescope", "-i", "data/loc.csv"]).expect("parse should succeed");
    assert_eq!(config.input_path(), PathBuf::from("data/loc.csv"));

    let config = Config::try_parse_from(["linescope", "--input", "other.csv"])
        .expect("parse should succeed");
    assert_eq!(config.input_path(), PathBuf::from("other.csv"));
}

#[test]
fn test_global_flags_after_subcommand() {
    let config = Config::try_parse_from(["linescope", "summary", "-q", "--strict"])
        .expect("parse should succeed");
    assert!(config.quiet);
    assert!(config.strict);
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_verbose_sets_debug() {
    let config = Config::try_parse_from(["linescope", "-v"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_verbose_flag_value_syntax_not_supported() {
    let result = Config::try_parse_from(["linescope", "--verbose=true"]);
    assert!(result.is_err(), "Boolean flags don't support =value syntax");
}

#[test]
fn test_repo_url() {
    let config = Config::try_parse_from([
        "linescope",
        "--repo-url",
        "https://github.com/example/portfolio",
        "scatter",
    ])
    .expect("parse should succeed");
    assert_eq!(
        config.repo_url.as_deref(),
        Some("https://github.com/example/portfolio")
    );
}

// ============================================================================
// Subcommands
// ============================================================================

#[test]
fn test_scatter_progress() {
    let config = Config::try_parse_from(["linescope", "scatter", "--progress", "42.5"])
        .expect("parse should succeed");
    assert_eq!(config.command(), Command::Scatter { progress: 42.5 });
}

#[test]
fn test_files_progress_defaults_to_full() {
    let config = Config::try_parse_from(["linescope", "files"]).expect("parse should succeed");
    assert_eq!(config.command(), Command::Files { progress: 100.0 });
}

#[test]
fn test_select_region() {
    let config = Config::try_parse_from([
        "linescope", "select", "--x0", "-5", "--y0", "0", "--x1", "300", "--y1", "200", "-p",
        "75",
    ])
    .expect("parse should succeed");
    assert_eq!(
        config.command(),
        Command::Select {
            x0: -5.0,
            y0: 0.0,
            x1: 300.0,
            y1: 200.0,
            progress: 75.0,
        }
    );
}

#[test]
fn test_select_requires_all_corners() {
    let result = Config::try_parse_from(["linescope", "select", "--x0", "0", "--y0", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_narrative_step() {
    let config = Config::try_parse_from(["linescope", "narrative", "--step", "3"])
        .expect("parse should succeed");
    assert_eq!(config.command(), Command::Narrative { step: Some(3) });
}

#[test]
fn test_projects_options() {
    let config = Config::try_parse_from([
        "linescope",
        "projects",
        "-p",
        "lib/projects.json",
        "--search",
        "weather",
        "--year",
        "2025",
        "--latest",
        "3",
    ])
    .expect("parse should succeed");
    assert_eq!(
        config.command(),
        Command::Projects {
            projects: PathBuf::from("lib/projects.json"),
            search: Some("weather".to_string()),
            year: Some("2025".to_string()),
            latest: Some(3),
        }
    );
    assert!(!config.command().needs_log());
}

#[test]
fn test_replay_needs_log() {
    let config = Config::try_parse_from(["linescope", "replay"]).expect("parse should succeed");
    assert!(config.command().needs_log());
}
