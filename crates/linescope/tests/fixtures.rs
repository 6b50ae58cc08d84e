// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Shared fixtures for linescope integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use linescope::Explorer;
use linescope_log::{LoadOptions, load_path};

fn manifest_dir() -> PathBuf {
    PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"))
}

/// Path to the line log fixture shipped with linescope-log
pub fn log_fixture_path() -> PathBuf {
    manifest_dir()
        .join("..")
        .join("linescope-log")
        .join("tests")
        .join("fixtures")
        .join("loc.csv")
}

/// Path to the projects fixture
pub fn projects_fixture_path() -> PathBuf {
    Path::new(&manifest_dir())
        .join("tests")
        .join("data")
        .join("projects.json")
}

/// Explorer over the line log fixture
pub fn fixture_explorer() -> Explorer {
    let report =
        load_path(log_fixture_path(), &LoadOptions::default()).expect("Failed to load fixture");
    Explorer::new(report.records)
}
