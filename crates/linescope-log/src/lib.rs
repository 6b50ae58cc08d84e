// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! linescope-log: Line-level change log loading for linescope
//!
//! This library crate parses the tabular line log (one row per changed line,
//! as produced by tools such as `elocuent`) into typed [`LineRecord`]s for
//! consumption by `linescope-commits`.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use linescope_log::{LoadOptions, load_path};
//!
//! let report = load_path("loc.csv", &LoadOptions::default()).expect("load log");
//! println!("{} lines, {} rows skipped", report.records.len(), report.skipped.len());
//! ```

pub mod error;
pub mod loader;
pub mod record;

pub use error::LogError;
pub use loader::{LoadOptions, LoadReport, SkipReason, SkippedRow, load_path, load_reader, parse_str};
pub use record::{LineRecord, OTHER_LANGUAGE, UNKNOWN_AUTHOR, UNKNOWN_FILE, normalize_language};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::LogError;
    pub use crate::loader::{LoadOptions, LoadReport, load_path, parse_str};
    pub use crate::record::LineRecord;
}
