// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! linescope-commits: Commit aggregation and filtering for linescope
//!
//! This library crate turns the flat [`LineRecord`](linescope_log::LineRecord)
//! log into [`Commit`]s and derives every view the explorer shows from them:
//! the time-filtered subset, per-file line groups, brush selections in plot
//! space, the repository summary and the language breakdown.
//!
//! All functions here are pure. Derived views borrow from the commits they
//! were computed from and are meant to be thrown away on the next event.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use linescope_commits::{aggregate, filter_by_time, TimeScale};
//! use linescope_log::{LoadOptions, load_path};
//!
//! let report = load_path("loc.csv", &LoadOptions::default()).expect("load");
//! let commits = aggregate(&report.records);
//! let scale = TimeScale::from_commits(&commits).expect("non-empty log");
//! let visible = filter_by_time(&commits, scale.at(50.0));
//! println!("{} of {} commits by mid-history", visible.len(), commits.len());
//! ```

pub mod breakdown;
pub mod commit;
pub mod files;
pub mod language;
pub mod selection;
pub mod summary;
pub mod timeline;

pub use breakdown::{BreakdownRow, LanguageBreakdown, format_share, selection_label};
pub use commit::{Commit, aggregate};
pub use files::{FileGroup, aggregate_files};
pub use language::{LanguageCount, LanguageCounts};
pub use selection::{Margin, PlotLayout, PlotScales, Region, is_selected, select};
pub use summary::{CommitMark, CommitSummary};
pub use timeline::{TimeScale, filter_by_time, visible_lines};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{Commit, aggregate};
    pub use crate::files::{FileGroup, aggregate_files};
    pub use crate::selection::{PlotLayout, PlotScales, Region, select};
    pub use crate::timeline::{TimeScale, filter_by_time};
}
