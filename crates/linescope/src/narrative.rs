//! Commit narrative
//!
//! One step per commit, oldest first. Scrolling a step into view moves the
//! time cutoff to that commit.

use chrono::{DateTime, FixedOffset, Utc};
use linescope_commits::Commit;
use serde::Serialize;

/// A narrative step describing one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeStep {
    /// Position in the narrative
    pub index: usize,
    /// Commit id
    pub id: String,
    /// Commit author
    pub author: String,
    /// Commit timestamp
    pub datetime: DateTime<FixedOffset>,
    /// Changed lines
    pub total_lines: usize,
    /// Distinct files touched
    pub file_count: usize,
    /// Prose line for display
    pub text: String,
}

impl NarrativeStep {
    /// Cutoff that entering this step applies
    #[must_use]
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.datetime.with_timezone(&Utc)
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Build the narrative for a set of commits
///
/// Commits with the same instant keep their input order.
#[must_use]
pub fn steps(commits: &[Commit]) -> Vec<NarrativeStep> {
    let mut ordered: Vec<&Commit> = commits.iter().collect();
    ordered.sort_by_key(|c| c.utc());

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, commit)| {
            let files = commit.file_count();
            let text = format!(
                "On {}, {} edited {} across {}.",
                commit.datetime().format("%b %d, %Y at %H:%M"),
                commit.author(),
                plural(commit.total_lines(), "line", "lines"),
                plural(files, "file", "files"),
            );
            NarrativeStep {
                index,
                id: commit.id().to_string(),
                author: commit.author().to_string(),
                datetime: commit.datetime(),
                total_lines: commit.total_lines(),
                file_count: files,
                text,
            }
        })
        .collect()
}
