//! Repository summary

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::commit::Commit;

/// A commit reference shown in the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMark {
    /// Commit id
    pub id: String,
    /// Commit author
    pub author: String,
    /// Commit timestamp
    pub datetime: DateTime<FixedOffset>,
}

impl From<&Commit> for CommitMark {
    fn from(commit: &Commit) -> Self {
        Self {
            id: commit.id().to_string(),
            author: commit.author().to_string(),
            datetime: commit.datetime(),
        }
    }
}

/// Totals over a whole dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    /// Number of changed lines
    pub total_lines: usize,
    /// Number of commits
    pub total_commits: usize,
    /// Number of distinct authors
    pub unique_authors: usize,
    /// Number of distinct calendar dates with a commit, in each commit's own offset
    pub active_days: usize,
    /// Earliest commit
    pub first: Option<CommitMark>,
    /// Latest commit
    pub last: Option<CommitMark>,
}

impl CommitSummary {
    /// Summarize a set of commits
    ///
    /// When several commits share the earliest or latest instant, the one
    /// encountered first is reported.
    pub fn of<'a, I>(commits: I) -> Self
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut total_lines = 0;
        let mut total_commits = 0;
        let mut authors = HashSet::new();
        let mut days = HashSet::new();
        let mut first: Option<&Commit> = None;
        let mut last: Option<&Commit> = None;

        for commit in commits {
            total_lines += commit.total_lines();
            total_commits += 1;
            authors.insert(commit.author());
            days.insert(commit.local_date());

            if first.is_none_or(|f| commit.utc() < f.utc()) {
                first = Some(commit);
            }
            if last.is_none_or(|l| commit.utc() > l.utc()) {
                last = Some(commit);
            }
        }

        Self {
            total_lines,
            total_commits,
            unique_authors: authors.len(),
            active_days: days.len(),
            first: first.map(CommitMark::from),
            last: last.map(CommitMark::from),
        }
    }
}
