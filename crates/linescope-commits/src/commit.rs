// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit aggregation
//!
//! Groups line records by commit id into [`Commit`]s with derived statistics.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use linescope_log::{LineRecord, OTHER_LANGUAGE};
use serde::Serialize;
use tracing::debug;

use crate::language::LanguageCounts;

/// A commit derived from its changed lines
///
/// The backing lines and language tallies are owned by the commit but left
/// out of serialization; they still take part in equality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    id: String,
    author: String,
    datetime: DateTime<FixedOffset>,
    hour_fraction: f64,
    total_lines: usize,
    main_language: String,
    #[serde(skip)]
    lines: Vec<LineRecord>,
    #[serde(skip)]
    language_counts: LanguageCounts,
}

impl Commit {
    /// Build a commit from the lines that share its id
    ///
    /// Author and timestamp come from the first line. Returns `None` for an
    /// empty group.
    #[must_use]
    pub fn from_lines(id: String, lines: Vec<LineRecord>) -> Option<Self> {
        let first = lines.first()?;
        let author = first.author.clone();
        let datetime = first.datetime;
        let hour_fraction = first.hour_fraction();

        let language_counts = LanguageCounts::tally(lines.iter().map(|l| l.language.as_str()));
        let main_language = language_counts
            .top()
            .map_or_else(|| OTHER_LANGUAGE.to_string(), |c| c.language.clone());

        Some(Self {
            id,
            author,
            datetime,
            hour_fraction,
            total_lines: lines.len(),
            main_language,
            lines,
            language_counts,
        })
    }

    /// Commit id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Abbreviated id (first 7 characters)
    #[must_use]
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(7) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    /// Commit author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Commit timestamp in the author's offset
    #[must_use]
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    /// Commit timestamp in UTC
    #[must_use]
    pub fn utc(&self) -> DateTime<Utc> {
        self.datetime.with_timezone(&Utc)
    }

    /// Calendar date in the author's offset
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.datetime.date_naive()
    }

    /// Hour of day plus minutes as a fraction
    #[must_use]
    pub fn hour_fraction(&self) -> f64 {
        self.hour_fraction
    }

    /// Number of changed lines
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Language with the most lines; first seen wins ties
    #[must_use]
    pub fn main_language(&self) -> &str {
        &self.main_language
    }

    /// The commit's line records, in log order
    #[must_use]
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    /// Lines per language, largest first
    #[must_use]
    pub fn language_counts(&self) -> &LanguageCounts {
        &self.language_counts
    }

    /// Number of distinct files touched
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.file.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Link to the commit under a repository web URL
    #[must_use]
    pub fn url(&self, repository: &str) -> String {
        format!("{}/commit/{}", repository.trim_end_matches('/'), self.id)
    }
}

/// Group line records into commits
///
/// Commits appear in the order their id is first seen in `records`.
#[must_use]
pub fn aggregate(records: &[LineRecord]) -> Vec<Commit> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<LineRecord>)> = Vec::new();

    for record in records {
        match index.get(record.commit_id.as_str()) {
            Some(&slot) => groups[slot].1.push(record.clone()),
            None => {
                index.insert(record.commit_id.as_str(), groups.len());
                groups.push((record.commit_id.as_str(), vec![record.clone()]));
            }
        }
    }

    let commits: Vec<Commit> = groups
        .into_iter()
        .filter_map(|(id, lines)| Commit::from_lines(id.to_string(), lines))
        .collect();

    debug!(
        commits = commits.len(),
        lines = records.len(),
        "Aggregated line records into commits"
    );

    commits
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn line(commit: &str, language: &str, file: &str, datetime: &str) -> LineRecord {
        LineRecord {
            commit_id: commit.to_string(),
            author: "Ada".to_string(),
            datetime: DateTime::parse_from_rfc3339(datetime).unwrap(),
            file: file.to_string(),
            language: language.to_string(),
            line: None,
            depth: None,
            length: None,
        }
    }

    #[test]
    fn test_two_languages_tie_first_seen_wins() {
        let records = vec![
            line("abc", "JavaScript", "a.js", "2025-01-01T10:00:00Z"),
            line("abc", "Markdown", "b.md", "2025-01-01T10:00:00Z"),
        ];
        let commits = aggregate(&records);

        assert_eq!(commits.len(), 1);
        let commit = &commits[0];
        assert_eq!(commit.total_lines(), 2);
        assert_eq!(commit.main_language(), "JavaScript");
        assert_eq!(commit.language_counts().get("JavaScript"), Some(1));
        assert_eq!(commit.language_counts().get("Markdown"), Some(1));
        assert_eq!(commit.language_counts().len(), 2);
    }

    #[test]
    fn test_majority_language_wins() {
        let records = vec![
            line("abc", "CSS", "a.css", "2025-01-01T10:00:00Z"),
            line("abc", "HTML", "a.html", "2025-01-01T10:00:00Z"),
            line("abc", "HTML", "a.html", "2025-01-01T10:00:00Z"),
        ];
        let commits = aggregate(&records);
        assert_eq!(commits[0].main_language(), "HTML");
    }

    #[test]
    fn test_first_seen_commit_order() {
        let records = vec![
            line("b", "CSS", "x.css", "2025-01-02T00:00:00Z"),
            line("a", "CSS", "x.css", "2025-01-01T00:00:00Z"),
            line("b", "CSS", "y.css", "2025-01-02T00:00:00Z"),
            line("c", "CSS", "x.css", "2025-01-03T00:00:00Z"),
        ];
        let ids: Vec<String> = aggregate(&records)
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_fields_come_from_first_line() {
        let mut second = line("abc", "CSS", "a.css", "2025-03-01T08:00:00Z");
        second.author = "Grace".to_string();
        let records = vec![line("abc", "CSS", "a.css", "2025-01-01T14:30:00+02:00"), second];

        let commit = &aggregate(&records)[0];
        assert_eq!(commit.author(), "Ada");
        assert_eq!(commit.datetime().to_rfc3339(), "2025-01-01T14:30:00+02:00");
        assert!((commit.hour_fraction() - 14.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_yields_no_commits() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_from_lines_empty_group() {
        assert!(Commit::from_lines("abc".to_string(), Vec::new()).is_none());
    }

    #[test]
    fn test_lines_are_not_serialized() {
        let records = vec![line("abc", "CSS", "a.css", "2025-01-01T10:00:00Z")];
        let json = serde_json::to_value(&aggregate(&records)[0]).expect("serialize");
        assert!(json.get("lines").is_none());
        assert!(json.get("language_counts").is_none());
        assert_eq!(json["main_language"], "CSS");
        assert_eq!(json["total_lines"], 1);
    }

    #[test]
    fn test_file_count_counts_distinct_paths() {
        let records = vec![
            line("abc", "CSS", "a.css", "2025-01-01T10:00:00Z"),
            line("abc", "CSS", "a.css", "2025-01-01T10:00:00Z"),
            line("abc", "HTML", "b.html", "2025-01-01T10:00:00Z"),
        ];
        assert_eq!(aggregate(&records)[0].file_count(), 2);
    }

    #[test]
    fn test_short_id_and_url() {
        let records = vec![line(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eb",
            "CSS",
            "a.css",
            "2025-01-01T10:00:00Z",
        )];
        let commit = &aggregate(&records)[0];
        assert_eq!(commit.short_id(), "1945ab9");
        assert_eq!(
            commit.url("https://github.com/example/portfolio/"),
            "https://github.com/example/portfolio/commit/1945ab9c752534e733c38ba0109dc3b741f0a6eb"
        );
    }

    #[test]
    fn test_short_id_handles_short_input() {
        let records = vec![line("abc", "CSS", "a.css", "2025-01-01T10:00:00Z")];
        assert_eq!(aggregate(&records)[0].short_id(), "abc");
    }
}
