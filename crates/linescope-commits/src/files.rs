//! Per-file line grouping

use std::collections::HashMap;

use linescope_log::LineRecord;
use serde::Serialize;

use crate::commit::Commit;
use crate::timeline::visible_lines;

/// Lines of one file across a commit subset, in log order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileGroup<'a> {
    /// File path as logged
    pub name: &'a str,
    /// Lines belonging to the file
    pub lines: Vec<&'a LineRecord>,
}

impl FileGroup<'_> {
    /// Number of lines in the group
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Group the lines of `commits` by file, largest file first
///
/// Files with equal line counts keep first-seen order. The result is rebuilt
/// from scratch on every call.
pub fn aggregate_files<'a, I>(commits: I) -> Vec<FileGroup<'a>>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<FileGroup<'a>> = Vec::new();

    for line in visible_lines(commits) {
        let name = line.file.as_str();
        match index.get(name) {
            Some(&slot) => groups[slot].lines.push(line),
            None => {
                index.insert(name, groups.len());
                groups.push(FileGroup {
                    name,
                    lines: vec![line],
                });
            }
        }
    }

    groups.sort_by(|a, b| b.lines.len().cmp(&a.lines.len()));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::aggregate;
    use chrono::DateTime;
    use similar_asserts::assert_eq;

    fn line(commit: &str, file: &str, n: u32) -> LineRecord {
        LineRecord {
            commit_id: commit.to_string(),
            author: "Ada".to_string(),
            datetime: DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z").unwrap(),
            file: file.to_string(),
            language: "CSS".to_string(),
            line: Some(n),
            depth: None,
            length: None,
        }
    }

    #[test]
    fn test_sorted_by_size_descending() {
        let commits = aggregate(&[line("a", "x", 1), line("a", "y", 1), line("b", "y", 2)]);
        let groups = aggregate_files(&commits);
        let summary: Vec<(&str, usize)> = groups.iter().map(|g| (g.name, g.line_count())).collect();
        assert_eq!(summary, vec![("y", 2), ("x", 1)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let commits = aggregate(&[
            line("a", "b", 1),
            line("a", "a", 1),
            line("a", "c", 1),
            line("a", "a", 2),
            line("a", "b", 2),
        ]);
        let names: Vec<&str> = aggregate_files(&commits).iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_lines_follow_commit_then_log_order() {
        let commits = aggregate(&[line("a", "x", 3), line("b", "x", 1), line("a", "x", 2)]);
        let groups = aggregate_files(&commits);
        let order: Vec<Option<u32>> = groups[0].lines.iter().map(|l| l.line).collect();
        assert_eq!(order, vec![Some(3), Some(2), Some(1)]);
    }

    #[test]
    fn test_only_given_commits_are_counted() {
        let commits = aggregate(&[line("a", "x", 1), line("b", "y", 1)]);
        let groups = aggregate_files(commits.iter().filter(|c| c.id() == "b"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "y");
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_files(std::iter::empty::<&Commit>()).is_empty());
    }
}
