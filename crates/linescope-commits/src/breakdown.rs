//! Language breakdown of a brush selection

use serde::Serialize;

use crate::commit::Commit;
use crate::language::LanguageCounts;
use crate::timeline::visible_lines;

/// One language's share of the selected lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    /// Language name
    pub language: String,
    /// Selected lines in this language
    pub lines: usize,
    /// Fraction of all selected lines, in `[0, 1]`
    pub share: f64,
}

/// Per-language line counts over a set of selected commits
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageBreakdown {
    /// Total selected lines
    pub total_lines: usize,
    /// Rows sorted by line count, largest first; ties keep first-seen order
    pub rows: Vec<BreakdownRow>,
}

impl LanguageBreakdown {
    /// Break down the lines of `selected` by language
    ///
    /// An empty selection has no rows.
    pub fn of<'a, I>(selected: I) -> Self
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let counts = LanguageCounts::tally(visible_lines(selected).map(|l| l.language.as_str()));
        let total_lines = counts.total();
        let rows = counts
            .iter()
            .map(|c| BreakdownRow {
                language: c.language.clone(),
                lines: c.lines,
                share: c.lines as f64 / total_lines as f64,
            })
            .collect();
        Self { total_lines, rows }
    }

    /// Check whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format a share as a percentage with one decimal, e.g. `42.9%`
#[must_use]
pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// Label for the number of selected commits
///
/// Empty when nothing is selected.
#[must_use]
pub fn selection_label(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 commit selected".to_string(),
        n => format!("{n} commits selected"),
    }
}
