//! Language palette and legend

use std::collections::BTreeSet;

use linescope_log::LineRecord;

use crate::sink::{LegendFrame, LegendItem};

/// The Tableau10 categorical palette
pub const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Language to color assignment
///
/// Languages are sorted by name and colored in that order, wrapping around
/// the palette after ten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    languages: Vec<String>,
}

impl Palette {
    /// Build the palette from every language present in the log
    #[must_use]
    pub fn from_records(records: &[LineRecord]) -> Self {
        let languages: BTreeSet<&str> = records.iter().map(|r| r.language.as_str()).collect();
        Self {
            languages: languages.into_iter().map(str::to_string).collect(),
        }
    }

    /// Languages in legend order
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Check whether a language is in the palette
    #[must_use]
    pub fn contains(&self, language: &str) -> bool {
        self.position(language).is_some()
    }

    fn position(&self, language: &str) -> Option<usize> {
        self.languages
            .binary_search_by(|l| l.as_str().cmp(language))
            .ok()
    }

    /// Color of a language
    ///
    /// A language outside the palette gets the next unassigned slot.
    #[must_use]
    pub fn color(&self, language: &str) -> &'static str {
        let slot = self.position(language).unwrap_or(self.languages.len());
        TABLEAU10[slot % TABLEAU10.len()]
    }

    /// Legend view with `active` isolated
    #[must_use]
    pub fn legend(&self, active: Option<&str>) -> LegendFrame {
        let items = self
            .languages
            .iter()
            .map(|language| LegendItem {
                language: language.clone(),
                color: self.color(language),
                disabled: active.is_some_and(|a| a != language.as_str()),
            })
            .collect();
        LegendFrame {
            title: "Languages",
            active: active.map(str::to_string),
            items,
        }
    }
}
