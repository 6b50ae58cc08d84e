//! Per-language line tallies

use std::collections::HashMap;

use serde::Serialize;

/// Lines attributed to one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCount {
    /// Normalized language name
    pub language: String,
    /// Number of lines
    pub lines: usize,
}

/// Language tallies ordered by descending line count
///
/// Languages with equal counts keep the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageCounts(Vec<LanguageCount>);

impl LanguageCounts {
    /// Count lines per language
    #[must_use]
    pub fn tally<'a, I>(languages: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut counts: Vec<LanguageCount> = Vec::new();

        for language in languages {
            match index.get(language) {
                Some(&slot) => counts[slot].lines += 1,
                None => {
                    index.insert(language, counts.len());
                    counts.push(LanguageCount {
                        language: language.to_string(),
                        lines: 1,
                    });
                }
            }
        }

        // sort_by is stable: ties stay in first-seen order
        counts.sort_by(|a, b| b.lines.cmp(&a.lines));
        Self(counts)
    }

    /// The language with the most lines
    #[must_use]
    pub fn top(&self) -> Option<&LanguageCount> {
        self.0.first()
    }

    /// Line count for a language, if present
    #[must_use]
    pub fn get(&self, language: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|c| c.language == language)
            .map(|c| c.lines)
    }

    /// Check whether a language has any lines
    #[must_use]
    pub fn contains(&self, language: &str) -> bool {
        self.get(language).is_some()
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|c| c.lines).sum()
    }

    /// Number of distinct languages
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no languages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the tallies, largest first
    pub fn iter(&self) -> std::slice::Iter<'_, LanguageCount> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a LanguageCounts {
    type Item = &'a LanguageCount;
    type IntoIter = std::slice::Iter<'a, LanguageCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
