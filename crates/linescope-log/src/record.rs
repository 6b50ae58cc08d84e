//! Line record types

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

/// Language assigned to lines whose `type` column is empty or missing
pub const OTHER_LANGUAGE: &str = "Other";

/// Author assigned to lines whose `author` column is empty or missing
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// File bucket for lines whose `file` column is empty or missing
pub const UNKNOWN_FILE: &str = "unknown";

/// A single changed line from the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Commit the line belongs to
    pub commit_id: String,
    /// Commit author
    pub author: String,
    /// Commit timestamp, in the author's offset
    pub datetime: DateTime<FixedOffset>,
    /// Path of the file the line belongs to
    pub file: String,
    /// Normalized language (see [`normalize_language`])
    pub language: String,
    /// Line number within the file
    pub line: Option<u32>,
    /// Indentation depth
    pub depth: Option<u32>,
    /// Line length in characters
    pub length: Option<u32>,
}

impl LineRecord {
    /// Hour of day plus minutes as a fraction, in the record's own offset
    #[must_use]
    pub fn hour_fraction(&self) -> f64 {
        f64::from(self.datetime.hour()) + f64::from(self.datetime.minute()) / 60.0
    }
}

/// Normalize a raw `type` value into a display language
///
/// Known extensions are matched case-insensitively; any other non-empty value
/// passes through unchanged, and an empty value becomes [`OTHER_LANGUAGE`].
#[must_use]
pub fn normalize_language(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return OTHER_LANGUAGE.to_string();
    }
    let known = match raw.to_ascii_lowercase().as_str() {
        "css" => Some("CSS"),
        "html" => Some("HTML"),
        "js" | "javascript" => Some("JavaScript"),
        "json" => Some("JSON"),
        "md" | "markdown" => Some("Markdown"),
        _ => None,
    };
    known.map_or_else(|| raw.to_string(), str::to_string)
}
