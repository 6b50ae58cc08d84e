// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line log loading
//!
//! The log is a CSV file with a header row and one row per changed line.
//! Recognized columns are `commit`, `author`, `date`, `time`, `timezone`,
//! `datetime`, `file`, `type`, `line`, `depth` and `length`; their order is
//! free and any other column is ignored.
//!
//! # Example
//!
//! ```
//! use linescope_log::{LoadOptions, parse_str};
//!
//! let csv = "file,line,type,commit,author,datetime\n\
//!            index.html,1,html,a1b2c3d,Ada,2025-01-05T10:30:00-08:00\n";
//! let report = parse_str(csv, &LoadOptions::default()).unwrap();
//! assert_eq!(report.records[0].language, "HTML");
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::LogError;
use crate::record::{LineRecord, UNKNOWN_AUTHOR, UNKNOWN_FILE, normalize_language};

/// Options controlling how malformed rows are treated
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Reject malformed rows with [`LogError::InvalidRow`] instead of
    /// skipping or bucketing them
    pub strict: bool,
}

impl LoadOptions {
    /// Create options that fail on the first malformed row
    #[must_use]
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Why a row could not be turned into a [`LineRecord`] as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The `commit` column is empty or absent
    MissingCommit,
    /// The `file` column is empty or absent
    MissingFile,
    /// Neither `datetime` nor `date`/`time`/`timezone` yield a timestamp
    InvalidDatetime {
        /// The text that failed to parse (empty when nothing was present)
        value: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCommit => write!(f, "missing commit id"),
            Self::MissingFile => write!(f, "missing file path"),
            Self::InvalidDatetime { value } if value.is_empty() => write!(f, "missing datetime"),
            Self::InvalidDatetime { value } => write!(f, "unparseable datetime '{value}'"),
        }
    }
}

/// A row left out of the load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based data row number (header excluded)
    pub row: usize,
    /// Why it was left out
    pub reason: SkipReason,
}

/// Outcome of loading a line log
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Records in file order
    pub records: Vec<LineRecord>,
    /// Rows that were dropped in lenient mode
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    /// Check whether nothing usable was loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One CSV row before validation; every column is optional text
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    commit: Option<String>,
    author: Option<String>,
    date: Option<String>,
    time: Option<String>,
    timezone: Option<String>,
    datetime: Option<String>,
    file: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    line: Option<String>,
    depth: Option<String>,
    length: Option<String>,
}

/// Load a line log from a file on disk
///
/// # Errors
///
/// Returns `LogError::Io` if the file cannot be opened, and any error
/// [`load_reader`] reports.
pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<LoadReport, LogError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Opening line log");
    let file = File::open(path)?;
    load_reader(BufReader::new(file), options)
}

/// Parse a line log held in memory
///
/// # Errors
///
/// See [`load_reader`].
pub fn parse_str(text: &str, options: &LoadOptions) -> Result<LoadReport, LogError> {
    load_reader(text.as_bytes(), options)
}

/// Load a line log from any reader
///
/// # Errors
///
/// Returns `LogError::Csv` for malformed CSV, and `LogError::InvalidRow` for
/// the first malformed row when `options.strict` is set.
pub fn load_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<LoadReport, LogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut report = LoadReport::default();

    for (idx, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        let row_number = idx + 1;
        let raw = row?;

        match convert_row(raw, options.strict) {
            Ok(record) => report.records.push(record),
            Err(reason) if options.strict => {
                return Err(LogError::InvalidRow {
                    row: row_number,
                    reason,
                });
            }
            Err(reason) => {
                warn!(row = row_number, reason = %reason, "Skipping malformed line record");
                report.skipped.push(SkippedRow {
                    row: row_number,
                    reason,
                });
            }
        }
    }

    info!(
        records = report.records.len(),
        skipped = report.skipped.len(),
        "Line log loaded"
    );

    Ok(report)
}

fn convert_row(raw: RawRow, strict: bool) -> Result<LineRecord, SkipReason> {
    let commit_id = non_empty(&raw.commit)
        .ok_or(SkipReason::MissingCommit)?
        .to_string();

    let datetime = resolve_datetime(&raw)?;

    let file = match non_empty(&raw.file) {
        Some(file) => file.to_string(),
        None if strict => return Err(SkipReason::MissingFile),
        None => UNKNOWN_FILE.to_string(),
    };

    Ok(LineRecord {
        commit_id,
        author: non_empty(&raw.author).unwrap_or(UNKNOWN_AUTHOR).to_string(),
        datetime,
        file,
        language: normalize_language(raw.kind.as_deref().unwrap_or("")),
        line: parse_count(&raw.line),
        depth: parse_count(&raw.depth),
        length: parse_count(&raw.length),
    })
}

fn resolve_datetime(raw: &RawRow) -> Result<DateTime<FixedOffset>, SkipReason> {
    if let Some(value) = non_empty(&raw.datetime) {
        return parse_timestamp(value).ok_or_else(|| SkipReason::InvalidDatetime {
            value: value.to_string(),
        });
    }

    let Some(date) = non_empty(&raw.date) else {
        return Err(SkipReason::InvalidDatetime {
            value: String::new(),
        });
    };
    let time = non_empty(&raw.time).unwrap_or("00:00:00");
    // `HH:MM` carries no seconds
    let seconds = if time.matches(':').count() == 1 { ":00" } else { "" };
    let timezone = non_empty(&raw.timezone).unwrap_or("+00:00");
    let combined = format!("{date}T{time}{seconds}{timezone}");

    parse_timestamp(&combined).ok_or(SkipReason::InvalidDatetime { value: combined })
}

/// Parse a timestamp in the shapes line logs are known to use
///
/// Offset-less values are taken as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    for format in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_count(field: &Option<String>) -> Option<u32> {
    non_empty(field).and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};
    use similar_asserts::assert_eq;

    const HEADER: &str = "file,line,type,commit,author,date,time,timezone,datetime,depth,length";

    fn csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_parse_full_row() {
        let text = csv(&[
            "style.css,3,css,4f1c2e9,Selina,2025-02-03,21:45:10,-08:00,2025-02-03T21:45:10-08:00,1,24",
        ]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");

        assert_eq!(report.records.len(), 1);
        assert!(report.skipped.is_empty());
        let record = &report.records[0];
        assert_eq!(record.commit_id, "4f1c2e9");
        assert_eq!(record.author, "Selina");
        assert_eq!(record.file, "style.css");
        assert_eq!(record.language, "CSS");
        assert_eq!(record.line, Some(3));
        assert_eq!(record.depth, Some(1));
        assert_eq!(record.length, Some(24));
        assert_eq!(record.datetime.hour(), 21);
        assert_eq!(record.datetime.offset().local_minus_utc(), -8 * 3600);
    }

    #[test]
    fn test_columns_in_any_order() {
        let text = "commit,datetime,file,type,author\nabc,2025-01-01T00:00:00Z,a.md,md,Ada\n";
        let report = parse_str(text, &LoadOptions::default()).expect("parse");
        assert_eq!(report.records[0].language, "Markdown");
        assert_eq!(report.records[0].line, None);
    }

    #[test]
    fn test_datetime_rebuilt_from_parts() {
        let text = csv(&["a.js,1,js,abc,Ada,2025-03-09,08:15:00,+05:30,,0,10"]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");
        let dt = report.records[0].datetime;
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.minute(), 15);
        assert_eq!(dt.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn test_datetime_parts_without_seconds() {
        let text = csv(&[
            "a.js,1,js,abc,Ada,2025-03-09,19:02,-08:00,,0,10",
            "b.js,1,js,def,Ada,2025-03-10,07:45,,,0,10",
        ]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");
        assert!(report.skipped.is_empty());
        assert_eq!(report.records.len(), 2);

        let dt = report.records[0].datetime;
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (19, 2, 0));
        assert_eq!(dt.offset().local_minus_utc(), -8 * 3600);
        assert_eq!(report.records[1].datetime.with_timezone(&Utc).hour(), 7);
    }

    #[test]
    fn test_missing_type_becomes_other() {
        let text = csv(&["LICENSE,1,,abc,Ada,,,,2025-01-01T00:00:00Z,0,10"]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");
        assert_eq!(report.records[0].language, "Other");
    }

    #[test]
    fn test_missing_author_becomes_unknown() {
        let text = csv(&["a.js,1,js,abc,,,,,2025-01-01T00:00:00Z,0,10"]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");
        assert_eq!(report.records[0].author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_missing_commit_is_skipped() {
        let text = csv(&[
            "a.js,1,js,,Ada,,,,2025-01-01T00:00:00Z,0,10",
            "a.js,2,js,abc,Ada,,,,2025-01-01T00:00:00Z,0,10",
        ]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");
        assert_eq!(report.records.len(), 1);
        assert_eq!(
            report.skipped,
            vec![SkippedRow {
                row: 1,
                reason: SkipReason::MissingCommit
            }]
        );
    }

    #[test]
    fn test_missing_file_is_bucketed() {
        let text = csv(&[",1,js,abc,Ada,,,,2025-01-01T00:00:00Z,0,10"]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");
        assert_eq!(report.records[0].file, UNKNOWN_FILE);
    }

    #[test]
    fn test_invalid_datetime_is_skipped() {
        let text = csv(&["a.js,1,js,abc,Ada,,,,yesterday,0,10"]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");
        assert!(report.is_empty());
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::InvalidDatetime {
                value: "yesterday".to_string()
            }
        );
    }

    #[test]
    fn test_strict_rejects_missing_file() {
        let text = csv(&[",1,js,abc,Ada,,,,2025-01-01T00:00:00Z,0,10"]);
        let err = parse_str(&text, &LoadOptions::strict()).unwrap_err();
        match err {
            LogError::InvalidRow { row, reason } => {
                assert_eq!(row, 1);
                assert_eq!(reason, SkipReason::MissingFile);
            }
            other => panic!("Expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_rejects_missing_commit() {
        let text = csv(&["a.js,1,js,,Ada,,,,2025-01-01T00:00:00Z,0,10"]);
        assert!(matches!(
            parse_str(&text, &LoadOptions::strict()),
            Err(LogError::InvalidRow {
                reason: SkipReason::MissingCommit,
                ..
            })
        ));
    }

    #[test]
    fn test_non_numeric_counts_are_none() {
        let text = csv(&["a.js,n/a,js,abc,Ada,,,,2025-01-01T00:00:00Z,deep,"]);
        let report = parse_str(&text, &LoadOptions::default()).expect("parse");
        let record = &report.records[0];
        assert_eq!(record.line, None);
        assert_eq!(record.depth, None);
        assert_eq!(record.length, None);
    }

    #[test]
    fn test_header_only_is_empty() {
        let report = parse_str(HEADER, &LoadOptions::default()).expect("parse");
        assert!(report.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let expected = DateTime::parse_from_rfc3339("2025-01-05T10:30:00+00:00").unwrap();
        assert_eq!(parse_timestamp("2025-01-05T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-05 10:30:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-05T10:30:00+0000"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-05T10:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-01-05").map(|dt| dt.with_timezone(&Utc).hour()),
            Some(0)
        );
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::MissingCommit.to_string(), "missing commit id");
        assert_eq!(
            SkipReason::InvalidDatetime {
                value: String::new()
            }
            .to_string(),
            "missing datetime"
        );
    }
}
