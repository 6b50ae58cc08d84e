// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Rendering sink contract
//!
//! The explorer never draws anything itself. Every view it derives is handed
//! to a [`RenderSink`] as a self-contained [`Frame`]; a sink may paint it,
//! store it, or stream it to another process.

use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};
use linescope_commits::{CommitSummary, Region};
use serde::Serialize;
use thiserror::Error;

use crate::narrative::NarrativeStep;

// ============================================================================
// Error Types
// ============================================================================

/// Sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to write a frame
    #[error("Failed to write frame: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize a frame
    #[error("Failed to serialize frame: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Frames
// ============================================================================

/// One rendered view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum Frame {
    /// Repository totals
    Summary(CommitSummary),
    /// Language legend with click-to-isolate state
    Legend(LegendFrame),
    /// Commit dots for the current time window
    Scatter(ScatterFrame),
    /// Brush selection count and language breakdown
    Selection(SelectionFrame),
    /// Per-file line dots for the current time window
    Files(FilesFrame),
    /// Narrative steps, one per commit
    Narrative(NarrativeFrame),
}

impl Frame {
    /// Short name of the frame kind, matching its serialized tag
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::Summary(_) => "summary",
            Frame::Legend(_) => "legend",
            Frame::Scatter(_) => "scatter",
            Frame::Selection(_) => "selection",
            Frame::Files(_) => "files",
            Frame::Narrative(_) => "narrative",
        }
    }
}

/// A legend entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendItem {
    /// Language name
    pub language: String,
    /// Swatch color
    pub color: &'static str,
    /// Set when another language is isolated
    pub disabled: bool,
}

/// Legend view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendFrame {
    /// Legend title
    pub title: &'static str,
    /// Isolated language, if any
    pub active: Option<String>,
    /// Entries in sorted language order
    pub items: Vec<LegendItem>,
}

/// A commit dot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Commit id
    pub id: String,
    /// Abbreviated commit id
    pub short_id: String,
    /// Link to the commit, when a repository URL is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Commit author
    pub author: String,
    /// Commit timestamp
    pub datetime: DateTime<FixedOffset>,
    /// Hour of day with minutes as a fraction
    pub hour_fraction: f64,
    /// Changed lines
    pub total_lines: usize,
    /// Dominant language
    pub main_language: String,
    /// Dot color
    pub color: &'static str,
    /// Horizontal position in the plot area
    pub x: f64,
    /// Vertical position in the plot area
    pub y: f64,
    /// Dot radius
    pub r: f64,
    /// Inside the current brush
    pub selected: bool,
    /// Faded because another language is isolated
    pub dimmed: bool,
}

/// Scatter plot view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFrame {
    /// Current cutoff, if any commit exists
    pub cutoff: Option<DateTime<Utc>>,
    /// Slider position of the cutoff in `[0, 100]`
    pub progress: Option<f64>,
    /// Time axis domain over the full dataset
    pub x_domain: Option<[DateTime<Utc>; 2]>,
    /// Hour axis domain
    pub y_domain: [f64; 2],
    /// Visible commits in input order
    pub points: Vec<ScatterPoint>,
    /// Ids not shown in the previous scatter frame
    pub entering: Vec<String>,
    /// Ids shown before and still visible
    pub updating: Vec<String>,
    /// Ids shown before and no longer visible
    pub exiting: Vec<String>,
}

/// A language row of the selection breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionRow {
    /// Language name
    pub language: String,
    /// Selected lines
    pub lines: usize,
    /// Share of selected lines, in `[0, 1]`
    pub share: f64,
    /// Share formatted as a percentage
    pub percent: String,
}

/// Brush selection view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionFrame {
    /// Current brush
    pub region: Option<Region>,
    /// Number of selected commits
    pub count: usize,
    /// Count label; empty when nothing is selected
    pub label: String,
    /// Total selected lines
    pub total_lines: usize,
    /// Language breakdown, largest first
    pub rows: Vec<SelectionRow>,
}

/// A file and the colors of its lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// File path
    pub name: String,
    /// Visible lines in the file
    pub line_count: usize,
    /// One color per line, by the line's language
    pub colors: Vec<&'static str>,
}

/// File view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilesFrame {
    /// Current cutoff, if any commit exists
    pub cutoff: Option<DateTime<Utc>>,
    /// Files, largest first
    pub files: Vec<FileEntry>,
}

/// Narrative view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeFrame {
    /// Step currently entered, if any
    pub active: Option<usize>,
    /// Steps in chronological order
    pub steps: Vec<NarrativeStep>,
}

// ============================================================================
// Sinks
// ============================================================================

/// Consumer of rendered frames
pub trait RenderSink {
    /// Render one frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be delivered.
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError>;
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        (**self).render(frame)
    }
}

/// Sink that keeps every frame in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Vec<Frame>,
}

impl RecordingSink {
    /// Create an empty recording
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in render order
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Names of the recorded frame kinds, in render order
    #[must_use]
    pub fn kinds(&self) -> Vec<&'static str> {
        self.frames.iter().map(Frame::kind).collect()
    }

    /// The most recent frame of a kind
    #[must_use]
    pub fn last(&self, kind: &str) -> Option<&Frame> {
        self.frames.iter().rev().find(|f| f.kind() == kind)
    }

    /// Take the recorded frames, leaving the recording empty
    pub fn drain(&mut self) -> Vec<Frame> {
        std::mem::take(&mut self.frames)
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Sink that writes one JSON object per frame and line
#[derive(Debug)]
pub struct NdjsonSink<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSink for NdjsonSink<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
