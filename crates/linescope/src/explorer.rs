// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! View synchronization
//!
//! The [`Explorer`] owns the canonical dataset and the two pieces of
//! interaction state, the time cutoff and the brush selection. Every
//! transition updates that state and then re-derives the affected views from
//! scratch, handing each to a [`RenderSink`]. Nothing is updated
//! incrementally, so each event fully supersedes the previous one.
//!
//! # Example
//!
//! ```
//! use linescope::explorer::Explorer;
//! use linescope::sink::RecordingSink;
//! use linescope_log::{LoadOptions, parse_str};
//!
//! let csv = "commit,author,datetime,file,type\n\
//!            a1,Ada,2025-01-01T09:00:00Z,index.html,html\n\
//!            b2,Ada,2025-01-02T21:00:00Z,main.js,js\n";
//! let report = parse_str(csv, &LoadOptions::default()).unwrap();
//! let mut explorer = Explorer::new(report.records);
//! let mut sink = RecordingSink::new();
//!
//! explorer.render_all(&mut sink).unwrap();
//! explorer.set_progress(0.0, &mut sink).unwrap();
//! assert_eq!(explorer.visible().len(), 1);
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use linescope_commits::{
    Commit, CommitSummary, LanguageBreakdown, PlotLayout, PlotScales, Region, TimeScale,
    aggregate, aggregate_files, filter_by_time, format_share, select, selection_label,
};
use linescope_log::LineRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::legend::Palette;
use crate::narrative::{self, NarrativeStep};
use crate::sink::{
    FileEntry, FilesFrame, Frame, LegendFrame, NarrativeFrame, RenderSink, ScatterFrame,
    ScatterPoint, SelectionFrame, SelectionRow, SinkError,
};

/// Hour-of-day axis domain
const HOUR_DOMAIN: [f64; 2] = [0.0, 24.0];

/// A serialized user interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Interaction {
    /// Slider moved to a progress percent
    Progress {
        /// Progress in `[0, 100]`
        value: f64,
    },
    /// Cutoff set to an explicit instant
    Cutoff {
        /// New cutoff
        at: DateTime<Utc>,
    },
    /// Narrative step scrolled into view
    Step {
        /// Step index
        index: usize,
    },
    /// Brush moved or cleared
    Select {
        /// New brush; absent or null clears it
        #[serde(default)]
        region: Option<Region>,
    },
    /// Legend entry clicked
    Toggle {
        /// Language clicked
        language: String,
    },
}

/// Interactive explorer over one loaded log
#[derive(Debug, Clone)]
pub struct Explorer {
    record_count: usize,
    commits: Vec<Commit>,
    layout: PlotLayout,
    time_scale: Option<TimeScale>,
    plot: Option<PlotScales>,
    palette: Palette,
    steps: Vec<NarrativeStep>,
    repo_url: Option<String>,

    cutoff: Option<DateTime<Utc>>,
    selection: Option<Region>,
    active_language: Option<String>,
    active_step: Option<usize>,
    /// Commit ids in the last scatter frame
    rendered: Vec<String>,
}

impl Explorer {
    /// Build an explorer over loaded line records
    ///
    /// The cutoff starts at the latest commit, so everything is visible.
    #[must_use]
    pub fn new(records: Vec<LineRecord>) -> Self {
        let commits = aggregate(&records);
        let palette = Palette::from_records(&records);
        let layout = PlotLayout::default();
        let time_scale = TimeScale::from_commits(&commits);
        let plot = PlotScales::fit(&commits, &layout);
        let steps = narrative::steps(&commits);

        info!(
            records = records.len(),
            commits = commits.len(),
            languages = palette.languages().len(),
            "Explorer ready"
        );

        Self {
            record_count: records.len(),
            commits,
            layout,
            time_scale,
            plot,
            palette,
            steps,
            repo_url: None,
            cutoff: time_scale.map(|s| s.end()),
            selection: None,
            active_language: None,
            active_step: None,
            rendered: Vec::new(),
        }
    }

    /// Use a different plot layout
    #[must_use]
    pub fn with_layout(mut self, layout: PlotLayout) -> Self {
        self.plot = PlotScales::fit(&self.commits, &layout);
        self.layout = layout;
        self
    }

    /// Link scatter points to commits under a repository web URL
    #[must_use]
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = Some(url.into());
        self
    }

    // ------------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------------

    /// Number of line records loaded
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// All commits in first-seen order
    #[must_use]
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Plot layout in use
    #[must_use]
    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    /// Time scale over the full dataset
    #[must_use]
    pub fn time_scale(&self) -> Option<&TimeScale> {
        self.time_scale.as_ref()
    }

    /// Narrative steps
    #[must_use]
    pub fn steps(&self) -> &[NarrativeStep] {
        &self.steps
    }

    /// Current cutoff
    #[must_use]
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.cutoff
    }

    /// Slider position of the current cutoff
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        let scale = self.time_scale.as_ref()?;
        self.cutoff.map(|cutoff| scale.progress_of(cutoff))
    }

    /// Current brush
    #[must_use]
    pub fn selection(&self) -> Option<&Region> {
        self.selection.as_ref()
    }

    /// Isolated legend language
    #[must_use]
    pub fn active_language(&self) -> Option<&str> {
        self.active_language.as_deref()
    }

    /// Commits at or before the cutoff
    #[must_use]
    pub fn visible(&self) -> Vec<&Commit> {
        match self.cutoff {
            Some(cutoff) => filter_by_time(&self.commits, cutoff),
            None => self.commits.iter().collect(),
        }
    }

    /// Visible commits inside the brush
    #[must_use]
    pub fn selected(&self) -> Vec<&Commit> {
        match &self.plot {
            Some(plot) => select(self.visible(), plot, self.selection.as_ref()),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    /// Repository totals over the full dataset
    #[must_use]
    pub fn summary_frame(&self) -> CommitSummary {
        CommitSummary::of(&self.commits)
    }

    /// Legend with the current isolation state
    #[must_use]
    pub fn legend_frame(&self) -> LegendFrame {
        self.palette.legend(self.active_language.as_deref())
    }

    /// Scatter plot of the visible commits
    ///
    /// Entering, updating and exiting ids are computed against the last
    /// scatter frame rendered.
    #[must_use]
    pub fn scatter_frame(&self) -> ScatterFrame {
        let visible = self.visible();
        let selected: HashSet<&str> = self.selected().into_iter().map(Commit::id).collect();
        let previous: HashSet<&str> = self.rendered.iter().map(String::as_str).collect();

        let points: Vec<ScatterPoint> = match &self.plot {
            Some(plot) => visible
                .iter()
                .map(|commit| self.point(commit, plot, &selected))
                .collect(),
            None => Vec::new(),
        };

        let current: HashSet<&str> = points.iter().map(|p| p.id.as_str()).collect();
        let (updating, entering): (Vec<String>, Vec<String>) = points
            .iter()
            .map(|p| p.id.clone())
            .partition(|id| previous.contains(id.as_str()));
        let exiting = self
            .rendered
            .iter()
            .filter(|id| !current.contains(id.as_str()))
            .cloned()
            .collect();

        ScatterFrame {
            cutoff: self.cutoff,
            progress: self.progress(),
            x_domain: self.time_scale.map(|s| [s.start(), s.end()]),
            y_domain: HOUR_DOMAIN,
            points,
            entering,
            updating,
            exiting,
        }
    }

    fn point(&self, commit: &Commit, plot: &PlotScales, selected: &HashSet<&str>) -> ScatterPoint {
        let (x, y) = plot.project(commit);
        ScatterPoint {
            id: commit.id().to_string(),
            short_id: commit.short_id().to_string(),
            url: self.repo_url.as_deref().map(|base| commit.url(base)),
            author: commit.author().to_string(),
            datetime: commit.datetime(),
            hour_fraction: commit.hour_fraction(),
            total_lines: commit.total_lines(),
            main_language: commit.main_language().to_string(),
            color: self.palette.color(commit.main_language()),
            x,
            y,
            r: plot.radius(commit),
            selected: selected.contains(commit.id()),
            dimmed: self
                .active_language
                .as_deref()
                .is_some_and(|active| active != commit.main_language()),
        }
    }

    /// Per-file view of the visible commits
    #[must_use]
    pub fn files_frame(&self) -> FilesFrame {
        let files = aggregate_files(self.visible())
            .into_iter()
            .map(|group| FileEntry {
                name: group.name.to_string(),
                line_count: group.line_count(),
                colors: group
                    .lines
                    .iter()
                    .map(|line| self.palette.color(&line.language))
                    .collect(),
            })
            .collect();
        FilesFrame {
            cutoff: self.cutoff,
            files,
        }
    }

    /// Selection count and language breakdown
    #[must_use]
    pub fn selection_frame(&self) -> SelectionFrame {
        let selected = self.selected();
        let breakdown = LanguageBreakdown::of(selected.iter().copied());
        let rows = breakdown
            .rows
            .into_iter()
            .map(|row| SelectionRow {
                percent: format_share(row.share),
                language: row.language,
                lines: row.lines,
                share: row.share,
            })
            .collect();
        SelectionFrame {
            region: self.selection,
            count: selected.len(),
            label: selection_label(selected.len()),
            total_lines: breakdown.total_lines,
            rows,
        }
    }

    /// Narrative steps with the entered step marked
    #[must_use]
    pub fn narrative_frame(&self) -> NarrativeFrame {
        NarrativeFrame {
            active: self.active_step,
            steps: self.steps.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Render every view
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a frame.
    pub fn render_all<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SinkError> {
        sink.render(&Frame::Summary(self.summary_frame()))?;
        sink.render(&Frame::Legend(self.legend_frame()))?;
        self.render_scatter(sink)?;
        sink.render(&Frame::Files(self.files_frame()))?;
        sink.render(&Frame::Narrative(self.narrative_frame()))?;
        sink.render(&Frame::Selection(self.selection_frame()))
    }

    /// Move the cutoff to an instant
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a frame.
    pub fn set_cutoff<S: RenderSink + ?Sized>(
        &mut self,
        cutoff: DateTime<Utc>,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        self.cutoff = Some(cutoff);
        self.active_step = None;
        self.render_time_views(sink)
    }

    /// Move the cutoff to a progress percent of the full time range
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a frame.
    pub fn set_progress<S: RenderSink + ?Sized>(
        &mut self,
        progress: f64,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        match self.time_scale {
            Some(scale) => self.set_cutoff(scale.at(progress), sink),
            None => self.render_time_views(sink),
        }
    }

    /// Enter a narrative step, moving the cutoff to its commit
    ///
    /// An out-of-range step leaves the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a frame.
    pub fn enter_step<S: RenderSink + ?Sized>(
        &mut self,
        index: usize,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        let Some(cutoff) = self.steps.get(index).map(NarrativeStep::cutoff) else {
            warn!(
                step = index,
                steps = self.steps.len(),
                "Ignoring narrative step out of range"
            );
            return self.render_time_views(sink);
        };
        self.cutoff = Some(cutoff);
        self.active_step = Some(index);
        self.render_time_views(sink)?;
        sink.render(&Frame::Narrative(self.narrative_frame()))
    }

    /// Replace the brush
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a frame.
    pub fn set_selection<S: RenderSink + ?Sized>(
        &mut self,
        region: Option<Region>,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        self.selection = region;
        let frame = self.selection_frame();
        debug!(selected = frame.count, "Selection updated");
        sink.render(&Frame::Selection(frame))?;
        self.render_scatter(sink)
    }

    /// Isolate a language, or clear the isolation when it is already active
    ///
    /// Languages absent from the legend are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a frame.
    pub fn toggle_language<S: RenderSink + ?Sized>(
        &mut self,
        language: &str,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        if !self.palette.contains(language) {
            warn!(language, "Ignoring toggle for unknown language");
        } else if self.active_language.as_deref() == Some(language) {
            self.active_language = None;
        } else {
            self.active_language = Some(language.to_string());
        }
        debug!(active = ?self.active_language, "Legend updated");
        sink.render(&Frame::Legend(self.legend_frame()))?;
        self.render_scatter(sink)
    }

    /// Apply a serialized interaction
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects a frame.
    pub fn apply<S: RenderSink + ?Sized>(
        &mut self,
        interaction: Interaction,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        match interaction {
            Interaction::Progress { value } => self.set_progress(value, sink),
            Interaction::Cutoff { at } => self.set_cutoff(at, sink),
            Interaction::Step { index } => self.enter_step(index, sink),
            Interaction::Select { region } => self.set_selection(region, sink),
            Interaction::Toggle { language } => self.toggle_language(&language, sink),
        }
    }

    fn render_time_views<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SinkError> {
        debug!(
            cutoff = ?self.cutoff,
            visible = self.visible().len(),
            "Time window updated"
        );
        self.render_scatter(sink)?;
        sink.render(&Frame::Files(self.files_frame()))?;
        if self.selection.is_some() {
            sink.render(&Frame::Selection(self.selection_frame()))?;
        }
        Ok(())
    }

    fn render_scatter<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SinkError> {
        let frame = self.scatter_frame();
        self.rendered = frame.points.iter().map(|p| p.id.clone()).collect();
        sink.render(&Frame::Scatter(frame))
    }
}
