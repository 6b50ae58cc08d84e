// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Brush selection in plot space
//!
//! Commits are projected into the scatter plot's inner area (time on x, hour
//! of day on y) with scales fitted once to the full dataset. A brush is a
//! rectangular [`Region`] in the same pixel space; membership is closed on
//! every edge.

use serde::{Deserialize, Serialize};

use crate::commit::Commit;

/// Rectangular brush region in plot pixel space
///
/// Serialized as `[[x0, y0], [x1, y1]]`. Corners are normalized on
/// construction so `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct Region {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Region {
    /// Region spanned by two opposite corners
    #[must_use]
    pub fn new(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    /// Top-left corner
    #[must_use]
    pub fn min(&self) -> (f64, f64) {
        (self.x0, self.y0)
    }

    /// Bottom-right corner
    #[must_use]
    pub fn max(&self) -> (f64, f64) {
        (self.x1, self.y1)
    }

    /// Closed-interval containment on both axes
    #[must_use]
    pub fn contains(&self, (px, py): (f64, f64)) -> bool {
        self.x0 <= px && px <= self.x1 && self.y0 <= py && py <= self.y1
    }
}

impl From<[[f64; 2]; 2]> for Region {
    fn from([[x0, y0], [x1, y1]]: [[f64; 2]; 2]) -> Self {
        Self::new((x0, y0), (x1, y1))
    }
}

impl From<Region> for [[f64; 2]; 2] {
    fn from(region: Region) -> Self {
        [[region.x0, region.y0], [region.x1, region.y1]]
    }
}

/// Check a projected point against an optional brush
///
/// No region means nothing is selected.
#[must_use]
pub fn is_selected(region: Option<&Region>, point: (f64, f64)) -> bool {
    region.is_some_and(|r| r.contains(point))
}

/// Space reserved around the plot area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Top margin
    pub top: f64,
    /// Right margin (holds the legend)
    pub right: f64,
    /// Bottom margin (holds the time axis)
    pub bottom: f64,
    /// Left margin (holds the hour axis)
    pub left: f64,
}

/// Outer size and margins of the scatter plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    /// Outer width
    pub width: f64,
    /// Outer height
    pub height: f64,
    /// Margins around the inner area
    pub margin: Margin,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 460.0,
            margin: Margin {
                top: 12.0,
                right: 200.0,
                bottom: 42.0,
                left: 60.0,
            },
        }
    }
}

impl PlotLayout {
    /// Width of the area inside the margins
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the area inside the margins
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// The whole inner area as a region, the extent a brush can cover
    #[must_use]
    pub fn extent(&self) -> Region {
        Region::new((0.0, 0.0), (self.inner_width(), self.inner_height()))
    }
}

/// Continuous linear map from a domain onto a range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Linear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Linear {
    fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

const HOURS_PER_DAY: f64 = 24.0;
const MIN_RADIUS: f64 = 4.0;
const MAX_RADIUS: f64 = 28.0;

/// Scales that project commits into plot space
///
/// Fitted once to the full dataset, so filtering commits in or out never
/// moves the axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotScales {
    x: Linear,
    y: Linear,
    r: Linear,
}

impl PlotScales {
    /// Fit scales to every commit in the dataset
    ///
    /// Returns `None` when there are no commits.
    pub fn fit<'a, I>(commits: I, layout: &PlotLayout) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut iter = commits.into_iter();
        let first = iter.next()?;
        let first_ms = first.utc().timestamp_millis();
        let (lo, hi, max_lines) = iter.fold(
            (first_ms, first_ms, first.total_lines()),
            |(lo, hi, max_lines), c| {
                let ms = c.utc().timestamp_millis();
                (lo.min(ms), hi.max(ms), max_lines.max(c.total_lines()))
            },
        );
        let max_lines = if max_lines == 0 { 1 } else { max_lines };

        Some(Self {
            x: Linear {
                domain: (lo as f64, hi as f64),
                range: (0.0, layout.inner_width()),
            },
            y: Linear {
                domain: (0.0, HOURS_PER_DAY),
                range: (0.0, layout.inner_height()),
            },
            r: Linear {
                domain: (0.0, (max_lines as f64).sqrt()),
                range: (MIN_RADIUS, MAX_RADIUS),
            },
        })
    }

    /// Plot-space position of a commit
    #[must_use]
    pub fn project(&self, commit: &Commit) -> (f64, f64) {
        (
            self.x.apply(commit.utc().timestamp_millis() as f64),
            self.y.apply(commit.hour_fraction()),
        )
    }

    /// Dot radius of a commit, by square root of its line count
    #[must_use]
    pub fn radius(&self, commit: &Commit) -> f64 {
        self.r.apply((commit.total_lines() as f64).sqrt())
    }
}

/// Commits whose projection falls inside `region`
///
/// Pure and stateless; callers re-run it on every brush tick against the
/// currently visible commits.
pub fn select<'a, I>(commits: I, scales: &PlotScales, region: Option<&Region>) -> Vec<&'a Commit>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let Some(region) = region else {
        return Vec::new();
    };
    commits
        .into_iter()
        .filter(|c| region.contains(scales.project(c)))
        .collect()
}
