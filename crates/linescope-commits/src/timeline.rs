//! Time-window filtering
//!
//! A [`TimeScale`] fixes the time domain of the whole dataset once at load
//! time; a slider or scroll position in `[0, 100]` is mapped through it to a
//! cutoff, and [`filter_by_time`] derives the commits visible as of that
//! cutoff.

use chrono::{DateTime, Duration, Utc};
use linescope_log::LineRecord;
use serde::Serialize;

use crate::commit::Commit;

/// Commits at or before `cutoff`, in input order
///
/// Raising the cutoff never removes a commit.
pub fn filter_by_time<'a, I>(commits: I, cutoff: DateTime<Utc>) -> Vec<&'a Commit>
where
    I: IntoIterator<Item = &'a Commit>,
{
    commits.into_iter().filter(|c| c.utc() <= cutoff).collect()
}

/// All line records of a commit subset, commit by commit
pub fn visible_lines<'a, I>(commits: I) -> impl Iterator<Item = &'a LineRecord>
where
    I: IntoIterator<Item = &'a Commit>,
{
    commits.into_iter().flat_map(Commit::lines)
}

/// Linear map between progress `[0, 100]` and the dataset's time extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeScale {
    /// Create a scale over `[start, end]`; the bounds are swapped if reversed
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Fit the scale to the earliest and latest commit
    ///
    /// Returns `None` when there are no commits.
    pub fn from_commits<'a, I>(commits: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut iter = commits.into_iter().map(Commit::utc);
        let first = iter.next()?;
        let (start, end) = iter.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self { start, end })
    }

    /// Earliest timestamp of the domain
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Latest timestamp of the domain
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Timestamp at `progress` percent of the domain
    ///
    /// Progress is clamped to `[0, 100]`; NaN is read as 100. The endpoints
    /// map exactly to the domain bounds, interior points are rounded to the
    /// millisecond and never pass the end.
    #[must_use]
    pub fn at(&self, progress: f64) -> DateTime<Utc> {
        if progress.is_nan() || progress >= 100.0 {
            return self.end;
        }
        if progress <= 0.0 {
            return self.start;
        }
        let offset_ms = (nanos(self.end - self.start) * progress / 100.0 / 1e6).round() as i64;
        (self.start + Duration::milliseconds(offset_ms)).min(self.end)
    }

    /// Progress percent of a timestamp, clamped to `[0, 100]`
    ///
    /// A zero-length domain reports 100 for every timestamp at or after it.
    #[must_use]
    pub fn progress_of(&self, at: DateTime<Utc>) -> f64 {
        if at < self.start {
            return 0.0;
        }
        if at >= self.end {
            return 100.0;
        }
        (nanos(at - self.start) / nanos(self.end - self.start) * 100.0).clamp(0.0, 100.0)
    }
}

/// Length of a duration in nanoseconds, falling back to millisecond precision
/// when it overflows `i64` nanoseconds
fn nanos(span: Duration) -> f64 {
    span.num_nanoseconds()
        .map_or_else(|| span.num_milliseconds() as f64 * 1e6, |ns| ns as f64)
}
