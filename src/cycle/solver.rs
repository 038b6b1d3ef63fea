//! Schedule solving facade.
//!
//! Runs enumeration and filtering over a constraint set, materializes the
//! surviving schedules into dated release records, and projects a chosen
//! schedule for display and calendar generation.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::content::ContentConfig;
use crate::calendar::events::{schedule_events, CalendarEvent};
use crate::cycle::constraints::Constraints;
use crate::cycle::enumerate::enumerate_cycles;
use crate::cycle::filter::filter_cycles;
use crate::week;

/// One release inside a solved schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    /// Version number, counting up from the first release.
    pub version: u64,
    /// Release week after year-rollover normalization.
    pub week: u32,
    /// Monday of the release week.
    pub monday: NaiveDate,
    /// Weeks since the previous release; 0 for the first.
    pub diff: u32,
}

/// A release projected for calendar generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedRelease {
    /// Version number.
    pub version: u64,
    /// Monday of the release week.
    pub monday: NaiveDate,
    /// Weeks until the next release; 0 for the last one.
    pub duration: u32,
}

/// Solves release schedules from a constraint set.
///
/// [`find`](Self::find) computes and caches every satisfying schedule;
/// [`select`](Self::select) and [`create_calendar`](Self::create_calendar)
/// are projections of that cache and yield empty output until it exists.
pub struct CycleSolver {
    constraints: Constraints,
    solved: Option<Vec<Vec<ReleaseRecord>>>,
}

impl CycleSolver {
    /// Create a solver over the given constraints.
    #[must_use]
    pub const fn new(constraints: Constraints) -> Self {
        Self {
            constraints,
            solved: None,
        }
    }

    /// Solve and cache every schedule satisfying the constraints.
    ///
    /// Schedules come out in enumeration order; the horizon carry-forward
    /// can produce repeats, which are kept. Calling this again recomputes
    /// from scratch.
    pub fn find(&mut self) -> &[Vec<ReleaseRecord>] {
        let survivors = filter_cycles(enumerate_cycles(&self.constraints), &self.constraints);
        let solved: Vec<Vec<ReleaseRecord>> = survivors
            .iter()
            .map(|cycle| self.materialize(cycle))
            .collect();
        self.solved = Some(solved);
        self.solved()
    }

    /// Schedules cached by the last [`find`](Self::find) call.
    #[must_use]
    pub fn solved(&self) -> &[Vec<ReleaseRecord>] {
        self.solved.as_deref().unwrap_or_default()
    }

    /// Project the `n`-th schedule (1-based) for calendar generation.
    ///
    /// Each release carries the gap to the *next* release as its duration;
    /// the last release carries 0. Returns an empty list when nothing has
    /// been solved or `n` is out of range.
    #[must_use]
    pub fn select(&self, n: usize) -> Vec<SelectedRelease> {
        let solved = self.solved();
        if n == 0 || n > solved.len() {
            return Vec::new();
        }
        let cycle = &solved[n - 1];
        cycle
            .iter()
            .enumerate()
            .map(|(i, record)| SelectedRelease {
                version: record.version,
                monday: record.monday,
                duration: cycle.get(i + 1).map_or(0, |next| next.diff),
            })
            .collect()
    }

    /// Generate all-day calendar events for the `n`-th schedule (1-based).
    ///
    /// `last_beta` seeds the running beta counter carried over from the
    /// previous release train. An unsolved state or out-of-range `n`
    /// yields no events.
    #[must_use]
    pub fn create_calendar(
        &self,
        n: usize,
        content: &ContentConfig,
        last_beta: i64,
    ) -> Vec<CalendarEvent> {
        schedule_events(
            &self.select(n),
            content,
            &self.constraints.effective_forbidden_weeks(),
            last_beta,
        )
    }

    /// Attach versions, dates and spacing to a raw week sequence.
    ///
    /// Spacing is computed on the raw weeks before rollover, so a gap
    /// across the year boundary keeps its true length.
    fn materialize(&self, cycle: &[u32]) -> Vec<ReleaseRecord> {
        let mut records = Vec::with_capacity(cycle.len());
        let mut version = self.constraints.first_version;
        let mut prev = None;
        for &raw in cycle {
            let diff = prev.map_or(0, |p| raw - p);
            prev = Some(raw);
            let (year, week) = if raw <= 52 {
                (self.constraints.year, raw)
            } else {
                (self.constraints.year + 1, raw - 52)
            };
            let monday = week::monday_of_extended(year, week)
                .expect("normalized weeks resolve to a Monday in every supported year");
            records.push(ReleaseRecord {
                version,
                week,
                monday,
                diff,
            });
            version += 1;
        }
        records
    }
}
