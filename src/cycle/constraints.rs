//! Release scheduling constraints.
//!
//! Parses the loosely-typed constraints JSON into a canonical, fully
//! populated [`Constraints`] value. Normalization is total: missing or
//! malformed fields are repaired to documented defaults rather than
//! reported, because the input file is hand-edited and the tool must keep
//! working on bad config.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::week::{coerce_int, coerce_int_str, parse_week};

/// Default number of releases per year.
const DEFAULT_RELEASE_COUNT: u32 = 8;

/// Default cycle lengths (weeks between consecutive releases).
const DEFAULT_DURATIONS: [u32; 3] = [6, 7, 8];

/// Replacement for a duration or diff entry outside `1..=52`.
const FALLBACK_DURATION: u32 = 8;

/// Replacement for a shift entry outside `-52..=52`.
const FALLBACK_SHIFT: i32 = 0;

/// Scheduling is only supported from this year on.
const MIN_YEAR: i64 = 2000;

/// Upper cap so that `year + 1` still fits the four-digit dates of the
/// iCalendar output.
const MAX_YEAR: i64 = 9998;

/// A constraint tying a fixed calendar week (say, a conference week) to the
/// schedule: some shifted variant of the target week must be an actual
/// release week, spaced from its predecessor by an allowed diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PinnedWeekRule {
    /// Allowed spacings, in weeks, from the previous release.
    pub diffs: BTreeSet<u32>,
    /// Allowed offsets applied to the target week before matching.
    pub shifts: BTreeSet<i32>,
}

impl PinnedWeekRule {
    /// Build a rule from a raw JSON value. Non-list `diffs`/`shifts` become
    /// empty sets; an empty shift set makes the rule unsatisfiable, which
    /// surfaces as zero surviving schedules rather than an error.
    fn from_value(raw: &Value) -> Self {
        let diffs = raw
            .get("diffs")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(week_span_or_default).collect())
            .unwrap_or_default();
        let shifts = raw
            .get("shifts")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(shift_or_default).collect())
            .unwrap_or_default();
        Self { diffs, shifts }
    }
}

/// Canonical, fully populated scheduling constraints.
///
/// Every field is guaranteed in range; construct via [`Constraints::from_value`]
/// (or [`Constraints::default`] for the all-defaults set). Fields are public
/// so the solver stages and tests can compose constraint sets directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraints {
    /// Number of releases to schedule, `1..=10`.
    pub release_count: u32,
    /// ISO week of the first release.
    pub first_week: u32,
    /// Version number assigned to the first release.
    pub first_version: u64,
    /// Calendar year of the first release, clamped to `2000..=9998` so
    /// that `year + 1` still prints as a four-digit date.
    pub year: i32,
    /// Allowed week-counts between consecutive releases, in declaration
    /// order with duplicates collapsed. The order is load-bearing: the
    /// enumerator's carry-forward branch applies only to the first entry.
    pub allowed_durations: Vec<u32>,
    /// Weeks that can never hold a release.
    pub forbidden_weeks: BTreeSet<u32>,
    /// Pinned-week rules, keyed by target calendar week.
    pub pinned_rules: BTreeMap<u32, PinnedWeekRule>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self::from_value(&Value::Null)
    }
}

impl Constraints {
    /// Load and normalize constraints from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read constraints file: {}", path.display()))?;
        let raw: Value = serde_json::from_str(&content)
            .with_context(|| format!("Constraints file is not valid JSON: {}", path.display()))?;
        Ok(Self::from_value(&raw))
    }

    /// Normalize an arbitrary JSON value into canonical constraints.
    ///
    /// Never fails: a non-object input yields the all-defaults set, and
    /// each field falls back independently.
    #[must_use]
    pub fn from_value(raw: &Value) -> Self {
        let field = |name: &str| raw.get(name).unwrap_or(&Value::Null);

        Self {
            release_count: release_count(field("release_count")),
            first_week: parse_week(field("first_week")),
            first_version: first_version(field("first_version")),
            year: year(field("year")),
            allowed_durations: allowed_durations(field("allowed_durations")),
            forbidden_weeks: forbidden_weeks(field("forbidden_weeks")),
            pinned_rules: pinned_rules(field("pinned_weeks")),
        }
    }

    /// Union of the forbidden weeks and the pinned-rule target weeks.
    ///
    /// Consulted only while rendering calendar content (those weeks carry
    /// no beta); enumeration and filtering look at `forbidden_weeks` alone.
    #[must_use]
    pub fn effective_forbidden_weeks(&self) -> BTreeSet<u32> {
        self.forbidden_weeks
            .iter()
            .chain(self.pinned_rules.keys())
            .copied()
            .collect()
    }
}

/// Release count in `1..=10`; anything else is replaced (not clamped)
/// with the default.
fn release_count(value: &Value) -> u32 {
    u32::try_from(coerce_int(value)).map_or(DEFAULT_RELEASE_COUNT, |n| {
        if (1..=10).contains(&n) {
            n
        } else {
            DEFAULT_RELEASE_COUNT
        }
    })
}

fn first_version(value: &Value) -> u64 {
    u64::try_from(coerce_int(value).max(1)).unwrap_or(1)
}

fn year(value: &Value) -> i32 {
    let clamped = coerce_int(value).clamp(MIN_YEAR, MAX_YEAR);
    i32::try_from(clamped).unwrap_or(2000)
}

/// One duration or diff entry: weeks in `1..=52` pass through, everything
/// else becomes the fallback duration.
fn week_span_or_default(value: &Value) -> u32 {
    u32::try_from(coerce_int(value)).map_or(FALLBACK_DURATION, |v| {
        if (1..=52).contains(&v) {
            v
        } else {
            FALLBACK_DURATION
        }
    })
}

/// One shift entry: offsets in `-52..=52` pass through, out-of-range
/// offsets become no shift. A non-integer entry arrives here as the
/// coercion sentinel −1, which is in range and passes through as a real
/// one-week-back shift.
fn shift_or_default(value: &Value) -> i32 {
    i32::try_from(coerce_int(value)).map_or(FALLBACK_SHIFT, |v| {
        if (-52..=52).contains(&v) {
            v
        } else {
            FALLBACK_SHIFT
        }
    })
}

/// Ordered duration alphabet. A non-list input is replaced wholesale with
/// the default; list entries are coerced one by one, keeping first
/// occurrences in declaration order.
fn allowed_durations(value: &Value) -> Vec<u32> {
    let Some(list) = value.as_array() else {
        return DEFAULT_DURATIONS.to_vec();
    };
    let mut durations = Vec::new();
    for item in list {
        let duration = week_span_or_default(item);
        if !durations.contains(&duration) {
            durations.push(duration);
        }
    }
    durations
}

/// Forbidden weeks keep only entries coercing into `1..=52`; invalid
/// entries are dropped, not substituted.
fn forbidden_weeks(value: &Value) -> BTreeSet<u32> {
    value.as_array().map_or_else(BTreeSet::new, |list| {
        list.iter()
            .filter_map(|item| u32::try_from(coerce_int(item)).ok())
            .filter(|week| (1..=52).contains(week))
            .collect()
    })
}

/// Pinned-week rules: keys outside `1..=52` are dropped along with their
/// rules; surviving rule bodies are normalized per [`PinnedWeekRule`].
fn pinned_rules(value: &Value) -> BTreeMap<u32, PinnedWeekRule> {
    let Some(map) = value.as_object() else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(key, rule)| {
            let week = u32::try_from(coerce_int_str(key)).ok()?;
            (1..=52)
                .contains(&week)
                .then(|| (week, PinnedWeekRule::from_value(rule)))
        })
        .collect()
}
