//! Calendar event generation.
//!
//! Walks a selected release schedule week by week and renders the content
//! configuration into dated all-day events, driving the running beta
//! counter and the exceptional-week rules.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::calendar::content::{ContentConfig, ContentEntry, WeekContent, WORK_WEEK};
use crate::calendar::template::render_template;
use crate::cycle::solver::SelectedRelease;

/// One all-day calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// Rendered event title.
    pub summary: String,
    /// Day the event covers.
    pub date: NaiveDate,
}

/// Render a release schedule into calendar events.
///
/// For every release the configured offsets are visited in ascending
/// order, then the remaining weeks of the release's cycle. Offsets `-1`
/// and `0`, pre-schedule weeks of the first release, and weeks in the
/// effective forbidden set are "no beta" weeks: they use their raw
/// per-offset content without the normal baseline, or nothing when
/// unconfigured. Every other week merges its offset content (if any)
/// over the baseline.
///
/// The beta counter starts at `last_beta`, rewinds to `last_beta` for
/// each pre-schedule week of the first release, is forced to 2 at offset
/// 1 of every release, and advances by 2 on every visited week whose ISO
/// week is not forbidden.
#[must_use]
pub fn schedule_events(
    schedule: &[SelectedRelease],
    content: &ContentConfig,
    forbidden: &BTreeSet<u32>,
    last_beta: i64,
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    let mut beta = last_beta;

    for (i, release) in schedule.iter().enumerate() {
        for j in offset_sequence(content, release.duration) {
            if i == 0 && j < 0 {
                beta = last_beta;
            }
            if j == 1 {
                beta = 2;
            }
            let Some(monday) = release.monday.checked_add_signed(Duration::weeks(j)) else {
                continue;
            };
            let week = monday.iso_week().week();
            let no_beta = j == -1 || j == 0 || (i == 0 && j < 0) || forbidden.contains(&week);

            if no_beta {
                if let Some(overlay) = offset_content(content, j) {
                    add_week_events(&mut events, monday, overlay, beta);
                }
            } else if let Some(overlay) = offset_content(content, j) {
                let merged = content.normal.merged_with(overlay);
                add_week_events(&mut events, monday, &merged, beta);
            } else {
                add_week_events(&mut events, monday, &content.normal, beta);
            }

            if !forbidden.contains(&week) {
                beta = beta.saturating_add(2);
            }
        }
    }

    events
}

/// Week offsets visited for one release, in order: the configured offset
/// keys ascending, then the gap up to (excluding) `duration` past the
/// smallest key. Without configured offsets the release's own weeks
/// `0..duration` are visited.
fn offset_sequence(content: &ContentConfig, duration: u32) -> Vec<i64> {
    let keys: Vec<i64> = content.offsets.keys().map(|&k| i64::from(k)).collect();
    match (keys.first(), keys.last()) {
        (Some(&first), Some(&last)) => {
            let upper = i64::from(duration) + first;
            keys.iter().copied().chain(last + 1..upper).collect()
        }
        _ => (0..i64::from(duration)).collect(),
    }
}

/// Content configured for an offset, if any.
fn offset_content(content: &ContentConfig, offset: i64) -> Option<&WeekContent> {
    i32::try_from(offset)
        .ok()
        .and_then(|key| content.offsets.get(&key))
}

/// Render one week's entries into events.
///
/// Only literal entries render; a failed or blank render drops that one
/// entry and the rest of the week continues.
fn add_week_events(
    events: &mut Vec<CalendarEvent>,
    monday: NaiveDate,
    content: &WeekContent,
    beta: i64,
) {
    let vars = HashMap::from([("current_beta".to_string(), beta.to_string())]);
    for day in WORK_WEEK {
        let entries = content.entries(day);
        if entries.is_empty() {
            continue;
        }
        let offset = Duration::days(i64::from(day.num_days_from_monday()));
        let Some(date) = monday.checked_add_signed(offset) else {
            continue;
        };
        for entry in entries {
            let ContentEntry::Literal(text) = entry else {
                continue;
            };
            let Ok(summary) = render_template(text, &vars) else {
                continue;
            };
            if summary.trim().is_empty() {
                continue;
            }
            events.push(CalendarEvent { summary, date });
        }
    }
}
