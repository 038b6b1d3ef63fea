//! iCalendar serialization.
//!
//! Writes calendar events as a minimal RFC 5545 `VCALENDAR` of all-day
//! `VEVENT`s with CRLF line endings, text escaping, and 75-octet line
//! folding. Nothing beyond what calendar importers need.

use std::path::Path;

use anyhow::{Context, Result};

use crate::calendar::events::CalendarEvent;

/// Content lines longer than this many octets are folded.
const MAX_LINE_OCTETS: usize = 75;

/// Serialize events into an iCalendar document.
///
/// Events keep their input order. Each `UID` is derived from the event's
/// index and date, so regenerating the same schedule yields an identical
/// document.
#[must_use]
pub fn to_ics(events: &[CalendarEvent]) -> String {
    let mut out = String::new();
    push_folded(&mut out, "BEGIN:VCALENDAR");
    push_folded(&mut out, "VERSION:2.0");
    push_folded(&mut out, "PRODID:-//cadence//release calendar//EN");
    for (index, event) in events.iter().enumerate() {
        let stamp = event.date.format("%Y%m%d").to_string();
        push_folded(&mut out, "BEGIN:VEVENT");
        push_folded(&mut out, &format!("UID:{index}-{stamp}@cadence"));
        push_folded(&mut out, &format!("SUMMARY:{}", escape_text(&event.summary)));
        push_folded(&mut out, &format!("DTSTART;VALUE=DATE:{stamp}"));
        push_folded(&mut out, &format!("DTEND;VALUE=DATE:{stamp}"));
        push_folded(&mut out, "END:VEVENT");
    }
    push_folded(&mut out, "END:VCALENDAR");
    out
}

/// Serialize events and write them to a file.
pub fn write_path<P: AsRef<Path>>(path: P, events: &[CalendarEvent]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_ics(events))
        .with_context(|| format!("Failed to write calendar file: {}", path.display()))
}

/// Append one content line, folded to the octet limit and terminated
/// with CRLF. Folds only at character boundaries; the continuation
/// space counts toward the limit.
fn push_folded(out: &mut String, line: &str) {
    let mut used = 0;
    for ch in line.chars() {
        let width = ch.len_utf8();
        if used + width > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            used = 1;
        }
        out.push(ch);
        used += width;
    }
    out.push_str("\r\n");
}

/// Escape TEXT values per RFC 5545: backslash, semicolon, comma and
/// newline. Carriage returns are dropped.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}
