//! Terminal display of solved schedules.
//!
//! Lists every surviving schedule with its possibility number and runs
//! the interactive selection. The listing goes to stdout; the prompt
//! goes to stderr so a redirected listing stays clean.

use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use chrono::Duration;
use colored::Colorize;

use crate::cycle::solver::ReleaseRecord;

/// Render one schedule as its listing block, one release per line.
///
/// Releases ship on Tuesdays, the day after the week's Monday. Every
/// line after the first carries the spacing from the previous release.
#[must_use]
pub fn format_schedule(records: &[ReleaseRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let tuesday = (record.monday + Duration::days(1)).format("%Y-%m-%d");
        if i == 0 {
            lines.push(format!("Tuesday {tuesday}, week {}", record.week));
        } else {
            lines.push(format!(
                "Tuesday {tuesday}, week {} ({} weeks after)",
                record.week, record.diff
            ));
        }
    }
    lines.join("\n")
}

/// Print every solved schedule with its possibility number.
pub fn print_possibilities(schedules: &[Vec<ReleaseRecord>]) {
    for (i, schedule) in schedules.iter().enumerate() {
        println!("{}", format!("Possibility {}:", i + 1).bold().cyan());
        println!("{}", format_schedule(schedule));
        println!();
    }
}

/// Read a possibility number from stdin, asking until one is valid.
///
/// Out-of-range and non-numeric input re-prompts. Errors only when the
/// input stream fails or ends before a valid choice arrives.
pub fn prompt_selection(max: usize) -> Result<usize> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        eprint!("{}", format!("Select a possibility (1-{max}): ").bold());
        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read selection")?;
        if read == 0 {
            bail!("Selection input ended before a choice was made");
        }
        if let Some(choice) = parse_selection(&line, max) {
            return Ok(choice);
        }
    }
}

/// Parse a selection line into an index in `1..=max`.
fn parse_selection(input: &str, max: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=max).contains(&choice).then_some(choice)
}
