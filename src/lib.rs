//! Cadence - Release cycle planner
//!
//! Cadence enumerates release schedules for a calendar year under
//! constraints such as allowed cycle lengths, forbidden weeks, and
//! weeks pinned to earlier releases, then materializes the chosen
//! schedule into an iCalendar file of weekly events.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod calendar;
pub mod cli;
pub mod cycle;
pub mod week;

// Re-export commonly used types
pub use calendar::{schedule_events, CalendarEvent, ContentConfig, WeekContent};
pub use cli::{format_schedule, print_possibilities, prompt_selection};
pub use cycle::{Constraints, CycleSolver, PinnedWeekRule, ReleaseRecord, SelectedRelease};
