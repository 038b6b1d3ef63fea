//! Calendar materialization
//!
//! This module turns a selected schedule into dated calendar events
//! and serializes them as an iCalendar file.

pub mod content;
pub mod events;
pub mod ics;
pub mod template;

pub use content::ContentConfig;
pub use content::ContentEntry;
pub use content::WeekContent;
pub use events::schedule_events;
pub use events::CalendarEvent;
pub use template::render_template;
pub use template::TemplateError;
