//! CLI output formatting
//!
//! Human-readable terminal listing of solved schedules and the
//! interactive possibility selection.

pub mod display;

pub use display::format_schedule;
pub use display::print_possibilities;
pub use display::prompt_selection;
