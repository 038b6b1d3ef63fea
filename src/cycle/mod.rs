//! Release cycle solving
//!
//! This module handles cycle constraints, candidate enumeration,
//! pinned-week filtering, and schedule materialization.

pub mod constraints;
pub mod enumerate;
pub mod filter;
pub mod solver;

pub use constraints::Constraints;
pub use constraints::PinnedWeekRule;
pub use enumerate::enumerate_cycles;
pub use enumerate::Cycle;
pub use filter::filter_cycles;
pub use solver::CycleSolver;
pub use solver::ReleaseRecord;
pub use solver::SelectedRelease;
