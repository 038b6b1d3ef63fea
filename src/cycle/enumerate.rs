//! Candidate schedule enumeration.
//!
//! Expands the release-week tree one release at a time: every partial
//! schedule is extended by each allowed duration, pruned against the
//! forbidden weeks and the 52-week planning horizon.

use crate::cycle::constraints::Constraints;

/// A candidate schedule: strictly increasing raw week numbers, starting
/// at the first release week. Values above 52 roll into the next year at
/// materialization time, not here.
pub type Cycle = Vec<u32>;

/// Enumerate every candidate schedule reachable from the constraints.
///
/// Runs `release_count - 1` extension rounds. In each round a schedule
/// grows by one release per allowed duration, skipping extensions that
/// land on a forbidden week. An extension past the horizon
/// (`week - first_week > 52`) carries the schedule forward unchanged
/// instead, but only for the first declared duration; shorter durations
/// later in the list still extend it. A carried schedule therefore ends
/// up shorter than `release_count`, and the carry/extend interplay can
/// emit the same week sequence more than once.
///
/// The forbidden check runs on the raw week number, so weeks past 52 are
/// never forbidden even when they alias a forbidden week of the next
/// year.
#[must_use]
pub fn enumerate_cycles(constraints: &Constraints) -> Vec<Cycle> {
    let mut cycles: Vec<Cycle> = vec![vec![constraints.first_week]];
    for _ in 1..constraints.release_count {
        let mut extended = Vec::new();
        for cycle in &cycles {
            let Some(&last) = cycle.last() else { continue };
            for (i, &duration) in constraints.allowed_durations.iter().enumerate() {
                let week = last + duration;
                if week - constraints.first_week <= 52 {
                    if !constraints.forbidden_weeks.contains(&week) {
                        let mut longer = cycle.clone();
                        longer.push(week);
                        extended.push(longer);
                    }
                } else if i == 0 {
                    extended.push(cycle.clone());
                }
            }
        }
        cycles = extended;
    }
    cycles
}
