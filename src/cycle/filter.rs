//! Pinned-week rule filtering.
//!
//! Keeps only the candidate schedules on which every pinned-week rule is
//! satisfied by at least one of its shifted target weeks.

use crate::cycle::constraints::{Constraints, PinnedWeekRule};
use crate::cycle::enumerate::Cycle;

/// Drop every schedule that violates a pinned-week rule.
///
/// Rules are conjunctive: all of them must hold. A single rule holds when
/// some shifted variant of its target week is a release week whose spacing
/// from the previous release is one of the rule's diffs (`0` in the diffs
/// accepts any match outright). Shifts are tried in ascending order; a
/// shift that misses the schedule moves on to the next one, but a shift
/// landing on the schedule's first release with `0` absent from the diffs
/// fails the rule immediately, without trying the remaining shifts.
#[must_use]
pub fn filter_cycles(cycles: Vec<Cycle>, constraints: &Constraints) -> Vec<Cycle> {
    cycles
        .into_iter()
        .filter(|cycle| {
            constraints
                .pinned_rules
                .iter()
                .all(|(&week, rule)| rule_satisfied(cycle, week, rule))
        })
        .collect()
}

/// Evaluate one rule against one schedule.
fn rule_satisfied(cycle: &[u32], week: u32, rule: &PinnedWeekRule) -> bool {
    for &shift in &rule.shifts {
        let target = i64::from(week) + i64::from(shift);
        let Ok(pos) = cycle.binary_search_by_key(&target, |&w| i64::from(w)) else {
            continue;
        };
        if rule.diffs.contains(&0) {
            return true;
        }
        if pos == 0 {
            return false;
        }
        if rule.diffs.contains(&(cycle[pos] - cycle[pos - 1])) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::cycle::enumerate::enumerate_cycles;

    fn constraints(raw: serde_json::Value) -> Constraints {
        Constraints::from_value(&raw)
    }

    fn rule(diffs: &[u32], shifts: &[i32]) -> PinnedWeekRule {
        PinnedWeekRule {
            diffs: diffs.iter().copied().collect(),
            shifts: shifts.iter().copied().collect(),
        }
    }

    #[test]
    fn test_no_rules_keeps_everything() {
        let c = constraints(json!({}));
        let cycles = vec![vec![1, 7], vec![1, 8]];
        assert_eq!(filter_cycles(cycles.clone(), &c), cycles);
    }

    #[test]
    fn test_rule_selects_matching_schedule() {
        let c = constraints(json!({
            "release_count": 2,
            "first_week": 3,
            "allowed_durations": [6, 7, 8],
            "pinned_weeks": {"10": {"diffs": [7], "shifts": [0]}}
        }));
        let survivors = filter_cycles(enumerate_cycles(&c), &c);
        assert_eq!(survivors, vec![vec![3, 10]]);
    }

    #[test]
    fn test_missing_target_tries_next_shift() {
        let mut c = constraints(json!({}));
        c.pinned_rules.insert(10, rule(&[7], &[-1, 0]));
        // Shift -1 targets week 9, absent from the schedule; shift 0
        // then matches week 10 with the right spacing.
        assert_eq!(filter_cycles(vec![vec![3, 10]], &c), vec![vec![3, 10]]);
    }

    #[test]
    fn test_wrong_diff_tries_next_shift() {
        let mut c = constraints(json!({}));
        c.pinned_rules.insert(10, rule(&[8], &[0, 8]));
        // Shift 0 hits week 10 but its spacing is 7; shift 8 hits week 18
        // with spacing 8 and satisfies the rule.
        let cycles = vec![vec![3, 10, 18]];
        assert_eq!(filter_cycles(cycles.clone(), &c), cycles);
    }

    #[test]
    fn test_first_release_match_without_zero_diff_fails_fast() {
        let mut c = constraints(json!({}));
        c.pinned_rules.insert(3, rule(&[7], &[0, 7]));
        // Shift 0 lands on the first release. The rule aborts there even
        // though shift 7 would have matched week 10 with spacing 7.
        assert!(filter_cycles(vec![vec![3, 10]], &c).is_empty());
    }

    #[test]
    fn test_same_rule_passes_when_first_release_shift_absent() {
        let mut c = constraints(json!({}));
        c.pinned_rules.insert(3, rule(&[7], &[7]));
        assert_eq!(filter_cycles(vec![vec![3, 10]], &c), vec![vec![3, 10]]);
    }

    #[test]
    fn test_zero_diff_accepts_any_match() {
        let mut c = constraints(json!({}));
        // A zero diff never survives normalization; build the rule
        // directly. It accepts even a first-release match.
        c.pinned_rules.insert(3, rule(&[0], &[0]));
        assert_eq!(filter_cycles(vec![vec![3, 10]], &c), vec![vec![3, 10]]);
    }

    #[test]
    fn test_rules_are_conjunctive() {
        let mut c = constraints(json!({}));
        c.pinned_rules.insert(10, rule(&[7], &[0]));
        c.pinned_rules.insert(40, rule(&[7], &[0]));
        // Week 10 matches but week 40 has no matching shift.
        assert!(filter_cycles(vec![vec![3, 10]], &c).is_empty());
    }

    #[test]
    fn test_empty_shift_set_is_unsatisfiable() {
        let mut c = constraints(json!({}));
        c.pinned_rules.insert(10, rule(&[7], &[]));
        assert!(filter_cycles(vec![vec![3, 10]], &c).is_empty());
    }

    #[test]
    fn test_empty_diff_set_never_matches_spacing() {
        let mut c = constraints(json!({}));
        c.pinned_rules.insert(10, rule(&[], &[0]));
        assert!(filter_cycles(vec![vec![3, 10]], &c).is_empty());
    }

    #[test]
    fn test_negative_target_week_is_a_miss() {
        let c = constraints(json!({
            "pinned_weeks": {"1": {"diffs": [7], "shifts": [-52]}}
        }));
        assert!(c.pinned_rules[&1].shifts.contains(&-52));
        assert!(filter_cycles(vec![vec![1, 8]], &c).is_empty());
    }

    #[test]
    fn test_shift_can_target_rolled_over_weeks() {
        let mut c = constraints(json!({}));
        c.pinned_rules.insert(50, rule(&[6], &[6]));
        // Target 56 is a raw next-year week and still matches.
        assert_eq!(filter_cycles(vec![vec![50, 56]], &c), vec![vec![50, 56]]);
    }
}
