//! Soft-quality scoring.
//!
//! A pure scalar used only to rank feasible-ish candidates inside
//! selection; feasibility itself is the hard-constraint validator's
//! job. Higher is better. Starts from a base score and subtracts
//! penalties for poor distribution:
//!
//! | Penalty | Weight |
//! |---------|--------|
//! | Session-count mismatch (per session) | 100 |
//! | Same-day duplicate sessions | 20 |
//! | Back-to-back periods on one day (per pair) | 15 |
//! | Weekday imbalance (max − min sessions) | 10 |
//! | Period imbalance (max − min usage) | 5 |
//! | Residual room double-booking (per extra entry) | 50 |
//!
//! The mismatch and double-booking terms should never fire after
//! validation; they keep ranking sane for operator-produced candidates
//! that skip the gate.

use std::collections::HashMap;

use super::problem::TimetableProblem;
use crate::models::{Timetable, DAYS_PER_WEEK, PERIODS_PER_DAY};

/// Starting score before penalties.
pub const BASE_SCORE: f64 = 1000.0;

const SESSION_MISMATCH_PENALTY: f64 = 100.0;
const SAME_DAY_PENALTY: f64 = 20.0;
const ADJACENT_PERIOD_PENALTY: f64 = 15.0;
const DAY_IMBALANCE_PENALTY: f64 = 10.0;
const PERIOD_IMBALANCE_PENALTY: f64 = 5.0;
const ROOM_CLASH_PENALTY: f64 = 50.0;

/// Scores a candidate timetable. Higher is better.
///
/// An entry referencing a module absent from the problem data is an
/// evaluation error; it yields the worst possible score rather than a
/// panic, so one broken individual never aborts a run.
pub fn score(timetable: &Timetable, problem: &TimetableProblem) -> f64 {
    let mut score = BASE_SCORE;

    let mut day_session_counts = [0usize; DAYS_PER_WEEK];
    let mut period_usage = [0usize; PERIODS_PER_DAY];

    for module in &problem.modules {
        let cells: Vec<_> = timetable
            .iter_entries()
            .filter(|(_, e)| e.module == module.code)
            .map(|(slot, _)| slot)
            .collect();

        for slot in &cells {
            day_session_counts[slot.day.index()] += 1;
            period_usage[slot.period.index()] += 1;
        }

        let required = module.required_sessions();
        if cells.len() != required {
            score -= SESSION_MISMATCH_PENALTY * cells.len().abs_diff(required) as f64;
        }

        // Sessions should land on distinct days.
        let mut days: Vec<_> = cells.iter().map(|s| s.day).collect();
        days.sort_unstable();
        days.dedup();
        if days.len() < cells.len() {
            score -= SAME_DAY_PENALTY;
        }

        // Back-to-back sessions on one day are fatiguing.
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                if a.day == b.day && a.period.is_adjacent_to(b.period) {
                    score -= ADJACENT_PERIOD_PENALTY;
                }
            }
        }
    }

    // Any entry with an unknown module is unscoreable.
    let known_entries = timetable
        .iter_entries()
        .filter(|(_, e)| problem.module(&e.module).is_some())
        .count();
    if known_entries != timetable.session_count() {
        return f64::NEG_INFINITY;
    }

    // Spread sessions evenly across the week and across the day.
    if let (Some(&max), Some(&min)) = (
        day_session_counts.iter().max(),
        day_session_counts.iter().min(),
    ) {
        score -= DAY_IMBALANCE_PENALTY * (max - min) as f64;
    }
    if let (Some(&max), Some(&min)) = (period_usage.iter().max(), period_usage.iter().min()) {
        score -= PERIOD_IMBALANCE_PENALTY * (max - min) as f64;
    }

    // Defensive: double-booked rooms should have been filtered out.
    for (_, entries) in timetable.iter_slots() {
        let mut rooms: HashMap<&str, usize> = HashMap::new();
        for entry in entries {
            let count = rooms.entry(entry.room.as_str()).or_insert(0);
            *count += 1;
            if *count > 1 {
                score -= ROOM_CLASH_PENALTY;
            }
        }
    }

    score
}
