//! Genetic operators: crossover, repair, mutation.
//!
//! Operators construct fresh timetables — a child never shares entry
//! storage with its parents, and mutation works on an owned individual.
//!
//! Crossover alone can leave a child under-scheduled (it only prevents
//! a module from exceeding its requirement). The [`repair`] pass
//! re-runs the initializer's placement routine for the shortfall;
//! mutation keeps its clear-then-place-one semantics, so one call can
//! only maintain or reduce the number of scheduled sessions.

use log::trace;
use rand::prelude::IndexedRandom;
use rand::Rng;

use super::init::{place_missing_sessions, slot_candidates};
use super::problem::TimetableProblem;
use crate::models::{Module, Period, SessionEntry, Slot, Timetable, Weekday};

/// Recombines two parents into one child.
///
/// Each day of the child is copied from one parent chosen 50/50. An
/// entry is accepted only if its module is still below its required
/// session count and it introduces no group, lecturer, or room conflict
/// among the entries already accepted into that cell.
pub fn crossover<R: Rng>(
    parent1: &Timetable,
    parent2: &Timetable,
    problem: &TimetableProblem,
    rng: &mut R,
) -> Timetable {
    let mut child = Timetable::new();

    for day in Weekday::ALL {
        let source = if rng.random_bool(0.5) { parent1 } else { parent2 };

        for period in Period::ALL {
            let slot = Slot::new(day, period);
            for entry in source.entries(slot) {
                let Some(module) = problem.module(&entry.module) else {
                    continue;
                };
                if child.module_sessions(&module.code) >= module.required_sessions() {
                    continue;
                }
                let group_clash = child.entries(slot).iter().any(|accepted| {
                    problem
                        .module(&accepted.module)
                        .is_some_and(|m| m.shares_group_with(module))
                });
                if group_clash
                    || child.lecturer_at(&entry.lecturer, slot).is_some()
                    || child.room_at(&entry.room, slot).is_some()
                {
                    continue;
                }
                child.place(slot, entry.clone());
            }
        }
    }

    child
}

/// Brings under-scheduled modules back up to their required counts
/// using the initializer's placement routine. Returns the number of
/// sessions added.
pub fn repair<R: Rng>(
    timetable: &mut Timetable,
    problem: &TimetableProblem,
    attempt_budget: usize,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    for module in &problem.modules {
        if timetable.module_sessions(&module.code) < module.required_sessions() {
            placed += place_missing_sessions(problem, timetable, module, attempt_budget, rng);
        }
    }
    if placed > 0 {
        trace!("repair added {placed} session(s)");
    }
    placed
}

/// Mutates a timetable in place: clears one random cell, then attempts
/// to place a single session of one randomly chosen under-scheduled
/// module into it, under the full placement feasibility rules. If the
/// chosen module does not fit, the cell stays empty.
pub fn mutate<R: Rng>(timetable: &mut Timetable, problem: &TimetableProblem, rng: &mut R) {
    let day = *Weekday::ALL.choose(rng).expect("non-empty weekday set");
    let period = *Period::ALL.choose(rng).expect("non-empty period set");
    let slot = Slot::new(day, period);

    timetable.clear_slot(slot);

    let under_scheduled: Vec<&Module> = problem
        .modules
        .iter()
        .filter(|m| timetable.module_sessions(&m.code) < m.required_sessions())
        .collect();
    let Some(module) = under_scheduled.choose(rng) else {
        return;
    };

    let Some((lecturers, rooms)) = slot_candidates(problem, timetable, module, slot) else {
        return;
    };
    let lecturer = *lecturers.choose(rng).expect("non-empty lecturer set");
    let room = *rooms.choose(rng).expect("non-empty room set");
    timetable.place(
        slot,
        SessionEntry::new(
            module.code.clone(),
            problem.lecturers[lecturer].id.clone(),
            problem.rooms[room].name.clone(),
        ),
    );
}
