//! Population initialization.
//!
//! Builds candidate timetables by constrained greedy randomized
//! placement: most-constrained modules first, each session dropped into
//! a uniformly chosen feasible (cell, lecturer, room) combination. The
//! per-slot feasibility rules here are the single source of truth —
//! mutation and post-crossover repair reuse them.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::{debug, warn};
use rand::prelude::IndexedRandom;
use rand::Rng;

use super::config::EngineConfig;
use super::problem::{TimetableProblem, MAX_ENTRIES_PER_SLOT};
use crate::constraints;
use crate::error::SolveError;
use crate::models::{Module, SessionEntry, Slot, Timetable};

/// Feasible lecturers and rooms for placing one session of `module`
/// into `slot`, as indices into the problem's rosters.
///
/// Returns `None` when the cell itself is unusable: the module already
/// teaches that day, the cell is full, a seated group would clash, or
/// no lecturer/room combination works.
pub(crate) fn slot_candidates(
    problem: &TimetableProblem,
    timetable: &Timetable,
    module: &Module,
    slot: Slot,
) -> Option<(Vec<usize>, Vec<usize>)> {
    // One session per module per day.
    if timetable.module_on_day(&module.code, slot.day) {
        return None;
    }

    let entries = timetable.entries(slot);
    if entries.len() >= MAX_ENTRIES_PER_SLOT {
        return None;
    }

    // No seated group may get a second session in this cell.
    for entry in entries {
        if let Some(other) = problem.module(&entry.module) {
            if module.shares_group_with(other) {
                return None;
            }
        }
    }

    let lecturers: Vec<usize> = problem
        .lecturers
        .iter()
        .enumerate()
        .filter(|(_, l)| {
            l.is_qualified_for(&module.code)
                && timetable.lecturer_at(&l.id, slot).is_none()
                && timetable.lecturer_day_sessions(&l.id, slot.day) < l.max_daily as usize
                && timetable.lecturer_week_sessions(&l.id) < l.max_weekly as usize
        })
        .map(|(i, _)| i)
        .collect();
    if lecturers.is_empty() {
        return None;
    }

    // Everyone already seated in this cell plus this module's audience.
    let seated: u32 = entries
        .iter()
        .filter_map(|e| problem.module(&e.module))
        .map(|m| problem.headcount(m))
        .sum();
    let cumulative = seated + problem.headcount(module);

    let rooms: Vec<usize> = problem
        .rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            timetable.room_at(&r.name, slot).is_none()
                && r.capacity >= cumulative
                && r.admits_programs(module.programs().into_iter())
        })
        .map(|(i, _)| i)
        .collect();
    if rooms.is_empty() {
        return None;
    }

    Some((lecturers, rooms))
}

/// Attempts to bring `module` up to its required session count.
///
/// Each attempt enumerates every feasible placement and picks cell,
/// lecturer, and room uniformly at random. Gives up early when no cell
/// is feasible — placements only shrink the feasible set within one
/// candidate, so an empty set cannot recover. Returns the number of
/// sessions placed.
pub(crate) fn place_missing_sessions<R: Rng>(
    problem: &TimetableProblem,
    timetable: &mut Timetable,
    module: &Module,
    attempt_budget: usize,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    let mut attempts = 0;

    while timetable.module_sessions(&module.code) < module.required_sessions()
        && attempts < attempt_budget
    {
        attempts += 1;

        let feasible: Vec<(Slot, Vec<usize>, Vec<usize>)> = Slot::all()
            .filter_map(|slot| {
                slot_candidates(problem, timetable, module, slot)
                    .map(|(lecturers, rooms)| (slot, lecturers, rooms))
            })
            .collect();

        let Some((slot, lecturers, rooms)) = feasible.choose(rng) else {
            debug!(
                "no feasible cell for module {} after {} placement(s)",
                module.code, placed
            );
            break;
        };

        let lecturer = *lecturers.choose(rng).expect("non-empty lecturer set");
        let room = *rooms.choose(rng).expect("non-empty room set");
        timetable.place(
            *slot,
            SessionEntry::new(
                module.code.clone(),
                problem.lecturers[lecturer].id.clone(),
                problem.rooms[room].name.clone(),
            ),
        );
        placed += 1;
    }

    placed
}

/// Placement order: modules grouped by the target groups they serve,
/// most-constrained first within each group (descending required
/// sessions, then descending audience breadth). A module serving
/// several groups is placed once, at its first appearance.
fn placement_order(problem: &TimetableProblem) -> Vec<usize> {
    let mut by_group: BTreeMap<&crate::models::TargetGroup, Vec<usize>> = BTreeMap::new();
    for (i, module) in problem.modules.iter().enumerate() {
        for group in &module.target_groups {
            by_group.entry(group).or_default().push(i);
        }
    }

    let mut order = Vec::with_capacity(problem.modules.len());
    let mut seen = HashSet::new();
    for (_, mut members) in by_group {
        members.sort_by_key(|&i| {
            let m = &problem.modules[i];
            (
                Reverse(m.required_sessions()),
                Reverse(m.target_groups.len()),
            )
        });
        for i in members {
            if seen.insert(i) {
                order.push(i);
            }
        }
    }

    // Modules with no audience still get a deterministic position.
    for i in 0..problem.modules.len() {
        if seen.insert(i) {
            order.push(i);
        }
    }
    order
}

/// Builds a population of validated candidate timetables.
///
/// Fails fast on configuration problems (a module nobody can teach or
/// no room can host) and aborts with [`SolveError::InfeasiblePopulation`]
/// when not a single candidate passes the hard-constraint gate.
pub fn initialize_population<R: Rng>(
    problem: &TimetableProblem,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<Vec<Timetable>, SolveError> {
    let unteachable = problem.unteachable_modules();
    if !unteachable.is_empty() {
        return Err(SolveError::UnteachableModules {
            modules: unteachable,
        });
    }
    let unroomable = problem.unroomable_modules();
    if !unroomable.is_empty() {
        return Err(SolveError::UnroomableModules {
            modules: unroomable,
        });
    }

    let order = placement_order(problem);
    let mut population = Vec::with_capacity(config.population_size);
    let mut failed_modules: BTreeSet<String> = BTreeSet::new();

    for i in 0..config.population_size {
        let mut timetable = Timetable::new();
        for &mi in &order {
            let module = &problem.modules[mi];
            place_missing_sessions(
                problem,
                &mut timetable,
                module,
                config.placement_attempts,
                rng,
            );
        }

        match constraints::check(&timetable, problem) {
            Ok(()) => population.push(timetable),
            Err(violation) => {
                debug!("candidate {i} rejected: {violation}");
                for module in &problem.modules {
                    if timetable.module_sessions(&module.code) < module.required_sessions() {
                        failed_modules.insert(module.code.clone());
                    }
                }
            }
        }
    }

    if population.is_empty() {
        warn!(
            "initialization produced no feasible candidate out of {}",
            config.population_size
        );
        return Err(SolveError::InfeasiblePopulation {
            population_size: config.population_size,
            modules: failed_modules.into_iter().collect(),
        });
    }

    Ok(population)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lecturer, ModuleKind, Room, TargetGroup, Weekday};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn single_module_problem() -> TimetableProblem {
        let modules = vec![Module::new("CS101")
            .with_weekly_hours(4)
            .with_group("CS", "1.1")];
        let lecturers = vec![Lecturer::new("L1")
            .with_module("CS101")
            .with_max_daily(4)
            .with_max_weekly(10)];
        let rooms = vec![Room::new("LH1", 50)];
        let group_sizes = HashMap::from([(TargetGroup::new("CS", "1.1"), 30)]);
        TimetableProblem::new(modules, lecturers, rooms, group_sizes)
    }

    #[test]
    fn test_initialize_single_module() {
        let problem = single_module_problem();
        let config = EngineConfig::default().with_population_size(10);
        let mut rng = SmallRng::seed_from_u64(42);

        let population = initialize_population(&problem, &config, &mut rng).unwrap();
        assert_eq!(population.len(), 10);
        for timetable in &population {
            assert_eq!(timetable.module_sessions("CS101"), 2);
            assert!(constraints::is_feasible(timetable, &problem));
            // Two sessions on two distinct days
            let days: Vec<Weekday> = timetable.iter_entries().map(|(s, _)| s.day).collect();
            assert_eq!(days.len(), 2);
            assert_ne!(days[0], days[1]);
        }
    }

    #[test]
    fn test_unteachable_module_fails_fast() {
        let mut problem = single_module_problem();
        problem.lecturers.clear();
        let problem = TimetableProblem::new(
            problem.modules,
            problem.lecturers,
            problem.rooms,
            problem.group_sizes,
        );
        let config = EngineConfig::default().with_population_size(5);
        let mut rng = SmallRng::seed_from_u64(42);

        let err = initialize_population(&problem, &config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SolveError::UnteachableModules {
                modules: vec!["CS101".into()]
            }
        );
    }

    #[test]
    fn test_unroomable_module_fails_fast() {
        let mut problem = single_module_problem();
        problem.rooms = vec![Room::new("Closet", 5)];
        let problem = TimetableProblem::new(
            problem.modules,
            problem.lecturers,
            problem.rooms,
            problem.group_sizes,
        );
        let config = EngineConfig::default().with_population_size(5);
        let mut rng = SmallRng::seed_from_u64(42);

        let err = initialize_population(&problem, &config, &mut rng).unwrap_err();
        assert!(matches!(err, SolveError::UnroomableModules { modules } if modules == ["CS101"]));
    }

    #[test]
    fn test_overconstrained_input_reports_infeasible_population() {
        // Two group-sharing modules need four sessions in total, but the
        // only qualified lecturer may teach two per week.
        let modules = vec![
            Module::new("A").with_weekly_hours(4).with_group("CS", "1.1"),
            Module::new("B").with_weekly_hours(4).with_group("CS", "1.1"),
        ];
        let lecturers = vec![Lecturer::new("L1")
            .with_module("A")
            .with_module("B")
            .with_max_daily(1)
            .with_max_weekly(2)];
        let rooms = vec![Room::new("LH1", 50)];
        let group_sizes = HashMap::from([(TargetGroup::new("CS", "1.1"), 30)]);
        let problem = TimetableProblem::new(modules, lecturers, rooms, group_sizes);

        let config = EngineConfig::default()
            .with_population_size(5)
            .with_placement_attempts(20);
        let mut rng = SmallRng::seed_from_u64(42);

        let err = initialize_population(&problem, &config, &mut rng).unwrap_err();
        match err {
            SolveError::InfeasiblePopulation { modules, .. } => {
                assert!(!modules.is_empty());
                assert!(modules.iter().all(|m| m == "A" || m == "B"));
            }
            other => panic!("expected InfeasiblePopulation, got {other:?}"),
        }
    }

    #[test]
    fn test_restricted_room_never_assigned_to_outside_program() {
        // "CS Lab" admits only CS; the SWE module must always land in LH1.
        let modules = vec![Module::new("SWE100")
            .with_weekly_hours(4)
            .with_kind(ModuleKind::LevelSpecific)
            .with_group("SWE", "1.1")];
        let lecturers = vec![Lecturer::new("L1").with_module("SWE100")];
        let rooms = vec![
            Room::new("CS Lab", 100).with_allowed_program("CS"),
            Room::new("LH1", 100),
        ];
        let group_sizes = HashMap::from([(TargetGroup::new("SWE", "1.1"), 20)]);
        let problem = TimetableProblem::new(modules, lecturers, rooms, group_sizes);

        let config = EngineConfig::default().with_population_size(20);
        let mut rng = SmallRng::seed_from_u64(42);

        let population = initialize_population(&problem, &config, &mut rng).unwrap();
        for timetable in &population {
            for (_, entry) in timetable.iter_entries() {
                assert_eq!(entry.room, "LH1");
            }
        }
    }

    #[test]
    fn test_group_sharing_modules_never_share_cell() {
        let modules = vec![
            Module::new("A").with_weekly_hours(4).with_group("CS", "1.1"),
            Module::new("B").with_weekly_hours(4).with_group("CS", "1.1"),
        ];
        let lecturers = vec![
            Lecturer::new("L1").with_module("A"),
            Lecturer::new("L2").with_module("B"),
        ];
        let rooms = vec![Room::new("LH1", 50), Room::new("LH2", 50)];
        let group_sizes = HashMap::from([(TargetGroup::new("CS", "1.1"), 30)]);
        let problem = TimetableProblem::new(modules, lecturers, rooms, group_sizes);

        let config = EngineConfig::default().with_population_size(10);
        let mut rng = SmallRng::seed_from_u64(42);

        let population = initialize_population(&problem, &config, &mut rng).unwrap();
        for timetable in &population {
            for (_, entries) in timetable.iter_slots() {
                assert!(entries.len() <= 1, "group-sharing modules co-scheduled");
            }
        }
    }

    #[test]
    fn test_placement_order_most_constrained_first() {
        let modules = vec![
            Module::new("LIGHT").with_weekly_hours(2).with_group("CS", "1.1"),
            Module::new("HEAVY").with_weekly_hours(8).with_group("CS", "1.1"),
            Module::new("WIDE")
                .with_weekly_hours(8)
                .with_group("CS", "1.1")
                .with_group("SWE", "1.1"),
        ];
        let problem = TimetableProblem::new(modules, vec![], vec![], HashMap::new());

        let order = placement_order(&problem);
        let codes: Vec<&str> = order.iter().map(|&i| problem.modules[i].code.as_str()).collect();
        // Within the CS/1.1 group: WIDE (8h, 2 groups) before HEAVY (8h, 1 group)
        // before LIGHT (2h).
        assert_eq!(codes, vec!["WIDE", "HEAVY", "LIGHT"]);
    }

    #[test]
    fn test_deterministic_with_fixed_seed() {
        let problem = single_module_problem();
        let config = EngineConfig::default().with_population_size(5);

        let mut rng1 = SmallRng::seed_from_u64(7);
        let mut rng2 = SmallRng::seed_from_u64(7);
        let a = initialize_population(&problem, &config, &mut rng1).unwrap();
        let b = initialize_population(&problem, &config, &mut rng2).unwrap();
        assert_eq!(a, b);
    }
}
