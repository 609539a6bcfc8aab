//! Hard-constraint validation for candidate timetables.
//!
//! A stateless, pure gate: a candidate either satisfies every
//! feasibility invariant or it is rejected outright. Used at
//! initialization to filter candidates and in tests as the correctness
//! oracle. Soft quality is never judged here — that is the fitness
//! evaluator's job.
//!
//! Checks run in a fixed order over cells in calendar order, so the
//! "first violation" reported by [`check`] is deterministic:
//! 1. No two entries in a cell share a target group
//! 2. No lecturer twice in a cell; daily and weekly caps respected
//! 3. No room twice in a cell
//! 4. Module headcount within room capacity
//! 5. Room program restrictions respected
//! 6. Lecturer qualified for the assigned module
//! 7. Module session counts exact, at most one session per day

use std::collections::HashSet;
use thiserror::Error;

use crate::ga::TimetableProblem;
use crate::models::{Slot, TargetGroup, Timetable, Weekday};

/// A hard-constraint violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// Two entries in one cell serve the same student group.
    #[error("group {}/{} has two sessions in {} {}", group.program, group.level, slot.day.name(), slot.period.label())]
    GroupClash {
        /// Offending cell.
        slot: Slot,
        /// The doubly-taught group.
        group: TargetGroup,
    },

    /// A lecturer appears twice in one cell.
    #[error("lecturer '{lecturer}' teaches two sessions in {} {}", slot.day.name(), slot.period.label())]
    LecturerClash {
        /// Offending cell.
        slot: Slot,
        /// Lecturer id.
        lecturer: String,
    },

    /// A lecturer exceeds the daily session cap.
    #[error("lecturer '{lecturer}' has {sessions} sessions on {} (max {max})", day.name())]
    LecturerDailyOverload {
        /// Lecturer id.
        lecturer: String,
        /// Overloaded day.
        day: Weekday,
        /// Sessions scheduled.
        sessions: usize,
        /// Permitted maximum.
        max: u32,
    },

    /// A lecturer exceeds the weekly session cap.
    #[error("lecturer '{lecturer}' has {sessions} sessions this week (max {max})")]
    LecturerWeeklyOverload {
        /// Lecturer id.
        lecturer: String,
        /// Sessions scheduled.
        sessions: usize,
        /// Permitted maximum.
        max: u32,
    },

    /// A room appears twice in one cell.
    #[error("room '{room}' double-booked in {} {}", slot.day.name(), slot.period.label())]
    RoomClash {
        /// Offending cell.
        slot: Slot,
        /// Room name.
        room: String,
    },

    /// A module's audience exceeds its room's capacity.
    #[error("module '{module}' needs {headcount} seats but room '{room}' holds {capacity}")]
    RoomOverCapacity {
        /// Offending cell.
        slot: Slot,
        /// Room name.
        room: String,
        /// Module code.
        module: String,
        /// Audience headcount.
        headcount: u32,
        /// Room capacity.
        capacity: u32,
    },

    /// A module is placed in a room that does not admit its programs.
    #[error("module '{module}' is not admitted to room '{room}'")]
    RoomProgramMismatch {
        /// Offending cell.
        slot: Slot,
        /// Room name.
        room: String,
        /// Module code.
        module: String,
    },

    /// A lecturer is assigned a module outside their qualifications.
    #[error("lecturer '{lecturer}' is not qualified to teach '{module}'")]
    UnqualifiedLecturer {
        /// Offending cell.
        slot: Slot,
        /// Lecturer id.
        lecturer: String,
        /// Module code.
        module: String,
    },

    /// A module's weekly session count differs from its requirement.
    #[error("module '{module}' has {scheduled} sessions (requires {required})")]
    SessionCountMismatch {
        /// Module code.
        module: String,
        /// Sessions actually scheduled.
        scheduled: usize,
        /// Sessions required.
        required: usize,
    },

    /// A module has more than one session on the same day.
    #[error("module '{module}' scheduled more than once on {}", day.name())]
    SameDayDuplicate {
        /// Module code.
        module: String,
        /// Offending day.
        day: Weekday,
    },

    /// An entry references a module absent from the problem data.
    #[error("entry references unknown module '{module}'")]
    UnknownModule {
        /// Offending cell.
        slot: Slot,
        /// Unresolvable module code.
        module: String,
    },

    /// An entry references a lecturer absent from the problem data.
    #[error("entry references unknown lecturer '{lecturer}'")]
    UnknownLecturer {
        /// Offending cell.
        slot: Slot,
        /// Unresolvable lecturer id.
        lecturer: String,
    },

    /// An entry references a room absent from the problem data.
    #[error("entry references unknown room '{room}'")]
    UnknownRoom {
        /// Offending cell.
        slot: Slot,
        /// Unresolvable room name.
        room: String,
    },
}

/// Checks a candidate against every hard constraint.
///
/// Returns the first violation in check order, or `Ok(())` for a
/// feasible timetable.
pub fn check(timetable: &Timetable, problem: &TimetableProblem) -> Result<(), Violation> {
    match scan(timetable, problem, true).into_iter().next() {
        Some(v) => Err(v),
        None => Ok(()),
    }
}

/// Whether a candidate satisfies every hard constraint.
pub fn is_feasible(timetable: &Timetable, problem: &TimetableProblem) -> bool {
    check(timetable, problem).is_ok()
}

/// Collects every hard-constraint violation, for diagnostics.
pub fn violations(timetable: &Timetable, problem: &TimetableProblem) -> Vec<Violation> {
    scan(timetable, problem, false)
}

fn scan(timetable: &Timetable, problem: &TimetableProblem, first_only: bool) -> Vec<Violation> {
    let mut out = Vec::new();

    macro_rules! bail_if_first {
        () => {
            if first_only && !out.is_empty() {
                return out;
            }
        };
    }

    // 1. Group clashes per cell.
    for (slot, entries) in timetable.iter_slots() {
        let mut seen: HashSet<&TargetGroup> = HashSet::new();
        for entry in entries {
            let Some(module) = problem.module(&entry.module) else {
                out.push(Violation::UnknownModule {
                    slot,
                    module: entry.module.clone(),
                });
                continue;
            };
            for group in &module.target_groups {
                if !seen.insert(group) {
                    out.push(Violation::GroupClash {
                        slot,
                        group: group.clone(),
                    });
                }
            }
        }
        bail_if_first!();
    }

    // 2. Lecturer clashes per cell, then daily/weekly caps.
    for (slot, entries) in timetable.iter_slots() {
        let mut seen: HashSet<&str> = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.lecturer.as_str()) {
                out.push(Violation::LecturerClash {
                    slot,
                    lecturer: entry.lecturer.clone(),
                });
            }
        }
        bail_if_first!();
    }
    for lecturer in &problem.lecturers {
        for day in Weekday::ALL {
            let sessions = timetable.lecturer_day_sessions(&lecturer.id, day);
            if sessions > lecturer.max_daily as usize {
                out.push(Violation::LecturerDailyOverload {
                    lecturer: lecturer.id.clone(),
                    day,
                    sessions,
                    max: lecturer.max_daily,
                });
            }
        }
        let sessions = timetable.lecturer_week_sessions(&lecturer.id);
        if sessions > lecturer.max_weekly as usize {
            out.push(Violation::LecturerWeeklyOverload {
                lecturer: lecturer.id.clone(),
                sessions,
                max: lecturer.max_weekly,
            });
        }
        bail_if_first!();
    }

    // 3. Room clashes per cell.
    for (slot, entries) in timetable.iter_slots() {
        let mut seen: HashSet<&str> = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.room.as_str()) {
                out.push(Violation::RoomClash {
                    slot,
                    room: entry.room.clone(),
                });
            }
        }
        bail_if_first!();
    }

    // 4.–6. Per-entry room capacity, program admission, qualification.
    for (slot, entry) in timetable.iter_entries() {
        let Some(module) = problem.module(&entry.module) else {
            continue; // already reported in pass 1
        };
        match problem.rooms.iter().find(|r| r.name == entry.room) {
            None => out.push(Violation::UnknownRoom {
                slot,
                room: entry.room.clone(),
            }),
            Some(room) => {
                let headcount = problem.headcount(module);
                if headcount > room.capacity {
                    out.push(Violation::RoomOverCapacity {
                        slot,
                        room: room.name.clone(),
                        module: module.code.clone(),
                        headcount,
                        capacity: room.capacity,
                    });
                }
                if !room.admits_programs(module.programs().into_iter()) {
                    out.push(Violation::RoomProgramMismatch {
                        slot,
                        room: room.name.clone(),
                        module: module.code.clone(),
                    });
                }
            }
        }
        match problem.lecturers.iter().find(|l| l.id == entry.lecturer) {
            None => out.push(Violation::UnknownLecturer {
                slot,
                lecturer: entry.lecturer.clone(),
            }),
            Some(lecturer) => {
                if !lecturer.is_qualified_for(&entry.module) {
                    out.push(Violation::UnqualifiedLecturer {
                        slot,
                        lecturer: lecturer.id.clone(),
                        module: entry.module.clone(),
                    });
                }
            }
        }
        bail_if_first!();
    }

    // 7. Module session counts: exact weekly total, at most one per day.
    for module in &problem.modules {
        let scheduled = timetable.module_sessions(&module.code);
        if scheduled != module.required_sessions() {
            out.push(Violation::SessionCountMismatch {
                module: module.code.clone(),
                scheduled,
                required: module.required_sessions(),
            });
        }
        for day in Weekday::ALL {
            let on_day = timetable
                .iter_entries()
                .filter(|(s, e)| s.day == day && e.module == module.code)
                .count();
            if on_day > 1 {
                out.push(Violation::SameDayDuplicate {
                    module: module.code.clone(),
                    day,
                });
            }
        }
        bail_if_first!();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lecturer, Module, Period, Room, SessionEntry, TargetGroup};
    use std::collections::HashMap;

    fn sample_problem() -> TimetableProblem {
        let modules = vec![
            Module::new("CS101").with_weekly_hours(4).with_group("CS", "1.1"),
            Module::new("SWE200").with_weekly_hours(4).with_group("SWE", "2.1"),
        ];
        let lecturers = vec![
            Lecturer::new("L1").with_module("CS101").with_max_daily(2),
            Lecturer::new("L2").with_module("SWE200"),
        ];
        let rooms = vec![Room::new("LH1", 100), Room::new("LH2", 100)];
        let group_sizes = HashMap::from([
            (TargetGroup::new("CS", "1.1"), 35),
            (TargetGroup::new("SWE", "2.1"), 30),
        ]);
        TimetableProblem::new(modules, lecturers, rooms, group_sizes)
    }

    /// CS101 Mon/Wed, SWE200 Tue/Thu — fully feasible.
    fn feasible_timetable() -> Timetable {
        let mut t = Timetable::new();
        t.place(
            Slot::new(Weekday::Monday, Period::First),
            SessionEntry::new("CS101", "L1", "LH1"),
        );
        t.place(
            Slot::new(Weekday::Wednesday, Period::Second),
            SessionEntry::new("CS101", "L1", "LH1"),
        );
        t.place(
            Slot::new(Weekday::Tuesday, Period::First),
            SessionEntry::new("SWE200", "L2", "LH2"),
        );
        t.place(
            Slot::new(Weekday::Thursday, Period::Third),
            SessionEntry::new("SWE200", "L2", "LH2"),
        );
        t
    }

    #[test]
    fn test_feasible_timetable_passes() {
        let p = sample_problem();
        let t = feasible_timetable();
        assert!(check(&t, &p).is_ok());
        assert!(is_feasible(&t, &p));
        assert!(violations(&t, &p).is_empty());
    }

    #[test]
    fn test_group_clash_detected() {
        let mut p = sample_problem();
        // Make SWE200 share CS101's group, then co-schedule them.
        p.modules[1].target_groups = vec![TargetGroup::new("CS", "1.1")];
        let p = TimetableProblem::new(p.modules, p.lecturers, p.rooms, p.group_sizes);

        let mut t = Timetable::new();
        let cell = Slot::new(Weekday::Monday, Period::First);
        t.place(cell, SessionEntry::new("CS101", "L1", "LH1"));
        t.place(cell, SessionEntry::new("SWE200", "L2", "LH2"));

        assert!(matches!(
            check(&t, &p),
            Err(Violation::GroupClash { .. })
        ));
    }

    #[test]
    fn test_session_count_mismatch() {
        let p = sample_problem();
        let mut t = feasible_timetable();
        t.clear_slot(Slot::new(Weekday::Wednesday, Period::Second));

        let vs = violations(&t, &p);
        assert!(vs.iter().any(|v| matches!(
            v,
            Violation::SessionCountMismatch { module, scheduled: 1, required: 2 } if module == "CS101"
        )));
    }

    #[test]
    fn test_same_day_duplicate() {
        let p = sample_problem();
        let mut t = feasible_timetable();
        // Move CS101's second session onto Monday as well.
        t.clear_slot(Slot::new(Weekday::Wednesday, Period::Second));
        t.place(
            Slot::new(Weekday::Monday, Period::Third),
            SessionEntry::new("CS101", "L1", "LH1"),
        );

        let vs = violations(&t, &p);
        assert!(vs.iter().any(|v| matches!(
            v,
            Violation::SameDayDuplicate { module, day: Weekday::Monday } if module == "CS101"
        )));
    }

    #[test]
    fn test_daily_overload() {
        let mut p = sample_problem();
        p.modules[0].weekly_hours = 6; // 3 sessions
        p.lecturers[0].max_daily = 2;
        let p = TimetableProblem::new(p.modules, p.lecturers, p.rooms, p.group_sizes);

        // Three CS101 sessions all on Monday, distinct periods.
        let mut t = Timetable::new();
        for period in [Period::First, Period::Second, Period::Third] {
            t.place(
                Slot::new(Weekday::Monday, period),
                SessionEntry::new("CS101", "L1", "LH1"),
            );
        }

        let vs = violations(&t, &p);
        assert!(vs
            .iter()
            .any(|v| matches!(v, Violation::LecturerDailyOverload { sessions: 3, max: 2, .. })));
    }

    #[test]
    fn test_room_capacity_violation() {
        let mut p = sample_problem();
        p.rooms[0].capacity = 20; // below CS101's 35 heads
        let p = TimetableProblem::new(p.modules, p.lecturers, p.rooms, p.group_sizes);
        let t = feasible_timetable();

        let vs = violations(&t, &p);
        assert!(vs.iter().any(|v| matches!(
            v,
            Violation::RoomOverCapacity { headcount: 35, capacity: 20, .. }
        )));
    }

    #[test]
    fn test_program_restriction_violation() {
        let mut p = sample_problem();
        p.rooms[0].allowed_programs = vec!["SWE".into()]; // LH1 refuses CS
        let p = TimetableProblem::new(p.modules, p.lecturers, p.rooms, p.group_sizes);
        let t = feasible_timetable();

        let vs = violations(&t, &p);
        assert!(vs.iter().any(|v| matches!(
            v,
            Violation::RoomProgramMismatch { module, .. } if module == "CS101"
        )));
    }

    #[test]
    fn test_unqualified_lecturer() {
        let p = sample_problem();
        let mut t = Timetable::new();
        // L2 is not qualified for CS101.
        t.place(
            Slot::new(Weekday::Monday, Period::First),
            SessionEntry::new("CS101", "L2", "LH1"),
        );

        let vs = violations(&t, &p);
        assert!(vs.iter().any(|v| matches!(
            v,
            Violation::UnqualifiedLecturer { lecturer, .. } if lecturer == "L2"
        )));
    }

    #[test]
    fn test_unknown_references() {
        let p = sample_problem();
        let mut t = Timetable::new();
        t.place(
            Slot::new(Weekday::Monday, Period::First),
            SessionEntry::new("GHOST", "L9", "Nowhere"),
        );

        let vs = violations(&t, &p);
        assert!(vs.iter().any(|v| matches!(v, Violation::UnknownModule { .. })));
        assert!(vs.iter().any(|v| matches!(v, Violation::UnknownLecturer { .. })));
        assert!(vs.iter().any(|v| matches!(v, Violation::UnknownRoom { .. })));
    }

    #[test]
    fn test_violation_messages_are_descriptive() {
        let v = Violation::SessionCountMismatch {
            module: "CS101".into(),
            scheduled: 1,
            required: 2,
        };
        assert!(v.to_string().contains("CS101"));

        let v = Violation::RoomClash {
            slot: Slot::new(Weekday::Friday, Period::Second),
            room: "LH1".into(),
        };
        let msg = v.to_string();
        assert!(msg.contains("LH1"));
        assert!(msg.contains("Friday"));
    }
}
