//! Timetabling problem aggregate.
//!
//! Bundles the read-only domain data — modules, lecturers, rooms, group
//! sizes — with the lookup indices the engine needs on its hot path.
//! The engine is a pure function of this data, the tunables, and the
//! RNG seed; nothing here is mutated during a run.

use std::collections::HashMap;

use crate::models::{Lecturer, Module, Room, TargetGroup};

/// Cell occupancy cap: at most this many parallel sessions per
/// (day, period) cell.
pub const MAX_ENTRIES_PER_SLOT: usize = 10;

/// Read-only input to a timetable synthesis run.
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    /// Modules to place.
    pub modules: Vec<Module>,
    /// Available lecturers.
    pub lecturers: Vec<Lecturer>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Headcount per (program, level) group.
    pub group_sizes: HashMap<TargetGroup, u32>,
    /// Module code → index into `modules`.
    module_index: HashMap<String, usize>,
}

impl TimetableProblem {
    /// Creates a problem from domain data.
    pub fn new(
        modules: Vec<Module>,
        lecturers: Vec<Lecturer>,
        rooms: Vec<Room>,
        group_sizes: HashMap<TargetGroup, u32>,
    ) -> Self {
        let module_index = modules
            .iter()
            .enumerate()
            .map(|(i, m)| (m.code.clone(), i))
            .collect();
        Self {
            modules,
            lecturers,
            rooms,
            group_sizes,
            module_index,
        }
    }

    /// Looks up a module by code.
    pub fn module(&self, code: &str) -> Option<&Module> {
        self.module_index.get(code).map(|&i| &self.modules[i])
    }

    /// Total headcount across a module's target groups.
    ///
    /// Groups missing from the size table count as zero.
    pub fn headcount(&self, module: &Module) -> u32 {
        module
            .target_groups
            .iter()
            .map(|g| self.group_sizes.get(g).copied().unwrap_or(0))
            .sum()
    }

    /// Lecturers qualified to teach a module, in roster order.
    pub fn qualified_lecturers<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Lecturer> {
        self.lecturers.iter().filter(move |l| l.is_qualified_for(code))
    }

    /// Module codes no lecturer is qualified to teach.
    pub fn unteachable_modules(&self) -> Vec<String> {
        self.modules
            .iter()
            .filter(|m| self.qualified_lecturers(&m.code).next().is_none())
            .map(|m| m.code.clone())
            .collect()
    }

    /// Module codes no room can ever host: every room either lacks the
    /// capacity for the module's own headcount or refuses its programs.
    pub fn unroomable_modules(&self) -> Vec<String> {
        self.modules
            .iter()
            .filter(|m| {
                let needed = self.headcount(m);
                !self.rooms.iter().any(|r| {
                    r.capacity >= needed && r.admits_programs(m.programs().into_iter())
                })
            })
            .map(|m| m.code.clone())
            .collect()
    }
}
