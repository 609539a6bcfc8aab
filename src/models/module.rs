//! Module (taught unit) model.
//!
//! A module is a unit of teaching delivered to one or more target
//! groups. Weekly hours are always even: every session occupies one
//! two-hour period, so a module needs `hours / 2` sessions per week,
//! on distinct days.

use serde::{Deserialize, Serialize};

/// A (program, level) pair of students a module is taught to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetGroup {
    /// Program code (e.g., "CS", "SWE").
    pub program: String,
    /// Level within the program (e.g., "1.1", "2.2").
    pub level: String,
}

impl TargetGroup {
    /// Creates a target group.
    pub fn new(program: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            level: level.into(),
        }
    }
}

/// Module audience classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleKind {
    /// Taught to every group in the department.
    Core,
    /// Taught to all levels of specific programs.
    ProgramSpecific,
    /// Taught to specific (program, level) groups only.
    LevelSpecific,
}

/// A module to be timetabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Unique module code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Required teaching hours per week. Must be even and ≥ 2.
    pub weekly_hours: u32,
    /// Audience classification.
    pub kind: ModuleKind,
    /// Groups this module is taught to.
    pub target_groups: Vec<TargetGroup>,
}

impl Module {
    /// Creates a new module with the given code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            weekly_hours: 4,
            kind: ModuleKind::LevelSpecific,
            target_groups: Vec::new(),
        }
    }

    /// Sets the module name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly hours.
    pub fn with_weekly_hours(mut self, hours: u32) -> Self {
        self.weekly_hours = hours;
        self
    }

    /// Sets the audience classification.
    pub fn with_kind(mut self, kind: ModuleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds a target group.
    pub fn with_group(mut self, program: impl Into<String>, level: impl Into<String>) -> Self {
        self.target_groups.push(TargetGroup::new(program, level));
        self
    }

    /// Sessions required per week (one session = two hours).
    #[inline]
    pub fn required_sessions(&self) -> usize {
        (self.weekly_hours / 2) as usize
    }

    /// Programs among this module's target groups, deduplicated.
    pub fn programs(&self) -> Vec<&str> {
        let mut programs: Vec<&str> = self
            .target_groups
            .iter()
            .map(|g| g.program.as_str())
            .collect();
        programs.sort_unstable();
        programs.dedup();
        programs
    }

    /// Whether this module shares any target group with another.
    pub fn shares_group_with(&self, other: &Module) -> bool {
        self.target_groups
            .iter()
            .any(|g| other.target_groups.contains(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_builder() {
        let m = Module::new("CS101")
            .with_name("Programming Fundamentals")
            .with_weekly_hours(4)
            .with_kind(ModuleKind::Core)
            .with_group("CS", "1.1")
            .with_group("SWE", "1.1");

        assert_eq!(m.code, "CS101");
        assert_eq!(m.name, "Programming Fundamentals");
        assert_eq!(m.required_sessions(), 2);
        assert_eq!(m.kind, ModuleKind::Core);
        assert_eq!(m.target_groups.len(), 2);
    }

    #[test]
    fn test_programs_deduplicated() {
        let m = Module::new("CS210")
            .with_group("CS", "2.1")
            .with_group("CS", "2.2")
            .with_group("SWE", "2.1");

        assert_eq!(m.programs(), vec!["CS", "SWE"]);
    }

    #[test]
    fn test_shares_group() {
        let a = Module::new("A").with_group("CS", "1.1");
        let b = Module::new("B").with_group("CS", "1.1").with_group("SWE", "1.1");
        let c = Module::new("C").with_group("CSEC", "1.1");

        assert!(a.shares_group_with(&b));
        assert!(b.shares_group_with(&a));
        assert!(!a.shares_group_with(&c));
    }

    #[test]
    fn test_required_sessions() {
        assert_eq!(Module::new("X").with_weekly_hours(2).required_sessions(), 1);
        assert_eq!(Module::new("X").with_weekly_hours(8).required_sessions(), 4);
    }
}
