//! Room model.
//!
//! Rooms are keyed by name and carry a headcount capacity plus an
//! optional program restriction: an empty `allowed_programs` list means
//! the room is unrestricted, a non-empty list admits a module only when
//! every program among its target groups is a member.

use serde::{Deserialize, Serialize};

/// A room available for session assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room name.
    pub name: String,
    /// Seated headcount capacity.
    pub capacity: u32,
    /// Programs admitted to this room. Empty = unrestricted.
    pub allowed_programs: Vec<String>,
}

impl Room {
    /// Creates a new unrestricted room.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
            allowed_programs: Vec::new(),
        }
    }

    /// Restricts this room to a program.
    pub fn with_allowed_program(mut self, program: impl Into<String>) -> Self {
        self.allowed_programs.push(program.into());
        self
    }

    /// Whether this room admits a module teaching the given programs.
    ///
    /// Unrestricted rooms admit everything. Restricted rooms require
    /// every program in `programs` to be allowed.
    pub fn admits_programs<'a>(&self, mut programs: impl Iterator<Item = &'a str>) -> bool {
        if self.allowed_programs.is_empty() {
            return true;
        }
        programs.all(|p| self.allowed_programs.iter().any(|a| a == p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_room_admits_all() {
        let r = Room::new("LH1", 120);
        assert!(r.admits_programs(["CS", "SWE"].into_iter()));
        assert!(r.admits_programs(std::iter::empty()));
    }

    #[test]
    fn test_restricted_room() {
        let r = Room::new("CS Lab", 40)
            .with_allowed_program("CS")
            .with_allowed_program("CSE");

        assert!(r.admits_programs(["CS"].into_iter()));
        assert!(r.admits_programs(["CS", "CSE"].into_iter()));
        // All programs must be members, not just one
        assert!(!r.admits_programs(["CS", "SWE"].into_iter()));
        assert!(!r.admits_programs(["SWE"].into_iter()));
    }

    #[test]
    fn test_restricted_room_admits_programless_module() {
        let r = Room::new("CS Lab", 40).with_allowed_program("CS");
        // No programs to violate the restriction
        assert!(r.admits_programs(std::iter::empty()));
    }
}
