//! Lecturer model.
//!
//! Lecturers are keyed by id (display names need not be unique) and
//! carry the list of module codes they are qualified to teach plus
//! per-day and per-week session caps.

use serde::{Deserialize, Serialize};

/// A lecturer available for session assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    /// Unique lecturer identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Module codes this lecturer may teach.
    pub qualified_modules: Vec<String>,
    /// Maximum sessions per day.
    pub max_daily: u32,
    /// Maximum sessions per week.
    pub max_weekly: u32,
}

impl Lecturer {
    /// Creates a new lecturer with the given id.
    ///
    /// Default caps: 4 sessions/day (a full day), 20 sessions/week
    /// (every slot of the week).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            qualified_modules: Vec::new(),
            max_daily: 4,
            max_weekly: 20,
        }
    }

    /// Sets the lecturer name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a module this lecturer is qualified to teach.
    pub fn with_module(mut self, code: impl Into<String>) -> Self {
        self.qualified_modules.push(code.into());
        self
    }

    /// Sets the daily session cap.
    pub fn with_max_daily(mut self, sessions: u32) -> Self {
        self.max_daily = sessions;
        self
    }

    /// Sets the weekly session cap.
    pub fn with_max_weekly(mut self, sessions: u32) -> Self {
        self.max_weekly = sessions;
        self
    }

    /// Whether this lecturer may teach the given module.
    pub fn is_qualified_for(&self, code: &str) -> bool {
        self.qualified_modules.iter().any(|m| m == code)
    }
}
