//! Engine error taxonomy.
//!
//! Configuration problems are re-checked and reported before any search
//! starts; an infeasible initial population aborts the run with the
//! offending module codes. Per-individual scoring errors are recovered
//! inside the driver and never surface here.

use thiserror::Error;

/// A fatal engine failure. Always carries an explicit reason and, where
/// applicable, the module codes that caused it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Modules that no lecturer is qualified to teach.
    #[error("no qualified lecturer for module(s): {}", modules.join(", "))]
    UnteachableModules {
        /// Offending module codes.
        modules: Vec<String>,
    },

    /// Modules that no room can ever host (capacity or program
    /// restrictions rule out every room).
    #[error("no feasible room for module(s): {}", modules.join(", "))]
    UnroomableModules {
        /// Offending module codes.
        modules: Vec<String>,
    },

    /// No candidate of the initial population satisfied the hard
    /// constraints.
    #[error(
        "no feasible timetable in any of {population_size} initialization attempts; \
         under-scheduled module(s): {}",
        modules.join(", ")
    )]
    InfeasiblePopulation {
        /// Candidates attempted.
        population_size: usize,
        /// Modules left under-scheduled in discarded candidates.
        modules: Vec<String>,
    },

    /// Malformed domain data (duplicate keys, odd hours, empty audience).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Nonsensical tunables.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}
