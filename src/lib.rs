//! Weekly timetable synthesis engine.
//!
//! Assigns teaching sessions to (day, period, room, lecturer) slots of
//! a fixed five-day, four-period week using a population-based genetic
//! algorithm: hard feasibility constraints gate every accepted
//! timetable, soft distribution quality drives the search.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Module`, `Lecturer`, `Room`, the
//!   fixed calendar grid, and the `Timetable` artifact
//! - **`validation`**: Input integrity checks (duplicate ids, impossible
//!   modules) run before any search
//! - **`constraints`**: Hard-constraint validator — the feasibility gate
//!   and correctness oracle
//! - **`ga`**: The engine — initialization, fitness, operators,
//!   selection, and the generational driver
//! - **`error`**: The `SolveError` taxonomy
//!
//! # Usage
//!
//! ```no_run
//! use u_timetable::ga::{EngineConfig, Solver, TimetableProblem};
//! # let (modules, lecturers, rooms, group_sizes) = (vec![], vec![], vec![], Default::default());
//!
//! let problem = TimetableProblem::new(modules, lecturers, rooms, group_sizes);
//! let config = EngineConfig::default().with_seed(42);
//! let outcome = Solver::run(&problem, &config)?;
//! for (slot, entry) in outcome.best.iter_entries() {
//!     println!("{} {}: {}", slot.day.name(), slot.period.label(), entry.module);
//! }
//! # Ok::<(), u_timetable::error::SolveError>(())
//! ```
//!
//! The engine is a pure function of (domain data, tunables, RNG seed):
//! no global state, nothing persisted between runs, and identical seeds
//! reproduce identical timetables.

pub mod constraints;
pub mod error;
pub mod ga;
pub mod models;
pub mod validation;
