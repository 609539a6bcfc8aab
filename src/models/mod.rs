//! Timetabling domain models.
//!
//! Core data types for weekly timetable synthesis: the fixed calendar
//! grid, the taught modules with their audiences, the lecturers and
//! rooms that host sessions, and the [`Timetable`] solution artifact.

mod calendar;
mod lecturer;
mod module;
mod room;
mod timetable;

pub use calendar::{Period, Slot, Weekday, DAYS_PER_WEEK, PERIODS_PER_DAY};
pub use lecturer::Lecturer;
pub use module::{Module, ModuleKind, TargetGroup};
pub use room::Room;
pub use timetable::{SessionEntry, Timetable};
