//! Timetable (solution) model.
//!
//! A timetable is a complete assignment of sessions to (day, period)
//! cells. It is both the GA individual and the artifact handed back to
//! callers.
//!
//! # Representation
//! The primary structure is the slot grid: every cell holds an ordered
//! list of [`SessionEntry`] records (empty list = free cell). Two
//! derived indices — lecturer → cell → module and room → cell → module —
//! give O(1) conflict lookups. The indices are never mutated directly:
//! [`place`](Timetable::place) and [`clear_slot`](Timetable::clear_slot)
//! update the grid and both indices together, so they cannot drift
//! apart. `Clone` is deep; no two timetables ever share entry storage.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::calendar::{Slot, Weekday, DAYS_PER_WEEK, PERIODS_PER_DAY};

/// One scheduled session: a module taught by a lecturer in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Module code.
    pub module: String,
    /// Lecturer id.
    pub lecturer: String,
    /// Room name.
    pub room: String,
}

impl SessionEntry {
    /// Creates a session entry.
    pub fn new(
        module: impl Into<String>,
        lecturer: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            lecturer: lecturer.into(),
            room: room.into(),
        }
    }
}

/// Per-lecturer or per-room occupancy grid: the module code held in
/// each cell, `None` when free.
type OccupancyGrid = [[Option<String>; PERIODS_PER_DAY]; DAYS_PER_WEEK];

/// A candidate (or final) weekly timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Primary grid: day × period → ordered session entries.
    slots: [[Vec<SessionEntry>; PERIODS_PER_DAY]; DAYS_PER_WEEK],
    /// Derived index: lecturer id → occupancy grid.
    lecturer_slots: HashMap<String, OccupancyGrid>,
    /// Derived index: room name → occupancy grid.
    room_slots: HashMap<String, OccupancyGrid>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries scheduled in a cell, in placement order.
    #[inline]
    pub fn entries(&self, slot: Slot) -> &[SessionEntry] {
        &self.slots[slot.day.index()][slot.period.index()]
    }

    /// Places a session into a cell, updating both derived indices.
    ///
    /// Feasibility (conflicts, caps, capacity) is the caller's
    /// responsibility; this only maintains structural consistency.
    pub fn place(&mut self, slot: Slot, entry: SessionEntry) {
        let (d, p) = (slot.day.index(), slot.period.index());
        debug_assert!(
            self.lecturer_slots
                .get(&entry.lecturer)
                .map_or(true, |g| g[d][p].is_none()),
            "lecturer already booked in this cell"
        );
        debug_assert!(
            self.room_slots
                .get(&entry.room)
                .map_or(true, |g| g[d][p].is_none()),
            "room already booked in this cell"
        );

        self.lecturer_slots
            .entry(entry.lecturer.clone())
            .or_default()[d][p] = Some(entry.module.clone());
        self.room_slots.entry(entry.room.clone()).or_default()[d][p] = Some(entry.module.clone());
        self.slots[d][p].push(entry);
    }

    /// Removes every entry from a cell, releasing the lecturer and room
    /// index cells they held. Returns the number of entries removed.
    pub fn clear_slot(&mut self, slot: Slot) -> usize {
        let (d, p) = (slot.day.index(), slot.period.index());
        let removed = std::mem::take(&mut self.slots[d][p]);
        for entry in &removed {
            if let Some(grid) = self.lecturer_slots.get_mut(&entry.lecturer) {
                grid[d][p] = None;
            }
            if let Some(grid) = self.room_slots.get_mut(&entry.room) {
                grid[d][p] = None;
            }
        }
        removed.len()
    }

    /// Module taught by a lecturer in a cell, if any.
    pub fn lecturer_at(&self, lecturer: &str, slot: Slot) -> Option<&str> {
        self.lecturer_slots
            .get(lecturer)
            .and_then(|g| g[slot.day.index()][slot.period.index()].as_deref())
    }

    /// Module held in a room in a cell, if any.
    pub fn room_at(&self, room: &str, slot: Slot) -> Option<&str> {
        self.room_slots
            .get(room)
            .and_then(|g| g[slot.day.index()][slot.period.index()].as_deref())
    }

    /// Sessions a lecturer teaches on a given day.
    pub fn lecturer_day_sessions(&self, lecturer: &str, day: Weekday) -> usize {
        self.lecturer_slots.get(lecturer).map_or(0, |g| {
            g[day.index()].iter().filter(|c| c.is_some()).count()
        })
    }

    /// Sessions a lecturer teaches over the whole week.
    pub fn lecturer_week_sessions(&self, lecturer: &str) -> usize {
        self.lecturer_slots.get(lecturer).map_or(0, |g| {
            g.iter()
                .flat_map(|day| day.iter())
                .filter(|c| c.is_some())
                .count()
        })
    }

    /// Total sessions scheduled for a module across the week.
    pub fn module_sessions(&self, code: &str) -> usize {
        self.iter_entries().filter(|(_, e)| e.module == code).count()
    }

    /// Whether a module already has a session on the given day.
    pub fn module_on_day(&self, code: &str, day: Weekday) -> bool {
        self.slots[day.index()]
            .iter()
            .any(|cell| cell.iter().any(|e| e.module == code))
    }

    /// Total entries across all cells.
    pub fn session_count(&self) -> usize {
        self.iter_entries().count()
    }

    /// Iterates all cells in calendar order.
    pub fn iter_slots(&self) -> impl Iterator<Item = (Slot, &[SessionEntry])> {
        Slot::all().map(move |slot| (slot, self.entries(slot)))
    }

    /// Iterates all entries with their cell, in calendar order.
    pub fn iter_entries(&self) -> impl Iterator<Item = (Slot, &SessionEntry)> {
        self.iter_slots()
            .flat_map(|(slot, entries)| entries.iter().map(move |e| (slot, e)))
    }

    /// Whether the derived indices agree with the primary grid.
    ///
    /// Test oracle for the index-consistency invariant. Always true for
    /// timetables mutated only through `place` and `clear_slot`.
    pub fn indices_consistent(&self) -> bool {
        // Every entry must be mirrored in both indices.
        for (slot, entry) in self.iter_entries() {
            if self.lecturer_at(&entry.lecturer, slot) != Some(entry.module.as_str()) {
                return false;
            }
            if self.room_at(&entry.room, slot) != Some(entry.module.as_str()) {
                return false;
            }
        }
        // Every occupied index cell must be backed by an entry.
        let occupied = |grid: &OccupancyGrid| -> usize {
            grid.iter()
                .flat_map(|day| day.iter())
                .filter(|c| c.is_some())
                .count()
        };
        let indexed: usize = self.lecturer_slots.values().map(occupied).sum();
        if indexed != self.session_count() {
            return false;
        }
        let indexed: usize = self.room_slots.values().map(occupied).sum();
        indexed == self.session_count()
    }
}
