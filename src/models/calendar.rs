//! Fixed weekly calendar.
//!
//! The timetable grid is five weekdays by four two-hour periods. A
//! [`Slot`] is one (day, period) cell; a session occupies exactly one
//! slot. The grid shape is fixed — callers name the periods, they do
//! not add or remove them.
//!
//! # Ordering
//! Iteration order is Monday→Friday, first→fourth period, and is part
//! of the contract: seeded runs enumerate cells in this order.

use serde::{Deserialize, Serialize};

/// Number of teaching days per week.
pub const DAYS_PER_WEEK: usize = 5;

/// Number of teaching periods per day.
pub const PERIODS_PER_DAY: usize = 4;

/// A teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Zero-based position within the week.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

/// A two-hour teaching period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    First,
    Second,
    Third,
    Fourth,
}

impl Period {
    /// All periods in chronological order.
    pub const ALL: [Period; PERIODS_PER_DAY] = [
        Period::First,
        Period::Second,
        Period::Third,
        Period::Fourth,
    ];

    /// Zero-based position within the day.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wall-clock label.
    pub fn label(self) -> &'static str {
        match self {
            Period::First => "08:00-10:00",
            Period::Second => "10:00-12:00",
            Period::Third => "12:00-14:00",
            Period::Fourth => "14:00-16:00",
        }
    }

    /// Whether two periods are back-to-back on the same day.
    pub fn is_adjacent_to(self, other: Period) -> bool {
        self.index().abs_diff(other.index()) == 1
    }
}

/// One (day, period) cell of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Teaching day.
    pub day: Weekday,
    /// Teaching period.
    pub period: Period,
}

impl Slot {
    /// Creates a slot.
    pub fn new(day: Weekday, period: Period) -> Self {
        Self { day, period }
    }

    /// All slots in calendar order (Monday first period → Friday fourth).
    pub fn all() -> impl Iterator<Item = Slot> {
        Weekday::ALL.into_iter().flat_map(|day| {
            Period::ALL
                .into_iter()
                .map(move |period| Slot { day, period })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_order() {
        let indices: Vec<usize> = Weekday::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(Weekday::Monday.name(), "Monday");
    }

    #[test]
    fn test_period_adjacency() {
        assert!(Period::First.is_adjacent_to(Period::Second));
        assert!(Period::Third.is_adjacent_to(Period::Second));
        assert!(!Period::First.is_adjacent_to(Period::Third));
        assert!(!Period::Second.is_adjacent_to(Period::Second));
    }

    #[test]
    fn test_slot_enumeration() {
        let slots: Vec<Slot> = Slot::all().collect();
        assert_eq!(slots.len(), DAYS_PER_WEEK * PERIODS_PER_DAY);
        assert_eq!(slots[0], Slot::new(Weekday::Monday, Period::First));
        assert_eq!(slots[19], Slot::new(Weekday::Friday, Period::Fourth));
        // Strictly increasing in (day, period) order
        for pair in slots.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_slot_serde_roundtrip() {
        let slot = Slot::new(Weekday::Wednesday, Period::Third);
        let json = serde_json::to_string(&slot).unwrap();
        let back: Slot = serde_json::from_str(&json).unwrap();
        assert_eq!(slot, back);
    }
}
