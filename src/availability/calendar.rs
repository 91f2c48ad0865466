//! Entity working calendars.
//!
//! Defines availability patterns: working hours, shifts, and blocked
//! periods (leave, maintenance, holidays).
//!
//! # Precedence
//! Blocked periods override time windows. A sub-range is free iff:
//! - It lies within a `time_windows` entry (or none are defined), AND
//! - It does NOT intersect any `blocked_periods` entry.

use serde::{Deserialize, Serialize};

use crate::models::{intersect_all, merge_all, subtract_all, TimeRange};

/// Entity availability calendar.
///
/// If no time windows are defined, the entity is always available
/// (subject to blocked periods).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calendar {
    /// Calendar identifier.
    pub id: String,
    /// Periods when the entity is available. Empty = always available.
    pub time_windows: Vec<TimeRange>,
    /// Periods when the entity is unavailable (overrides time_windows).
    pub blocked_periods: Vec<TimeRange>,
}

impl Calendar {
    /// Creates an empty calendar (no constraints = always available).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            time_windows: Vec::new(),
            blocked_periods: Vec::new(),
        }
    }

    /// Adds an availability window.
    pub fn with_window(mut self, window: TimeRange) -> Self {
        self.time_windows.push(window);
        self
    }

    /// Adds a blocked period.
    pub fn with_blocked(mut self, period: TimeRange) -> Self {
        self.blocked_periods.push(period);
        self
    }

    /// Working sub-ranges of `range`, sorted and non-overlapping.
    pub fn free_within(&self, range: &TimeRange) -> Vec<TimeRange> {
        let open = if self.time_windows.is_empty() {
            vec![*range]
        } else {
            intersect_all(&[*range], &merge_all(self.time_windows.clone()))
        };
        subtract_all(open, &self.blocked_periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: i64, end: i64) -> TimeRange {
        TimeRange::new(start, end).unwrap()
    }

    #[test]
    fn test_no_windows_means_always_open() {
        let cal = Calendar::new("cal1");
        assert_eq!(cal.free_within(&r(0, 1_000)), vec![r(0, 1_000)]);

        let on_leave = Calendar::new("cal2").with_blocked(r(20_000, 30_000));
        assert_eq!(
            on_leave.free_within(&r(0, 50_000)),
            vec![r(0, 20_000), r(30_000, 50_000)]
        );
    }

    #[test]
    fn test_shift_windows() {
        let cal = Calendar::new("shifts")
            .with_window(r(0, 8_000)) // day shift
            .with_window(r(16_000, 24_000)); // night shift

        assert_eq!(
            cal.free_within(&r(4_000, 20_000)),
            vec![r(4_000, 8_000), r(16_000, 20_000)]
        );
        assert!(cal.free_within(&r(10_000, 12_000)).is_empty());
    }

    #[test]
    fn test_blocked_overrides_window() {
        let cal = Calendar::new("cal")
            .with_window(r(0, 100_000))
            .with_blocked(r(50_000, 60_000)); // leave

        assert_eq!(
            cal.free_within(&r(40_000, 70_000)),
            vec![r(40_000, 50_000), r(60_000, 70_000)]
        );
        assert_eq!(cal.free_within(&r(60_000, 70_000)), vec![r(60_000, 70_000)]);
    }

    #[test]
    fn test_free_within() {
        let cal = Calendar::new("cal")
            .with_window(r(0, 8_000))
            .with_window(r(6_000, 10_000)) // overlapping windows merge
            .with_window(r(16_000, 24_000))
            .with_blocked(r(2_000, 3_000));

        assert_eq!(
            cal.free_within(&r(1_000, 20_000)),
            vec![r(1_000, 2_000), r(3_000, 10_000), r(16_000, 20_000)]
        );
    }
}
