//! Human-readable labels for conflicts and resolutions.
//!
//! The core types stay label-free; everything a planning screen prints
//! is produced here.

use chrono::DateTime;
use std::fmt;

use crate::models::{Conflict, EntityKind, ResolutionKind, Severity, TimeRange, MINUTE_MS};

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(severity_label(*self))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(kind_label(self))
    }
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RescheduleA => f.write_str("Reschedule first event"),
            Self::RescheduleB => f.write_str("Reschedule second event"),
            Self::ReassignEntity(e) => write!(f, "Reassign to {}", e.label()),
            Self::SplitEvent => f.write_str("Split event"),
        }
    }
}

/// Display label for a severity tier.
pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Critical",
        Severity::High => "High",
        Severity::Medium => "Medium",
        Severity::Low => "Low",
    }
}

/// Display label for an entity kind.
pub fn kind_label(kind: &EntityKind) -> &str {
    match kind {
        EntityKind::Personnel => "Technician",
        EntityKind::Vehicle => "Vehicle",
        EntityKind::Room => "Room",
        EntityKind::Equipment => "Equipment",
        EntityKind::Custom(name) => name,
    }
}

/// Renders an epoch-millisecond instant as `HH:MM` (UTC).
pub fn format_clock(time_ms: i64) -> String {
    DateTime::from_timestamp_millis(time_ms)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| time_ms.to_string())
}

/// Renders a range as `HH:MM–HH:MM` (UTC).
pub fn format_range(range: &TimeRange) -> String {
    format!(
        "{}–{}",
        format_clock(range.start_ms()),
        format_clock(range.end_ms())
    )
}

/// Renders a duration as `1h30`, `45 min`, or `2h`.
///
/// Partial minutes round up, so a positive duration never shows as `0 min`.
pub fn format_duration(duration_ms: i64) -> String {
    let minutes = duration_ms / MINUTE_MS + i64::from(duration_ms % MINUTE_MS > 0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m:02}"),
    }
}

/// One-line description of a conflict.
pub fn describe_conflict(conflict: &Conflict) -> String {
    let entities: Vec<&str> = conflict
        .shared_entities()
        .iter()
        .map(|e| e.label())
        .collect();
    format!(
        "Conflict between '{}' and '{}': {} double-booked for {} ({}, {})",
        conflict.event_a().label(),
        conflict.event_b().label(),
        entities.join(", "),
        format_duration(conflict.overlap_ms()),
        format_range(&conflict.overlap_window()),
        conflict.severity(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ConflictDetector;
    use crate::models::{EntityRef, Event};

    const H: i64 = 3_600_000;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(14 * H), "14:00");
        assert_eq!(format_clock(9 * H + 30 * 60_000), "09:30");
        // next day wraps
        assert_eq!(format_clock(25 * H), "01:00");
    }

    #[test]
    fn test_format_range_and_duration() {
        let range = TimeRange::new(14 * H, 16 * H).unwrap();
        assert_eq!(format_range(&range), "14:00–16:00");
        assert_eq!(format_duration(45 * 60_000), "45 min");
        assert_eq!(format_duration(2 * H), "2h");
        assert_eq!(format_duration(H + 5 * 60_000), "1h05");
    }

    #[test]
    fn test_format_duration_rounds_up() {
        assert_eq!(format_duration(1), "1 min");
        assert_eq!(format_duration(30_000), "1 min");
        assert_eq!(format_duration(60_000), "1 min");
        assert_eq!(format_duration(59 * 60_000 + 1), "1h");
        assert_eq!(format_duration(0), "0 min");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Severity::Critical.to_string(), "Critical");
        assert_eq!(EntityKind::Personnel.to_string(), "Technician");
        assert_eq!(EntityKind::Custom("Crane".into()).to_string(), "Crane");
        let marie = EntityRef::personnel("T2").with_name("Marie");
        assert_eq!(
            ResolutionKind::ReassignEntity(marie).to_string(),
            "Reassign to Marie"
        );
    }

    #[test]
    fn test_describe_conflict() {
        let events = vec![
            Event::between("A", 9 * H, 11 * H)
                .unwrap()
                .with_title("Festival rigging")
                .with_entity(EntityRef::personnel("T1").with_name("Jean Dupont")),
            Event::between("B", 10 * H, 12 * H)
                .unwrap()
                .with_title("Theatre maintenance")
                .with_entity(EntityRef::personnel("T1")),
        ];
        let conflicts = ConflictDetector::default().detect(&events);
        assert_eq!(
            describe_conflict(&conflicts[0]),
            "Conflict between 'Festival rigging' and 'Theatre maintenance': \
             Jean Dupont double-booked for 1h (10:00–11:00, High)"
        );
    }
}
