//! Conflict and severity models.
//!
//! A conflict records that two events overlapping in time book at least
//! one common entity. Conflicts are produced by the detector only and
//! are read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{EntityRef, Event, TimeRange};

/// How disruptive a conflict is.
///
/// Totally ordered: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All tiers, least severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];
}

/// A double-booking of one or more entities across two events.
///
/// `event_a` is the earlier-starting event (ties broken by id), so the
/// orientation of a conflict does not depend on input order.
#[derive(Debug, Clone, Serialize)]
pub struct Conflict {
    event_a: Event,
    event_b: Event,
    shared_entities: BTreeSet<EntityRef>,
    overlap_ms: i64,
    severity: Severity,
}

impl Conflict {
    /// Builds a conflict. Callers guarantee a non-empty shared set,
    /// a positive overlap and distinct event ids.
    pub(crate) fn new(
        event_a: Event,
        event_b: Event,
        shared_entities: BTreeSet<EntityRef>,
        overlap_ms: i64,
        severity: Severity,
    ) -> Self {
        debug_assert!(!shared_entities.is_empty());
        debug_assert!(overlap_ms > 0);
        debug_assert_ne!(event_a.id, event_b.id);
        Self {
            event_a,
            event_b,
            shared_entities,
            overlap_ms,
            severity,
        }
    }

    /// The earlier-starting event.
    pub fn event_a(&self) -> &Event {
        &self.event_a
    }

    /// The later-starting event.
    pub fn event_b(&self) -> &Event {
        &self.event_b
    }

    /// Entities booked by both events (never empty).
    pub fn shared_entities(&self) -> &BTreeSet<EntityRef> {
        &self.shared_entities
    }

    /// Overlap duration (ms, always positive).
    pub fn overlap_ms(&self) -> i64 {
        self.overlap_ms
    }

    /// Overlap duration in whole minutes.
    pub fn overlap_minutes(&self) -> i64 {
        self.overlap_ms / super::MINUTE_MS
    }

    /// Severity tier.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The time window during which both events run.
    pub fn overlap_window(&self) -> TimeRange {
        // Both ranges overlap by construction.
        self.event_a
            .range
            .intersection(&self.event_b.range)
            .unwrap_or(self.event_b.range)
    }

    /// Whether this conflict involves the event with `event_id`.
    pub fn involves(&self, event_id: &str) -> bool {
        self.event_a.id == event_id || self.event_b.id == event_id
    }

    /// Whether this conflict double-books the entity with `entity_id`.
    pub fn shares_entity(&self, entity_id: &str) -> bool {
        self.shared_entities.iter().any(|e| e.id == entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Conflict {
        let a = Event::between("A", 0, 120).unwrap();
        let b = Event::between("B", 60, 180).unwrap();
        let shared: BTreeSet<EntityRef> = [EntityRef::personnel("T1")].into_iter().collect();
        Conflict::new(a, b, shared, 60, Severity::High)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        let mut tiers = vec![Severity::High, Severity::Low, Severity::Critical, Severity::Medium];
        tiers.sort();
        assert_eq!(tiers, Severity::ALL.to_vec());
    }

    #[test]
    fn test_conflict_accessors() {
        let c = sample();
        assert_eq!(c.event_a().id, "A");
        assert_eq!(c.event_b().id, "B");
        assert_eq!(c.overlap_ms(), 60);
        assert_eq!(c.severity(), Severity::High);
        assert_eq!(c.overlap_window(), TimeRange::new(60, 120).unwrap());
        assert!(c.involves("A"));
        assert!(!c.involves("C"));
        assert!(c.shares_entity("T1"));
        assert!(!c.shares_entity("T2"));
    }

    #[test]
    fn test_overlap_minutes() {
        let a = Event::between("A", 0, 7_200_000).unwrap();
        let b = Event::between("B", 3_600_000, 10_800_000).unwrap();
        let shared: BTreeSet<EntityRef> = [EntityRef::personnel("T1")].into_iter().collect();
        let c = Conflict::new(a, b, shared, 3_600_000, Severity::High);
        assert_eq!(c.overlap_minutes(), 60);
    }
}
