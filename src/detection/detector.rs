//! Conflict detector.
//!
//! # Algorithm
//!
//! 1. Build an [`IntervalIndex`] over the snapshot and sweep it for
//!    time-overlapping pairs.
//! 2. For each pair, intersect the assigned entity sets by id. An empty
//!    intersection means nothing is double-booked and the pair is dropped.
//! 3. Classify the surviving pairs and emit one [`Conflict`] per pair,
//!    carrying every shared entity.
//! 4. Sort: severity desc, overlap desc, then `event_a.id`, `event_b.id`.
//!
//! Entity ids that the caller's store does not know about take part like
//! any other id; referential checks belong to the store.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use super::index::IntervalIndex;
use super::report::ConflictReport;
use super::severity::classify;
use crate::config::DetectorConfig;
use crate::error::ConfigError;
use crate::models::{Conflict, EntityRef, Event};

/// Finds double-bookings in an event snapshot.
///
/// # Example
///
/// ```
/// use u_conflict::detection::ConflictDetector;
/// use u_conflict::models::{EntityRef, Event, Severity};
///
/// let hour = 3_600_000;
/// let events = vec![
///     Event::between("A", 9 * hour, 11 * hour).unwrap()
///         .with_entity(EntityRef::personnel("T1")),
///     Event::between("B", 10 * hour, 12 * hour).unwrap()
///         .with_entity(EntityRef::personnel("T1")),
/// ];
///
/// let conflicts = ConflictDetector::default().detect(&events);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].overlap_minutes(), 60);
/// assert_eq!(conflicts[0].severity(), Severity::High);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    config: DetectorConfig,
}

impl ConflictDetector {
    /// Creates a detector with the given thresholds.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Creates a detector after validating the thresholds.
    pub fn try_new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active thresholds.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detects every conflict in `events`.
    pub fn detect(&self, events: &[Event]) -> Vec<Conflict> {
        if events.is_empty() {
            return Vec::new();
        }

        let index = IntervalIndex::build(events);
        let pairs = index.query_overlaps();

        let mut conflicts: Vec<Conflict> = pairs
            .iter()
            .filter_map(|&(a, b)| self.evaluate_pair(a, b))
            .collect();
        sort_conflicts(&mut conflicts);

        debug!(
            events = events.len(),
            overlapping_pairs = pairs.len(),
            conflicts = conflicts.len(),
            "conflict detection complete"
        );
        conflicts
    }

    /// Conflicts that `candidate` would introduce into `existing`.
    ///
    /// Existing events sharing the candidate's id are treated as the
    /// candidate's previous version and ignored.
    pub fn detect_against(&self, candidate: &Event, existing: &[Event]) -> Vec<Conflict> {
        let index = IntervalIndex::build(existing);
        let mut conflicts: Vec<Conflict> = index
            .overlapping(&candidate.range)
            .into_iter()
            .filter(|other| other.id != candidate.id)
            .filter_map(|other| {
                let (a, b) = orient(candidate, other);
                self.evaluate_pair(a, b)
            })
            .collect();
        sort_conflicts(&mut conflicts);

        debug!(
            candidate = %candidate.id,
            existing = existing.len(),
            conflicts = conflicts.len(),
            "candidate conflict check complete"
        );
        conflicts
    }

    /// Detects conflicts and aggregates them into a report.
    pub fn report(&self, events: &[Event]) -> ConflictReport {
        ConflictReport::new(self.detect(events), events.len())
    }

    /// Builds a conflict for an overlapping pair, if any entity is shared.
    fn evaluate_pair(&self, a: &Event, b: &Event) -> Option<Conflict> {
        if a.id == b.id {
            warn!(event_id = %a.id, "skipping pair of events with the same id");
            return None;
        }

        let shared = shared_entities(a, b);
        if shared.is_empty() {
            trace!(a = %a.id, b = %b.id, "overlap without shared entities");
            return None;
        }

        let overlap = a.range.overlap_duration(&b.range);
        if overlap <= 0 {
            return None;
        }

        let severity = classify(overlap, a, b, &shared, &self.config);
        Some(Conflict::new(a.clone(), b.clone(), shared, overlap, severity))
    }
}

/// Detects every conflict in `events` using `config`.
pub fn detect(events: &[Event], config: &DetectorConfig) -> Vec<Conflict> {
    ConflictDetector::new(config.clone()).detect(events)
}

/// Entities assigned to both events, compared by id.
///
/// When the two events disagree on an entity's criticality the higher
/// tier is kept, so the result does not depend on argument order.
pub fn shared_entities(a: &Event, b: &Event) -> BTreeSet<EntityRef> {
    a.assigned
        .iter()
        .filter_map(|ea| {
            b.assigned.get(ea).map(|eb| {
                let mut merged = ea.clone();
                merged.criticality = ea.criticality.max(eb.criticality);
                merged
            })
        })
        .collect()
}

/// Sorts conflicts into report order.
pub fn sort_conflicts(conflicts: &mut [Conflict]) {
    conflicts.sort_by(compare_conflicts);
}

fn compare_conflicts(x: &Conflict, y: &Conflict) -> Ordering {
    y.severity()
        .cmp(&x.severity())
        .then_with(|| y.overlap_ms().cmp(&x.overlap_ms()))
        .then_with(|| x.event_a().id.cmp(&y.event_a().id))
        .then_with(|| x.event_b().id.cmp(&y.event_b().id))
}

/// Orders a pair the way the interval index does: by start, then id.
fn orient<'e>(x: &'e Event, y: &'e Event) -> (&'e Event, &'e Event) {
    let x_first = (x.start_ms(), &x.id, x.end_ms()) <= (y.start_ms(), &y.id, y.end_ms());
    if x_first {
        (x, y)
    } else {
        (y, x)
    }
}
