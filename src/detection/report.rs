//! Aggregated detection output.
//!
//! Wraps the ordered conflict list with summary indicators a planning
//! screen typically shows next to it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Conflict count | Number of conflicting pairs |
//! | By severity | Count per tier |
//! | Total overlap | Sum of pairwise overlaps (ms) |
//! | Entity load | Conflicts each entity takes part in |
//! | Affected events | Distinct events involved in at least one conflict |

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Conflict, Severity};

/// Ordered conflicts plus summary indicators.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictReport {
    conflicts: Vec<Conflict>,
    summary: ReportSummary,
}

/// Summary indicators of a detection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Events in the snapshot.
    pub events_scanned: usize,
    /// Conflicting pairs.
    pub conflict_count: usize,
    /// Conflicts per tier (tiers with no conflicts are present with 0).
    pub by_severity: BTreeMap<Severity, usize>,
    /// Sum of overlaps (ms).
    pub total_overlap_ms: i64,
    /// Conflicts per entity id.
    pub entity_load: BTreeMap<String, usize>,
    /// Distinct events involved in a conflict.
    pub affected_events: usize,
}

impl ConflictReport {
    /// Builds a report from conflicts already in report order.
    pub fn new(conflicts: Vec<Conflict>, events_scanned: usize) -> Self {
        let mut by_severity: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|&s| (s, 0)).collect();
        let mut entity_load: BTreeMap<String, usize> = BTreeMap::new();
        let mut affected: BTreeSet<&str> = BTreeSet::new();
        let mut total_overlap_ms: i64 = 0;

        for c in &conflicts {
            *by_severity.entry(c.severity()).or_insert(0) += 1;
            total_overlap_ms = total_overlap_ms.saturating_add(c.overlap_ms());
            for e in c.shared_entities() {
                *entity_load.entry(e.id.clone()).or_insert(0) += 1;
            }
            affected.insert(&c.event_a().id);
            affected.insert(&c.event_b().id);
        }

        let summary = ReportSummary {
            events_scanned,
            conflict_count: conflicts.len(),
            by_severity,
            total_overlap_ms,
            entity_load,
            affected_events: affected.len(),
        };

        Self { conflicts, summary }
    }

    /// Conflicts in report order.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Consumes the report, returning the conflicts.
    pub fn into_conflicts(self) -> Vec<Conflict> {
        self.conflicts
    }

    /// Summary indicators.
    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    /// Whether no conflict was found.
    pub fn is_clear(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Most severe tier present, if any.
    pub fn highest_severity(&self) -> Option<Severity> {
        self.conflicts.iter().map(Conflict::severity).max()
    }

    /// Number of conflicts at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.summary.by_severity.get(&severity).copied().unwrap_or(0)
    }

    /// Conflicts involving the event with `event_id`.
    pub fn for_event(&self, event_id: &str) -> Vec<&Conflict> {
        self.conflicts.iter().filter(|c| c.involves(event_id)).collect()
    }

    /// Conflicts double-booking the entity with `entity_id`.
    pub fn for_entity(&self, entity_id: &str) -> Vec<&Conflict> {
        self.conflicts
            .iter()
            .filter(|c| c.shares_entity(entity_id))
            .collect()
    }

    /// Entity ids by descending conflict count (ties by id).
    pub fn most_contended(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut load: Vec<(&str, usize)> = self
            .summary
            .entity_load
            .iter()
            .map(|(id, n)| (id.as_str(), *n))
            .collect();
        load.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        load.truncate(limit);
        load
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ConflictDetector;
    use crate::models::{EntityRef, Event, MINUTE_MS};

    const H: i64 = 60 * MINUTE_MS;

    fn ev(id: &str, start: i64, end: i64, entities: &[&str]) -> Event {
        Event::between(id, start, end)
            .unwrap()
            .with_entities(entities.iter().map(|e| EntityRef::personnel(*e)))
    }

    fn sample_report() -> ConflictReport {
        let events = vec![
            ev("A", 9 * H, 11 * H, &["T1"]),
            ev("B", 10 * H, 12 * H, &["T1", "T2"]),
            ev("C", 11 * H + 30 * MINUTE_MS, 13 * H, &["T2"]),
            ev("D", 14 * H, 15 * H, &["T3"]),
        ];
        ConflictDetector::default().report(&events)
    }

    #[test]
    fn test_report_summary() {
        let report = sample_report();
        let s = report.summary();
        assert_eq!(s.events_scanned, 4);
        assert_eq!(s.conflict_count, 2);
        assert_eq!(s.total_overlap_ms, H + 30 * MINUTE_MS);
        assert_eq!(s.affected_events, 3);
        assert_eq!(s.entity_load["T1"], 1);
        assert_eq!(s.entity_load["T2"], 1);
        assert!(!s.entity_load.contains_key("T3"));
        assert_eq!(s.by_severity.len(), 4);
        assert_eq!(report.count(Severity::Critical), 0);
    }

    #[test]
    fn test_report_queries() {
        let report = sample_report();
        assert!(!report.is_clear());
        assert_eq!(report.highest_severity(), Some(Severity::High));
        assert_eq!(report.for_event("B").len(), 2);
        assert_eq!(report.for_event("D").len(), 0);
        assert_eq!(report.for_entity("T2").len(), 1);
        assert_eq!(report.most_contended(1), vec![("T1", 1)]);
    }

    #[test]
    fn test_empty_report() {
        let report = ConflictDetector::default().report(&[]);
        assert!(report.is_clear());
        assert_eq!(report.highest_severity(), None);
        assert_eq!(report.summary().conflict_count, 0);
        assert_eq!(report.count(Severity::Low), 0);
    }

    #[test]
    fn test_report_serializes() {
        let report = sample_report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["conflict_count"], 2);
        assert_eq!(json["conflicts"].as_array().map(Vec::len), Some(2));
    }
}
