//! Severity classification.
//!
//! # Policy (first match wins)
//!
//! | Tier | Condition |
//! |------|-----------|
//! | Critical | overlap covers the whole shorter event, or a shared entity is highly critical |
//! | High | overlap ≥ `high_overlap_ratio` × shorter duration, or more than one shared entity |
//! | Medium | overlap ≥ `medium_overlap_minutes` |
//! | Low | anything else |
//!
//! Every condition is monotone in the overlap, so a longer overlap with
//! the same entities never lowers the tier.

use std::collections::BTreeSet;

use crate::config::DetectorConfig;
use crate::models::{EntityRef, Event, Severity};

/// Classifies a conflict between `a` and `b` overlapping for `overlap_ms`.
pub fn classify(
    overlap_ms: i64,
    a: &Event,
    b: &Event,
    shared: &BTreeSet<EntityRef>,
    config: &DetectorConfig,
) -> Severity {
    let shorter = a.duration_ms().min(b.duration_ms());

    if overlap_ms >= shorter || shared.iter().any(EntityRef::is_critical) {
        return Severity::Critical;
    }

    if overlap_ms as f64 >= config.high_overlap_ratio * shorter as f64 || shared.len() > 1 {
        return Severity::High;
    }

    if overlap_ms >= config.medium_overlap_ms() {
        return Severity::Medium;
    }

    Severity::Low
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Criticality, MINUTE_MS};

    const H: i64 = 60 * MINUTE_MS;

    fn ev(id: &str, start: i64, end: i64) -> Event {
        Event::between(id, start, end).unwrap()
    }

    fn shared(ids: &[&str]) -> BTreeSet<EntityRef> {
        ids.iter().map(|id| EntityRef::personnel(*id)).collect()
    }

    #[test]
    fn test_full_cover_is_critical() {
        let all_day = ev("A", 9 * H, 17 * H);
        let short = ev("B", 9 * H + 30 * MINUTE_MS, 9 * H + 45 * MINUTE_MS);
        let cfg = DetectorConfig::default();
        let sev = classify(15 * MINUTE_MS, &all_day, &short, &shared(&["T1"]), &cfg);
        assert_eq!(sev, Severity::Critical);
    }

    #[test]
    fn test_critical_entity() {
        let a = ev("A", 0, 4 * H);
        let b = ev("B", 4 * H - MINUTE_MS, 6 * H);
        let set: BTreeSet<EntityRef> = [EntityRef::room("R1").with_criticality(Criticality::High)]
            .into_iter()
            .collect();
        let cfg = DetectorConfig::default();
        assert_eq!(classify(MINUTE_MS, &a, &b, &set, &cfg), Severity::Critical);
    }

    #[test]
    fn test_half_overlap_is_high() {
        let a = ev("A", 9 * H, 11 * H);
        let b = ev("B", 10 * H, 12 * H);
        assert_eq!(
            classify(H, &a, &b, &shared(&["T1"]), &DetectorConfig::default()),
            Severity::High
        );
    }

    #[test]
    fn test_multiple_entities_is_high() {
        let a = ev("A", 0, 8 * H);
        let b = ev("B", 8 * H - 5 * MINUTE_MS, 16 * H);
        assert_eq!(
            classify(5 * MINUTE_MS, &a, &b, &shared(&["T1", "V1"]), &DetectorConfig::default()),
            Severity::High
        );
    }

    #[test]
    fn test_medium_and_low() {
        let a = ev("A", 0, 8 * H);
        let b = ev("B", 7 * H, 16 * H);
        let cfg = DetectorConfig::default();
        assert_eq!(classify(20 * MINUTE_MS, &a, &b, &shared(&["T1"]), &cfg), Severity::Medium);
        assert_eq!(classify(15 * MINUTE_MS, &a, &b, &shared(&["T1"]), &cfg), Severity::Medium);
        assert_eq!(classify(10 * MINUTE_MS, &a, &b, &shared(&["T1"]), &cfg), Severity::Low);
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let a = ev("A", 0, 8 * H);
        let b = ev("B", 7 * H, 16 * H);
        let strict = DetectorConfig::new()
            .with_high_overlap_ratio(0.1)
            .with_medium_overlap_minutes(5);
        // 60 min ≥ 10% of 8h
        assert_eq!(classify(H, &a, &b, &shared(&["T1"]), &strict), Severity::High);
        assert_eq!(classify(10 * MINUTE_MS, &a, &b, &shared(&["T1"]), &strict), Severity::Medium);
    }

    #[test]
    fn test_monotonic_in_overlap() {
        let a = ev("A", 0, 8 * H);
        let b = ev("B", 0, 6 * H);
        let cfg = DetectorConfig::default();
        let set = shared(&["T1"]);
        let mut last = Severity::Low;
        for minutes in 1..=(6 * 60) {
            let sev = classify(minutes * MINUTE_MS, &a, &b, &set, &cfg);
            assert!(sev >= last, "severity dropped at {minutes} min");
            last = sev;
        }
        assert_eq!(last, Severity::Critical);
    }
}
