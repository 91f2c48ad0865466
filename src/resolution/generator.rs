//! Candidate resolution synthesis.
//!
//! # Generation Order
//!
//! Each step only emits candidates that are feasible:
//!
//! 1. **Reschedule** the later-starting event, then the earlier one, into
//!    the free slot closest to its original start (all of its entities
//!    must be free and the slot must not overlap the other event).
//! 2. **Reassign** each shared entity on the later-starting event to a
//!    substitute of the same kind and at least the same criticality.
//! 3. **Split** an event that only partially overlaps into two parts
//!    bracketing the other event, preserving its total duration.
//!
//! An oracle failure drops only the candidates that depended on it; the
//! failure is returned alongside the remaining candidates.

use tracing::{debug, warn};

use crate::availability::AvailabilityOracle;
use crate::config::ResolutionConfig;
use crate::error::{ConfigError, OracleError};
use crate::models::{
    intersect_all, merge_all, subtract_all, Conflict, Event, Resolution, ResolutionKind,
    ResolutionParams, TimeRange,
};
use crate::presentation::{format_range, kind_label};

/// Candidates for one conflict plus any oracle failures met on the way.
#[derive(Debug, Clone, Default)]
pub struct Proposals {
    resolutions: Vec<Resolution>,
    failures: Vec<OracleError>,
}

impl Proposals {
    /// Candidates in generation order.
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// Oracle failures that suppressed some candidates.
    pub fn failures(&self) -> &[OracleError] {
        &self.failures
    }

    /// Whether no automatic resolution is available.
    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }

    /// Whether some lookups failed, so the list may be incomplete.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Consumes the proposals, returning the candidates.
    pub fn into_resolutions(self) -> Vec<Resolution> {
        self.resolutions
    }

    fn fail(&mut self, step: &str, error: OracleError) {
        warn!(
            step,
            entity = %error.entity_id(),
            error = %error,
            "availability lookup failed, skipping dependent resolutions"
        );
        self.failures.push(error);
    }
}

/// Produces candidate resolutions for conflicts.
///
/// # Example
///
/// ```
/// use u_conflict::availability::{RosterMember, RosterOracle};
/// use u_conflict::detection::ConflictDetector;
/// use u_conflict::models::{EntityRef, Event, ResolutionKind};
/// use u_conflict::resolution::ResolutionGenerator;
///
/// let hour = 3_600_000;
/// let events = vec![
///     Event::between("A", 9 * hour, 11 * hour).unwrap()
///         .with_entity(EntityRef::personnel("T1")),
///     Event::between("B", 10 * hour, 12 * hour).unwrap()
///         .with_entity(EntityRef::personnel("T1")),
/// ];
/// let oracle = RosterOracle::new()
///     .with_member(RosterMember::new(EntityRef::personnel("T2")))
///     .with_bookings(&events);
///
/// let conflicts = ConflictDetector::default().detect(&events);
/// let proposals = ResolutionGenerator::default().propose(&conflicts[0], &oracle);
/// assert!(proposals.resolutions().iter().any(|r| matches!(
///     r.kind(),
///     ResolutionKind::ReassignEntity(e) if e.id == "T2"
/// )));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResolutionGenerator {
    config: ResolutionConfig,
}

impl ResolutionGenerator {
    /// Creates a generator with the given settings.
    pub fn new(config: ResolutionConfig) -> Self {
        Self { config }
    }

    /// Creates a generator after validating the settings.
    pub fn try_new(config: ResolutionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active settings.
    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    /// Proposes resolutions for `conflict`, consulting `oracle`.
    pub fn propose<O>(&self, conflict: &Conflict, oracle: &O) -> Proposals
    where
        O: AvailabilityOracle + ?Sized,
    {
        let mut out = Proposals::default();
        let a = conflict.event_a();
        let b = conflict.event_b();

        for (kind, moved, other) in [
            (ResolutionKind::RescheduleB, b, a),
            (ResolutionKind::RescheduleA, a, b),
        ] {
            match self.find_slot(moved, other, oracle) {
                Ok(Some(to)) => out.resolutions.push(reschedule(kind, moved, other, to)),
                Ok(None) => {}
                Err(e) => out.fail("reschedule", e),
            }
        }

        self.reassign(conflict, oracle, &mut out);
        self.split(conflict, &mut out);

        debug!(
            event_a = %a.id,
            event_b = %b.id,
            candidates = out.resolutions.len(),
            failures = out.failures.len(),
            "resolution proposals generated"
        );
        out
    }

    /// Closest placement of `moved` where all its entities are free and
    /// it no longer overlaps `other`.
    ///
    /// The moved event's own bookings count as released, so the new slot
    /// may reuse part of the old one.
    fn find_slot<O>(
        &self,
        moved: &Event,
        other: &Event,
        oracle: &O,
    ) -> Result<Option<TimeRange>, OracleError>
    where
        O: AvailabilityOracle + ?Sized,
    {
        let around = moved.range.expanded(self.config.reschedule_search_ms());

        let mut free = vec![around];
        for entity in &moved.assigned {
            let slots = oracle.free_slots_excluding(entity, &around, &moved.id)?;
            free = intersect_all(&free, &merge_all(slots));
            if free.is_empty() {
                return Ok(None);
            }
        }
        let free = subtract_all(free, &[other.range]);

        let duration = moved.duration_ms();
        let original = moved.start_ms();
        let best = free
            .iter()
            .filter(|slot| slot.duration_ms() >= duration)
            .map(|slot| original.clamp(slot.start_ms(), slot.end_ms() - duration))
            .min_by_key(|&start| (start.abs_diff(original), start));

        Ok(best.and_then(|start| moved.range.shifted_to(start)))
    }

    fn reassign<O>(&self, conflict: &Conflict, oracle: &O, out: &mut Proposals)
    where
        O: AvailabilityOracle + ?Sized,
    {
        let a = conflict.event_a();
        let b = conflict.event_b();
        let skill = b.specialty.as_deref().or(a.specialty.as_deref());

        for entity in conflict.shared_entities() {
            let subs = match oracle.substitutes(entity, skill, &b.range) {
                Ok(subs) => subs,
                Err(e) => {
                    out.fail("reassign", e);
                    continue;
                }
            };

            let eligible = subs
                .into_iter()
                .filter(|s| s.id != entity.id && s.kind == entity.kind)
                .filter(|s| s.criticality >= entity.criticality)
                .filter(|s| !a.is_assigned(&s.id) && !b.is_assigned(&s.id))
                .take(self.config.max_substitutes_per_entity);

            for sub in eligible {
                let title = format!(
                    "Reassign {} {} to '{}', {}",
                    kind_label(&sub.kind),
                    sub.label(),
                    b.label(),
                    format_range(&b.range)
                );
                let description = format!(
                    "Replace {} with {} on '{}' so {} stays on '{}' only",
                    entity.label(),
                    sub.label(),
                    b.label(),
                    entity.label(),
                    a.label()
                );
                out.resolutions.push(Resolution::new(
                    ResolutionKind::ReassignEntity(sub.clone()),
                    title,
                    description,
                    ResolutionParams::Reassign {
                        event_id: b.id.clone(),
                        replaced: entity.clone(),
                        substitute: sub,
                    },
                ));
            }
        }
    }

    fn split(&self, conflict: &Conflict, out: &mut Proposals) {
        let a = conflict.event_a();
        let b = conflict.event_b();
        let min = self.config.min_splittable_ms();

        // Earlier event: keep the lead-in, run the rest after `b`.
        if a.start_ms() < b.start_ms() && a.duration_ms() > min {
            let first = TimeRange::new(a.start_ms(), b.start_ms());
            let rest = a.end_ms() - b.start_ms();
            let second = TimeRange::with_duration(b.end_ms(), rest);
            if let (Ok(first), Ok(second)) = (first, second) {
                out.resolutions.push(split(a, b, first, second));
            }
        }

        // Later event: keep the tail, run the rest before `a`.
        if b.end_ms() > a.end_ms() && b.duration_ms() > min {
            let second = TimeRange::new(a.end_ms(), b.end_ms());
            let first = a
                .start_ms()
                .checked_sub(conflict.overlap_ms())
                .and_then(|start| TimeRange::new(start, a.start_ms()).ok());
            if let (Some(first), Ok(second)) = (first, second) {
                out.resolutions.push(split(b, a, first, second));
            }
        }
    }
}

/// Proposes resolutions with the default settings.
pub fn propose<O>(conflict: &Conflict, oracle: &O) -> Proposals
where
    O: AvailabilityOracle + ?Sized,
{
    ResolutionGenerator::default().propose(conflict, oracle)
}

fn reschedule(kind: ResolutionKind, moved: &Event, other: &Event, to: TimeRange) -> Resolution {
    let title = format!("Move '{}' to {}", moved.label(), format_range(&to));
    let description = format!(
        "Move '{}' from {} to {} so it no longer overlaps '{}'",
        moved.label(),
        format_range(&moved.range),
        format_range(&to),
        other.label()
    );
    Resolution::new(
        kind,
        title,
        description,
        ResolutionParams::Reschedule {
            event_id: moved.id.clone(),
            from: moved.range,
            to,
        },
    )
}

fn split(target: &Event, other: &Event, first: TimeRange, second: TimeRange) -> Resolution {
    let title = format!("Split '{}' around '{}'", target.label(), other.label());
    let description = format!(
        "Run '{}' as {} and {} so it no longer overlaps '{}'",
        target.label(),
        format_range(&first),
        format_range(&second),
        other.label()
    );
    Resolution::new(
        ResolutionKind::SplitEvent,
        title,
        description,
        ResolutionParams::Split {
            event_id: target.id.clone(),
            first,
            second,
        },
    )
}
