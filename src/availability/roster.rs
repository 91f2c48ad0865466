//! In-memory roster oracle.
//!
//! Answers availability lookups from three sources held in memory:
//! - roster members with their skills and proficiency,
//! - an optional working [`Calendar`] per member,
//! - bookings taken from an event snapshot.
//!
//! Entities missing from the roster are treated as always working, so
//! `free_slots` for them only reflects their bookings, and they are never
//! offered as substitutes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{AvailabilityOracle, Calendar};
use crate::error::OracleError;
use crate::models::{merge_all, subtract_all, EntityRef, Event, TimeRange};

/// A skill with proficiency level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name (e.g., "sound", "lighting", "rigging").
    pub name: String,
    /// Proficiency level (0.0 to 1.0, where 1.0 = expert).
    pub level: f64,
}

impl Skill {
    /// Creates a new skill.
    pub fn new(name: impl Into<String>, level: f64) -> Self {
        Self {
            name: name.into(),
            level: level.clamp(0.0, 1.0),
        }
    }
}

/// An entity known to the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterMember {
    /// The entity itself.
    pub entity: EntityRef,
    /// Skills with proficiency levels.
    pub skills: Vec<Skill>,
    /// Working calendar (`None` = always available).
    pub calendar: Option<Calendar>,
}

impl RosterMember {
    /// Creates a member with no skills and no calendar.
    pub fn new(entity: EntityRef) -> Self {
        Self {
            entity,
            skills: Vec::new(),
            calendar: None,
        }
    }

    /// Adds a skill.
    pub fn with_skill(mut self, name: impl Into<String>, level: f64) -> Self {
        self.skills.push(Skill::new(name, level));
        self
    }

    /// Sets the working calendar.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Whether this member has a given skill.
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s.name == name)
    }

    /// Returns the proficiency level for a skill (0.0 if not found).
    pub fn skill_level(&self, name: &str) -> f64 {
        self.skills
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.level)
            .unwrap_or(0.0)
    }

    fn working_within(&self, range: &TimeRange) -> Vec<TimeRange> {
        match &self.calendar {
            None => vec![*range],
            Some(cal) => cal.free_within(range),
        }
    }
}

/// A busy period, tagged with the event that holds it when known.
#[derive(Debug, Clone)]
struct Booking {
    event_id: Option<String>,
    range: TimeRange,
}

/// Availability oracle backed by an in-memory roster.
#[derive(Debug, Clone, Default)]
pub struct RosterOracle {
    members: BTreeMap<String, RosterMember>,
    bookings: HashMap<String, Vec<Booking>>,
}

impl RosterOracle {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a member.
    pub fn with_member(mut self, member: RosterMember) -> Self {
        self.members.insert(member.entity.id.clone(), member);
        self
    }

    /// Books every assigned entity of every event for the event's range.
    pub fn with_bookings(mut self, events: &[Event]) -> Self {
        for event in events {
            for entity in &event.assigned {
                self.push_booking(&entity.id, Some(&event.id), event.range);
            }
        }
        self
    }

    /// Books `entity_id` for `range` (leave, maintenance, outside work).
    pub fn add_booking(&mut self, entity_id: &str, range: TimeRange) {
        self.push_booking(entity_id, None, range);
    }

    fn push_booking(&mut self, entity_id: &str, event_id: Option<&str>, range: TimeRange) {
        self.bookings
            .entry(entity_id.to_string())
            .or_default()
            .push(Booking {
                event_id: event_id.map(str::to_string),
                range,
            });
    }

    /// Looks up a member.
    pub fn member(&self, entity_id: &str) -> Option<&RosterMember> {
        self.members.get(entity_id)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Busy ranges of `entity_id`, minus those held by `released`.
    fn busy(&self, entity_id: &str, released: Option<&str>) -> Vec<TimeRange> {
        self.bookings
            .get(entity_id)
            .into_iter()
            .flatten()
            .filter(|b| released.is_none() || b.event_id.as_deref() != released)
            .map(|b| b.range)
            .collect()
    }

    fn free_for(
        &self,
        entity_id: &str,
        range: &TimeRange,
        released: Option<&str>,
    ) -> Vec<TimeRange> {
        let working = match self.members.get(entity_id) {
            Some(member) => member.working_within(range),
            None => vec![*range],
        };
        subtract_all(merge_all(working), &self.busy(entity_id, released))
    }
}

impl AvailabilityOracle for RosterOracle {
    fn free_slots(
        &self,
        entity: &EntityRef,
        around: &TimeRange,
    ) -> Result<Vec<TimeRange>, OracleError> {
        Ok(self.free_for(&entity.id, around, None))
    }

    fn free_slots_excluding(
        &self,
        entity: &EntityRef,
        around: &TimeRange,
        event_id: &str,
    ) -> Result<Vec<TimeRange>, OracleError> {
        Ok(self.free_for(&entity.id, around, Some(event_id)))
    }

    fn substitutes(
        &self,
        entity: &EntityRef,
        skill: Option<&str>,
        during: &TimeRange,
    ) -> Result<Vec<EntityRef>, OracleError> {
        let mut candidates: Vec<&RosterMember> = self
            .members
            .values()
            .filter(|m| m.entity.id != entity.id && m.entity.kind == entity.kind)
            .filter(|m| skill.map_or(true, |s| m.has_skill(s)))
            .filter(|m| self.free_for(&m.entity.id, during, None).first() == Some(during))
            .collect();

        if let Some(s) = skill {
            candidates.sort_by(|a, b| {
                b.skill_level(s)
                    .total_cmp(&a.skill_level(s))
                    .then_with(|| a.entity.id.cmp(&b.entity.id))
            });
        }

        Ok(candidates.into_iter().map(|m| m.entity.clone()).collect())
    }
}
