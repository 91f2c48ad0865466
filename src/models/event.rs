//! Scheduled event model.
//!
//! An event is a time-boxed piece of work (an installation, a delivery,
//! a maintenance visit) with the set of entities assigned to it.
//!
//! # Ownership
//! Events belong to the caller's event store. Detection borrows a snapshot
//! and never mutates it; conflicts carry their own clones.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{EntityRef, TimeRange};
use crate::error::ModelError;

/// A scheduled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// When the event takes place.
    pub range: TimeRange,
    /// Event category (installation, delivery, maintenance, ...).
    pub category: String,
    /// Skill the event requires, used when looking for substitutes.
    pub specialty: Option<String>,
    /// Business priority (higher = more important).
    pub priority: i32,
    /// Entities booked for the event, ordered by id.
    pub assigned: BTreeSet<EntityRef>,
}

impl Event {
    /// Creates an event with no title and no assignments.
    pub fn new(id: impl Into<String>, range: TimeRange) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            range,
            category: String::new(),
            specialty: None,
            priority: 0,
            assigned: BTreeSet::new(),
        }
    }

    /// Creates an event from raw bounds (ms), validating the range.
    pub fn between(id: impl Into<String>, start_ms: i64, end_ms: i64) -> Result<Self, ModelError> {
        Ok(Self::new(id, TimeRange::new(start_ms, end_ms)?))
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the required specialty.
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Assigns an entity. Re-assigning the same id keeps the first ref.
    pub fn with_entity(mut self, entity: EntityRef) -> Self {
        self.assigned.insert(entity);
        self
    }

    /// Assigns several entities.
    pub fn with_entities(mut self, entities: impl IntoIterator<Item = EntityRef>) -> Self {
        self.assigned.extend(entities);
        self
    }

    /// Event start (ms).
    #[inline]
    pub fn start_ms(&self) -> i64 {
        self.range.start_ms()
    }

    /// Event end (ms, exclusive).
    #[inline]
    pub fn end_ms(&self) -> i64 {
        self.range.end_ms()
    }

    /// Event length (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.range.duration_ms()
    }

    /// Whether the entity with `entity_id` is assigned.
    pub fn is_assigned(&self, entity_id: &str) -> bool {
        self.assigned.iter().any(|e| e.id == entity_id)
    }

    /// Display label: the title if set, otherwise the id.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}
