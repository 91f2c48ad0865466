//! Entity references.
//!
//! An entity is a person or resource that can only be in one place at a
//! time: technicians, vehicles, rooms, equipment. Events reference
//! entities by [`EntityRef`]; identity is the `id` alone, so two refs
//! carrying different labels or criticality still denote the same entity.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A reference to a schedulable person or resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRef {
    /// Unique entity identifier.
    pub id: String,
    /// Entity classification.
    pub kind: EntityKind,
    /// How disruptive a double-booking of this entity is.
    #[serde(default)]
    pub criticality: Criticality,
    /// Human-readable label (falls back to `id` when absent).
    #[serde(default)]
    pub name: Option<String>,
}

/// Entity classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Technician, engineer, driver.
    Personnel,
    /// Truck, van, car.
    Vehicle,
    /// Room, stage, workshop bay.
    Room,
    /// Tooling or equipment that cannot be shared.
    Equipment,
    /// Domain-specific kind.
    Custom(String),
}

/// Criticality tier of an entity.
///
/// Ordered `Low < Normal < High`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criticality {
    Low,
    #[default]
    Normal,
    High,
}

impl EntityRef {
    /// Creates an entity reference with normal criticality.
    pub fn new(id: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            kind,
            criticality: Criticality::Normal,
            name: None,
        }
    }

    /// Creates a personnel reference.
    pub fn personnel(id: impl Into<String>) -> Self {
        Self::new(id, EntityKind::Personnel)
    }

    /// Creates a vehicle reference.
    pub fn vehicle(id: impl Into<String>) -> Self {
        Self::new(id, EntityKind::Vehicle)
    }

    /// Creates a room reference.
    pub fn room(id: impl Into<String>) -> Self {
        Self::new(id, EntityKind::Room)
    }

    /// Sets the criticality tier.
    pub fn with_criticality(mut self, criticality: Criticality) -> Self {
        self.criticality = criticality;
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Label for display: the name if set, otherwise the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether this entity is flagged as highly critical.
    #[inline]
    pub fn is_critical(&self) -> bool {
        self.criticality == Criticality::High
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityRef {}

impl Hash for EntityRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for EntityRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_identity_by_id() {
        let a = EntityRef::personnel("T1").with_name("Jean");
        let b = EntityRef::personnel("T1").with_criticality(Criticality::High);
        assert_eq!(a, b);

        let set: BTreeSet<EntityRef> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering_by_id() {
        let mut refs = vec![
            EntityRef::room("R2"),
            EntityRef::vehicle("V1"),
            EntityRef::personnel("A9"),
        ];
        refs.sort();
        let ids: Vec<&str> = refs.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["A9", "R2", "V1"]);
    }

    #[test]
    fn test_label_and_criticality() {
        let e = EntityRef::personnel("T1");
        assert_eq!(e.label(), "T1");
        assert_eq!(e.criticality, Criticality::Normal);
        assert!(!e.is_critical());

        let e = e.with_name("Marie Martin").with_criticality(Criticality::High);
        assert_eq!(e.label(), "Marie Martin");
        assert!(e.is_critical());
        assert!(Criticality::Low < Criticality::Normal);
        assert!(Criticality::Normal < Criticality::High);
    }

    #[test]
    fn test_deserialize_defaults() {
        let e: EntityRef = serde_json::from_str(r#"{"id":"V1","kind":"Vehicle"}"#).unwrap();
        assert_eq!(e.kind, EntityKind::Vehicle);
        assert_eq!(e.criticality, Criticality::Normal);
        assert!(e.name.is_none());
    }
}
