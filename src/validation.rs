//! Input validation for event snapshots.
//!
//! Checks structural integrity of an event set before detection. Detects:
//! - Empty event IDs
//! - Duplicate event IDs
//! - Empty entity IDs
//!
//! Detection does not require a validated snapshot; duplicate-id pairs are
//! skipped there with a warning. Run this first to report them to the user.

use crate::models::Event;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An event has an empty ID.
    EmptyEventId,
    /// Two events share the same ID.
    DuplicateEventId,
    /// An assigned entity has an empty ID.
    EmptyEntityId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an event snapshot.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_events(events: &[Event]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for (pos, event) in events.iter().enumerate() {
        if event.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyEventId,
                format!("Event at position {pos} has an empty ID"),
            ));
        } else if !ids.insert(event.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEventId,
                format!("Duplicate event ID: {}", event.id),
            ));
        }

        if event.assigned.iter().any(|e| e.id.trim().is_empty()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyEntityId,
                format!("Event '{}' has an entity with an empty ID", event.label()),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityRef;

    fn ev(id: &str, start: i64, end: i64) -> Event {
        Event::between(id, start, end)
            .unwrap()
            .with_entity(EntityRef::personnel("T1"))
    }

    #[test]
    fn test_valid_input() {
        let events = vec![ev("A", 0, 10), ev("B", 5, 15)];
        assert!(validate_events(&events).is_ok());
        assert!(validate_events(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_event_id() {
        let events = vec![ev("A", 0, 10), ev("A", 20, 30)];
        let errors = validate_events(&events).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateEventId);
        assert!(errors[0].message.contains('A'));
    }

    #[test]
    fn test_empty_event_id() {
        let events = vec![ev("", 0, 10), ev("  ", 0, 10)];
        let errors = validate_events(&events).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::EmptyEventId));
    }

    #[test]
    fn test_empty_entity_id() {
        let events = vec![ev("A", 0, 10).with_entity(EntityRef::vehicle(""))];
        let errors = validate_events(&events).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyEntityId));
    }

    #[test]
    fn test_multiple_errors() {
        let events = vec![
            ev("A", 0, 10),
            ev("A", 0, 10),
            ev("", 0, 10).with_entity(EntityRef::room("")),
        ];
        let errors = validate_events(&events).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
