//! Availability oracle capability.

use crate::error::OracleError;
use crate::models::{EntityRef, TimeRange};

/// Caller-supplied availability lookups used by resolution generation.
///
/// Implementations may block (a database or planning-service call);
/// timeouts and cancellation are theirs to handle and should surface as
/// [`OracleError`] values rather than panics.
pub trait AvailabilityOracle: Send + Sync {
    /// Free time for `entity` within `around`, as non-overlapping ranges.
    fn free_slots(
        &self,
        entity: &EntityRef,
        around: &TimeRange,
    ) -> Result<Vec<TimeRange>, OracleError>;

    /// Like [`free_slots`](Self::free_slots), with the booking that event
    /// `event_id` holds on `entity` treated as released.
    ///
    /// Asked when that event is the one being moved. The default ignores
    /// `event_id`; oracles that know which event a booking belongs to
    /// should override it.
    fn free_slots_excluding(
        &self,
        entity: &EntityRef,
        around: &TimeRange,
        event_id: &str,
    ) -> Result<Vec<TimeRange>, OracleError> {
        let _ = event_id;
        self.free_slots(entity, around)
    }

    /// Entities able to stand in for `entity` for the whole of `during`.
    ///
    /// `skill` is the specialty the event requires, when known.
    fn substitutes(
        &self,
        entity: &EntityRef,
        skill: Option<&str>,
        during: &TimeRange,
    ) -> Result<Vec<EntityRef>, OracleError>;
}

impl<T: AvailabilityOracle + ?Sized> AvailabilityOracle for &T {
    fn free_slots(
        &self,
        entity: &EntityRef,
        around: &TimeRange,
    ) -> Result<Vec<TimeRange>, OracleError> {
        (**self).free_slots(entity, around)
    }

    fn free_slots_excluding(
        &self,
        entity: &EntityRef,
        around: &TimeRange,
        event_id: &str,
    ) -> Result<Vec<TimeRange>, OracleError> {
        (**self).free_slots_excluding(entity, around, event_id)
    }

    fn substitutes(
        &self,
        entity: &EntityRef,
        skill: Option<&str>,
        during: &TimeRange,
    ) -> Result<Vec<EntityRef>, OracleError> {
        (**self).substitutes(entity, skill, during)
    }
}
