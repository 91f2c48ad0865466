//! Resolution (candidate fix) model.
//!
//! Resolutions are proposals only: applying one is the caller's job.

use serde::Serialize;

use super::{EntityRef, TimeRange};

/// What kind of change a resolution proposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolutionKind {
    /// Move the earlier-starting event.
    RescheduleA,
    /// Move the later-starting event.
    RescheduleB,
    /// Replace a double-booked entity with the given substitute.
    ReassignEntity(EntityRef),
    /// Split an event into two parts around the other event.
    SplitEvent,
}

/// Concrete parameters of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolutionParams {
    /// Move `event_id` from `from` to `to`.
    Reschedule {
        event_id: String,
        from: TimeRange,
        to: TimeRange,
    },
    /// On `event_id`, book `substitute` instead of `replaced`.
    Reassign {
        event_id: String,
        replaced: EntityRef,
        substitute: EntityRef,
    },
    /// Replace `event_id` with two sub-events.
    Split {
        event_id: String,
        first: TimeRange,
        second: TimeRange,
    },
}

/// A candidate resolution for one conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    kind: ResolutionKind,
    title: String,
    description: String,
    params: ResolutionParams,
}

impl Resolution {
    pub(crate) fn new(
        kind: ResolutionKind,
        title: impl Into<String>,
        description: impl Into<String>,
        params: ResolutionParams,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            params,
        }
    }

    /// Resolution kind.
    pub fn kind(&self) -> &ResolutionKind {
        &self.kind
    }

    /// Short human-readable title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Longer human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Typed parameters for applying the resolution.
    pub fn params(&self) -> &ResolutionParams {
        &self.params
    }

    /// The event this resolution would modify.
    pub fn target_event_id(&self) -> &str {
        match &self.params {
            ResolutionParams::Reschedule { event_id, .. }
            | ResolutionParams::Reassign { event_id, .. }
            | ResolutionParams::Split { event_id, .. } => event_id,
        }
    }
}
