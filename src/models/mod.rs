//! Conflict detection domain models.
//!
//! Immutable value types shared by every other module: time ranges,
//! entity references, events, and the conflicts and resolutions derived
//! from them.
//!
//! # Domain Mappings
//!
//! | u-conflict | Field service | Events & staging | Fleet |
//! |------------|---------------|------------------|-------|
//! | Event | Intervention | Show / rehearsal | Delivery run |
//! | EntityRef | Technician | Stage / crew member | Truck / driver |
//! | Conflict | Double-booked tech | Double-booked stage | Double-booked truck |

mod conflict;
mod entity;
mod event;
mod resolution;
mod time_range;

pub use conflict::{Conflict, Severity};
pub use entity::{Criticality, EntityKind, EntityRef};
pub use event::Event;
pub use resolution::{Resolution, ResolutionKind, ResolutionParams};
pub use time_range::{intersect_all, merge_all, subtract_all, TimeRange, MINUTE_MS};
