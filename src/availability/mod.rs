//! Availability lookups for resolution generation.
//!
//! The generator only depends on the [`AvailabilityOracle`] trait; how
//! availability is computed is up to the caller. [`RosterOracle`] is a
//! ready-made in-memory implementation built from working calendars,
//! skills and an event snapshot.

mod calendar;
mod oracle;
mod roster;

pub use calendar::Calendar;
pub use oracle::AvailabilityOracle;
pub use roster::{RosterMember, RosterOracle, Skill};
