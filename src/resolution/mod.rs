//! Candidate resolutions for detected conflicts.
//!
//! Given one [`Conflict`](crate::models::Conflict) and an
//! [`AvailabilityOracle`](crate::availability::AvailabilityOracle), the
//! generator proposes ways to remove the double-booking: move one of the
//! events, hand a shared entity's work to a substitute, or split an event
//! around the other. Nothing is applied; the caller picks a candidate.

mod generator;

pub use generator::{propose, Proposals, ResolutionGenerator};
