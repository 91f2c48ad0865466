//! Scheduling conflict detection and resolution for the U-Engine ecosystem.
//!
//! Finds pairs of events that double-book a shared entity (a technician,
//! vehicle, room or piece of equipment), grades each conflict by severity,
//! and proposes candidate resolutions backed by an availability lookup.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeRange`, `EntityRef`, `Event`,
//!   `Conflict`, `Severity`, `Resolution`
//! - **`detection`**: Interval sweep, conflict detector, severity classifier,
//!   conflict report
//! - **`availability`**: `AvailabilityOracle` capability and the in-memory
//!   `RosterOracle`
//! - **`resolution`**: Candidate resolution generator
//! - **`presentation`**: Display labels and one-line descriptions
//! - **`validation`**: Snapshot integrity checks (empty or duplicate IDs)
//! - **`config`**: Detector and generator thresholds
//!
//! # Example
//!
//! ```
//! use u_conflict::detection::detect;
//! use u_conflict::config::DetectorConfig;
//! use u_conflict::models::{EntityRef, Event, Severity};
//!
//! let hour = 3_600_000;
//! let events = vec![
//!     Event::between("A", 9 * hour, 17 * hour)?.with_entity(EntityRef::personnel("T1")),
//!     Event::between("B", 10 * hour, 10 * hour + 15 * 60_000)?
//!         .with_entity(EntityRef::personnel("T1")),
//! ];
//!
//! let conflicts = detect(&events, &DetectorConfig::default());
//! assert_eq!(conflicts.len(), 1);
//! assert_eq!(conflicts[0].severity(), Severity::Critical);
//! # Ok::<(), u_conflict::ConflictError>(())
//! ```
//!
//! # References
//!
//! - Preparata & Shamos (1985), "Computational Geometry", Ch. 8 (sweep-line)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod availability;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod presentation;
pub mod resolution;
pub mod validation;

pub use error::{ConflictError, Result};
