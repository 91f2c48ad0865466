//! Conflict detection pipeline.
//!
//! Interval index → pairwise entity intersection → severity
//! classification → ordered report.
//!
//! # Usage
//!
//! ```
//! use u_conflict::config::DetectorConfig;
//! use u_conflict::detection::detect;
//! use u_conflict::models::{EntityRef, Event};
//!
//! let hour = 3_600_000;
//! let events = vec![
//!     Event::between("A", 9 * hour, 10 * hour).unwrap()
//!         .with_entity(EntityRef::personnel("T1")),
//!     Event::between("B", 10 * hour, 11 * hour).unwrap()
//!         .with_entity(EntityRef::personnel("T1")),
//! ];
//!
//! // Back-to-back events do not overlap.
//! assert!(detect(&events, &DetectorConfig::default()).is_empty());
//! ```
//!
//! # Sharding
//!
//! Detection is local to overlapping ranges, so a host may run it per
//! time window in parallel. Events crossing a window edge must be
//! included in both windows and the results de-duplicated by event pair.

mod detector;
mod index;
mod report;
mod severity;

pub use detector::{detect, shared_entities, sort_conflicts, ConflictDetector};
pub use index::IntervalIndex;
pub use report::{ConflictReport, ReportSummary};
pub use severity::classify;
