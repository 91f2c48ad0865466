//! Half-open time ranges.
//!
//! # Time Model
//! All times are in milliseconds relative to a scheduling epoch.
//! The consumer defines what epoch means; the presentation adapter
//! renders them as UTC wall-clock times.
//!
//! # Semantics
//! A range `[start, end)` includes its start and excludes its end, so
//! back-to-back ranges (`a.end == b.start`) never overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ModelError;

/// Milliseconds in one minute.
pub const MINUTE_MS: i64 = 60_000;

/// A validated time interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct TimeRange {
    start_ms: i64,
    end_ms: i64,
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    start_ms: i64,
    end_ms: i64,
}

impl TryFrom<RawRange> for TimeRange {
    type Error = ModelError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.start_ms, raw.end_ms)
    }
}

impl From<TimeRange> for RawRange {
    fn from(range: TimeRange) -> Self {
        Self {
            start_ms: range.start_ms,
            end_ms: range.end_ms,
        }
    }
}

impl TimeRange {
    /// Creates a range, rejecting empty or inverted bounds.
    ///
    /// The length must also fit in an `i64`, so `[i64::MIN, i64::MAX)` is
    /// rejected.
    pub fn new(start_ms: i64, end_ms: i64) -> Result<Self, ModelError> {
        if start_ms >= end_ms || end_ms.checked_sub(start_ms).is_none() {
            return Err(ModelError::InvalidRange { start_ms, end_ms });
        }
        Ok(Self { start_ms, end_ms })
    }

    /// Creates a range from a start and a positive length.
    pub fn with_duration(start_ms: i64, duration_ms: i64) -> Result<Self, ModelError> {
        match start_ms.checked_add(duration_ms) {
            Some(end_ms) => Self::new(start_ms, end_ms),
            None => Err(ModelError::InvalidRange {
                start_ms,
                end_ms: i64::MAX,
            }),
        }
    }

    /// Range start (ms, inclusive).
    #[inline]
    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    /// Range end (ms, exclusive).
    #[inline]
    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    /// Length of the range (ms). Always positive.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether a timestamp falls within this range.
    #[inline]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start_ms && time_ms < self.end_ms
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains_range(&self, other: &Self) -> bool {
        self.start_ms <= other.start_ms && other.end_ms <= self.end_ms
    }

    /// Whether two ranges overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }

    /// Length of the overlap with `other` (ms), 0 when disjoint.
    pub fn overlap_duration(&self, other: &Self) -> i64 {
        self.intersection(other).map_or(0, |r| r.duration_ms())
    }

    /// The overlapping sub-range, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start_ms.max(other.start_ms);
        let end = self.end_ms.min(other.end_ms);
        (start < end).then_some(Self {
            start_ms: start,
            end_ms: end,
        })
    }

    /// The smallest range covering both, if its length fits in an `i64`.
    pub fn span(&self, other: &Self) -> Option<Self> {
        Self::new(
            self.start_ms.min(other.start_ms),
            self.end_ms.max(other.end_ms),
        )
        .ok()
    }

    /// The parts of this range not covered by `other` (zero, one or two).
    pub fn subtract(&self, other: &Self) -> Vec<Self> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        let mut parts = Vec::with_capacity(2);
        if self.start_ms < other.start_ms {
            parts.push(Self {
                start_ms: self.start_ms,
                end_ms: other.start_ms,
            });
        }
        if other.end_ms < self.end_ms {
            parts.push(Self {
                start_ms: other.end_ms,
                end_ms: self.end_ms,
            });
        }
        parts
    }

    /// Same length, moved to start at `start_ms`. `None` if the end would
    /// not fit in an `i64`.
    pub fn shifted_to(&self, start_ms: i64) -> Option<Self> {
        let end_ms = start_ms.checked_add(self.duration_ms())?;
        Some(Self { start_ms, end_ms })
    }

    /// Widened by `margin_ms` on both sides, as far as the length still
    /// fits in an `i64`.
    pub fn expanded(&self, margin_ms: i64) -> Self {
        let room = (i64::MAX - self.duration_ms()) / 2;
        let margin = margin_ms.clamp(0, room);
        Self {
            start_ms: self.start_ms.saturating_sub(margin),
            end_ms: self.end_ms.saturating_add(margin),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_ms, self.end_ms)
    }
}

/// Intersects two slot lists, returning the common free time.
///
/// Inputs need not be sorted; the output is sorted and non-overlapping
/// as long as each input is non-overlapping.
pub fn intersect_all(a: &[TimeRange], b: &[TimeRange]) -> Vec<TimeRange> {
    let mut left = a.to_vec();
    let mut right = b.to_vec();
    left.sort();
    right.sort();

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if let Some(common) = left[i].intersection(&right[j]) {
            out.push(common);
        }
        if left[i].end_ms < right[j].end_ms {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Sorts ranges and merges those that overlap or touch.
///
/// Ranges whose union would be longer than `i64::MAX` ms stay separate.
pub fn merge_all(mut ranges: Vec<TimeRange>) -> Vec<TimeRange> {
    ranges.sort();
    let mut merged: Vec<TimeRange> = Vec::with_capacity(ranges.len());
    for r in ranges {
        let joined = merged
            .last()
            .filter(|last| r.start_ms <= last.end_ms)
            .and_then(|last| last.span(&r));
        if joined.is_some() {
            merged.pop();
        }
        merged.push(joined.unwrap_or(r));
    }
    merged
}

/// Removes every `busy` range from `free`.
pub fn subtract_all(free: Vec<TimeRange>, busy: &[TimeRange]) -> Vec<TimeRange> {
    busy.iter().fold(free, |acc, b| {
        acc.into_iter().flat_map(|f| f.subtract(b)).collect()
    })
}
