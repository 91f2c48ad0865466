//! Start-ordered interval index.
//!
//! # Algorithm
//!
//! Events are sorted by `(start, id)`. A sweep walks them left to right
//! keeping a min-heap of "open" events keyed by end time:
//!
//! 1. Evict every open event with `end <= next.start` (half-open ranges
//!    that merely touch do not overlap).
//! 2. Pair the next event with every remaining open event; each of them
//!    started no later and ends after `next.start`, so they all overlap it.
//! 3. Push the next event onto the heap.
//!
//! # Complexity
//! O(n log n) for the sort plus O(n log n + k) for the sweep, where k is
//! the number of overlapping pairs.
//!
//! # Reference
//! Preparata & Shamos (1985), "Computational Geometry", Ch. 8 (plane sweep)

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::models::{Event, TimeRange};

/// Events borrowed from a snapshot, sorted by start time.
#[derive(Debug, Clone)]
pub struct IntervalIndex<'a> {
    sorted: Vec<&'a Event>,
}

impl<'a> IntervalIndex<'a> {
    /// Builds the index. Ties on start are broken by id for determinism.
    pub fn build(events: &'a [Event]) -> Self {
        let mut sorted: Vec<&Event> = events.iter().collect();
        sorted.sort_by(|a, b| {
            a.start_ms()
                .cmp(&b.start_ms())
                .then_with(|| a.id.cmp(&b.id))
                .then_with(|| a.end_ms().cmp(&b.end_ms()))
        });
        Self { sorted }
    }

    /// Number of indexed events.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether the index holds no events.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Indexed events in `(start, id)` order.
    pub fn events(&self) -> &[&'a Event] {
        &self.sorted
    }

    /// Every unordered pair of events whose ranges overlap.
    ///
    /// The first element of each pair precedes the second in index order.
    /// No pair appears twice and no event is paired with itself.
    pub fn query_overlaps(&self) -> Vec<(&'a Event, &'a Event)> {
        let mut pairs = Vec::new();
        let mut active: BinaryHeap<Reverse<(i64, usize)>> = BinaryHeap::new();

        for (idx, &event) in self.sorted.iter().enumerate() {
            while let Some(&Reverse((end, _))) = active.peek() {
                if end > event.start_ms() {
                    break;
                }
                active.pop();
            }

            let mut open: Vec<usize> = active.iter().map(|Reverse((_, i))| *i).collect();
            open.sort_unstable();
            pairs.extend(open.into_iter().map(|i| (self.sorted[i], event)));

            active.push(Reverse((event.end_ms(), idx)));
        }

        pairs
    }

    /// Events whose range overlaps `probe`, in index order.
    pub fn overlapping(&self, probe: &TimeRange) -> Vec<&'a Event> {
        let upper = self
            .sorted
            .partition_point(|e| e.start_ms() < probe.end_ms());
        self.sorted[..upper]
            .iter()
            .filter(|e| e.end_ms() > probe.start_ms())
            .copied()
            .collect()
    }
}
