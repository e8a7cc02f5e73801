use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{search::NodeId, sets::candidates::CandidateEntry};

/// Min-first priority queue of tentative distances, backed by a binary heap.
///
/// Stale entries are not removed on decrease-key: the caller compares a
/// popped distance with the best recorded one and skips it when larger.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<CandidateEntry>>,
}

impl Frontier {
    pub fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Frontier {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, index: NodeId, distance: f64) {
        self.heap.push(Reverse(CandidateEntry {
            distance: distance.into(),
            index,
        }));
    }

    /// Removes and returns the entry with the smallest distance.
    pub fn pop(&mut self) -> Option<CandidateEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
