//! Best-first frontier of candidate edges

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Candidate edge from a tree point to an unvisited neighbor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Sample index already in the tree
    pub from: usize,
    /// Sample index to connect
    pub to: usize,
    /// Priority; lower is popped first
    pub weight: f64,
}

impl Eq for Edge {}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest weight; equal weights
        // prefer the lower target index, then the lower source index
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.to.cmp(&self.to))
            .then_with(|| other.from.cmp(&self.from))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-ordered queue of candidate edges
///
/// Entries are never updated in place; stale edges (whose target was reached
/// some other way) are dropped by the caller when popped.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Edge>,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an edge
    pub fn push(&mut self, from: usize, to: usize, weight: f64) {
        self.heap.push(Edge { from, to, weight });
    }

    /// Remove and return the lowest-weight edge
    pub fn pop(&mut self) -> Option<Edge> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
