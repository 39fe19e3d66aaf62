//! Min-ordered queue of vertices keyed by significance

use crate::vertex::VertexId;
use priority_queue::PriorityQueue;
use std::cmp::Ordering;

/// Significance of a vertex as a queue priority.
///
/// Ordered so that the smallest area is popped first. Uses `total_cmp`, so
/// infinite areas sort after every finite one.
#[derive(Debug, Clone, Copy)]
pub struct Significance(pub f64);

impl PartialEq for Significance {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}
impl Eq for Significance {}

impl PartialOrd for Significance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Significance {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest area first
        other.0.total_cmp(&self.0)
    }
}

/// Vertices awaiting elimination.
///
/// The backing queue tracks each vertex's heap slot, so changing an area or
/// dropping a vertex is logarithmic rather than a rebuild or a scan.
#[derive(Debug, Clone, Default)]
pub struct VertexQueue {
    heap: PriorityQueue<VertexId, Significance>,
}

impl VertexQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: PriorityQueue::with_capacity(capacity),
        }
    }

    /// Track `id` with the given area, replacing its area if already tracked
    pub fn push(&mut self, id: VertexId, area: f64) {
        self.heap.push(id, Significance(area));
    }

    /// Remove and return the vertex with the smallest area
    pub fn pop(&mut self) -> Option<(VertexId, f64)> {
        self.heap.pop().map(|(id, Significance(area))| (id, area))
    }

    pub fn peek(&self) -> Option<(VertexId, f64)> {
        self.heap.peek().map(|(&id, &Significance(area))| (id, area))
    }

    /// Restore heap order after the area of `id` changed.
    ///
    /// Returns `false` if `id` is not in the queue; untracked vertices stay
    /// untracked.
    pub fn fix(&mut self, id: VertexId, area: f64) -> bool {
        self.heap.change_priority(&id, Significance(area)).is_some()
    }

    pub fn remove(&mut self, id: VertexId) -> bool {
        self.heap.remove(&id).is_some()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.heap.get_priority(&id).is_some()
    }

    /// Area `id` is currently queued under
    pub fn area(&self, id: VertexId) -> Option<f64> {
        self.heap.get_priority(&id).map(|s| s.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
