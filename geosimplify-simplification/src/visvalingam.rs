//! The elimination loop
//!
//! Vertices are popped in order of significance and removed one at a time.
//! Each removal changes the triangles of the two neighbours, so their areas,
//! boxes, queue positions and index entries are refreshed before the next
//! pop. A running watermark keeps the sequence of removed areas
//! non-decreasing: a vertex made cheap by an earlier removal is charged at
//! least what that removal cost.
//!
//! With intersection avoidance on, a vertex whose removal would cross an
//! existing edge is set aside. Set-aside vertices return to the queue after
//! the next vertex that passes the check, since that removal may have
//! cleared the way.

use crate::intersection::creates_intersection;
use crate::queue::VertexQueue;
use crate::significance::{significance, triangle_bbox};
use crate::spatial_index::VertexIndex;
use crate::vertex::{VertexCollection, VertexId};
use crate::SimplifyOptions;
use geosimplify_core::{BoundingBox, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Why an elimination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Nothing left in the queue
    Exhausted,
    /// The cheapest remaining vertex costs at least the threshold
    ThresholdReached,
    /// The shape is down to the minimum number of vertices
    MinimumReached,
}

/// Outcome of a single [`Elimination::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// `vertex` was unlinked at the given effective area
    Removed { vertex: VertexId, area: f64 },
    /// Removing the vertex would have created a crossing
    Deferred(VertexId),
    Finished(StopReason),
}

/// Summary of a completed elimination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EliminationStats {
    /// Effective area of each committed removal, in removal order
    pub removed_areas: Vec<f64>,
    /// Number of times a vertex was set aside to avoid a crossing
    pub deferrals: usize,
    pub stop: StopReason,
}

impl EliminationStats {
    pub fn removed(&self) -> usize {
        self.removed_areas.len()
    }
}

/// State of one simplification run over a single collection
#[derive(Debug)]
pub struct Elimination {
    collection: VertexCollection,
    queue: VertexQueue,
    index: VertexIndex,
    threshold: f64,
    min_points_to_keep: usize,
    avoid_intersections: bool,
    watermark: f64,
    deferred: Vec<VertexId>,
    finished: Option<StopReason>,
}

impl Elimination {
    /// Seed the queue and index with every vertex of `collection`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateGeometry` if some vertex and its neighbours
    /// all coincide, which includes a collection of a single vertex.
    pub fn new(mut collection: VertexCollection, options: &SimplifyOptions) -> Result<Self> {
        let seeds = collection
            .iter()
            .map(|id| -> Result<(VertexId, f64, BoundingBox)> {
                Ok((id, significance(&collection, id), triangle_bbox(&collection, id)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut queue = VertexQueue::with_capacity(seeds.len());
        let mut index = VertexIndex::new();
        for (id, area, bbox) in seeds {
            let vertex = collection.vertex_mut(id);
            vertex.area = area;
            vertex.bbox = Some(bbox);
            queue.push(id, area);
            index.insert(id, &bbox);
        }

        debug!(
            vertices = collection.len(),
            closed = collection.is_closed(),
            threshold = options.threshold,
            min_points_to_keep = options.min_points_to_keep,
            avoid_intersections = options.avoid_intersections,
            "seeded elimination"
        );

        Ok(Self {
            collection,
            queue,
            index,
            threshold: options.threshold,
            min_points_to_keep: options.min_points_to_keep,
            avoid_intersections: options.avoid_intersections,
            watermark: 0.0,
            deferred: Vec::new(),
            finished: None,
        })
    }

    /// Advance by one extraction from the queue.
    ///
    /// Once a [`Step::Finished`] has been returned every later call returns
    /// it again.
    ///
    /// # Errors
    ///
    /// Returns `Error::DegenerateGeometry` if a neighbour of the removed
    /// vertex ends up coinciding with both of its own neighbours. Removals
    /// made before the error stay in place.
    pub fn step(&mut self) -> Result<Step> {
        if let Some(reason) = self.finished {
            return Ok(Step::Finished(reason));
        }

        let Some((head, _)) = self.queue.pop() else {
            return Ok(self.finish(StopReason::Exhausted));
        };

        let mut area = self.collection.vertex(head).area;
        if area < self.watermark {
            area = self.watermark;
            self.collection.vertex_mut(head).area = area;
        } else {
            self.watermark = area;
        }

        if self.avoid_intersections {
            let crossing = creates_intersection(&self.collection, &self.index, head);
            if let Some((bridge, existing)) = crossing {
                trace!(vertex = head, ?bridge, ?existing, "removal would cross an edge");
                self.deferred.push(head);
                return Ok(Step::Deferred(head));
            }
        }

        for id in self.deferred.drain(..) {
            self.queue.push(id, self.collection.vertex(id).area);
        }

        if area >= self.threshold {
            return Ok(self.finish(StopReason::ThresholdReached));
        }
        if self.collection.len() <= self.min_points_to_keep {
            return Ok(self.finish(StopReason::MinimumReached));
        }

        let mut neighbours = vec![self.collection.prev(head), self.collection.next(head)];
        neighbours.dedup();
        let neighbours: Vec<VertexId> = neighbours
            .into_iter()
            .flatten()
            .filter(|&n| n != head)
            .collect();

        for id in std::iter::once(head).chain(neighbours.iter().copied()) {
            if let Some(bbox) = self.collection.vertex_mut(id).bbox.take() {
                self.index.remove(id, &bbox);
            }
        }
        self.collection.remove(head);

        for &id in &neighbours {
            let area = significance(&self.collection, id);
            let bbox = triangle_bbox(&self.collection, id)?;
            let vertex = self.collection.vertex_mut(id);
            vertex.area = area;
            vertex.bbox = Some(bbox);
            let tracked = self.queue.fix(id, area);
            debug_assert!(tracked, "linked vertex {} missing from queue", id);
            self.index.insert(id, &bbox);
        }

        trace!(vertex = head, area, remaining = self.collection.len(), "removed vertex");

        if self.collection.len() <= self.min_points_to_keep {
            self.finish(StopReason::MinimumReached);
        }

        Ok(Step::Removed { vertex: head, area })
    }

    /// Step until finished
    pub fn run(&mut self) -> Result<EliminationStats> {
        let mut removed_areas = Vec::new();
        let mut deferrals = 0;
        loop {
            match self.step()? {
                Step::Removed { area, .. } => removed_areas.push(area),
                Step::Deferred(_) => deferrals += 1,
                Step::Finished(stop) => {
                    return Ok(EliminationStats {
                        removed_areas,
                        deferrals,
                        stop,
                    })
                }
            }
        }
    }

    fn finish(&mut self, reason: StopReason) -> Step {
        debug!(
            ?reason,
            remaining = self.collection.len(),
            watermark = self.watermark,
            deferred = self.deferred.len(),
            "elimination finished"
        );
        self.finished = Some(reason);
        Step::Finished(reason)
    }

    /// Largest effective area charged so far
    pub fn watermark(&self) -> f64 {
        self.watermark
    }

    pub fn collection(&self) -> &VertexCollection {
        &self.collection
    }

    pub fn index(&self) -> &VertexIndex {
        &self.index
    }

    pub fn queue(&self) -> &VertexQueue {
        &self.queue
    }

    /// Vertices currently set aside
    pub fn deferred(&self) -> &[VertexId] {
        &self.deferred
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    pub fn into_collection(self) -> VertexCollection {
        self.collection
    }
}
