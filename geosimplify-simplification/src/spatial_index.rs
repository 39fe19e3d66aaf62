//! Incremental R-tree of vertex boxes

use crate::vertex::VertexId;
use geosimplify_core::{BoundingBox, BranchFactors};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;
use std::fmt;

type IndexedVertex = GeomWithData<Rectangle<[f64; 3]>, VertexId>;

fn entry(id: VertexId, bbox: &BoundingBox) -> IndexedVertex {
    GeomWithData::new(Rectangle::from_aabb(bbox.to_aabb()), id)
}

/// Boxes of the vertices still in play.
///
/// An entry is keyed by both the vertex and the exact box it was inserted
/// with, so callers must remove a vertex under the box they indexed it by.
pub struct VertexIndex {
    tree: RTree<IndexedVertex, BranchFactors>,
}

impl fmt::Debug for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexIndex").field("len", &self.len()).finish()
    }
}

impl Default for VertexIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new_with_params(),
        }
    }

    pub fn insert(&mut self, id: VertexId, bbox: &BoundingBox) {
        self.tree.insert(entry(id, bbox));
    }

    /// Returns `false` if no entry for `id` was indexed under `bbox`
    pub fn remove(&mut self, id: VertexId, bbox: &BoundingBox) -> bool {
        self.tree.remove(&entry(id, bbox)).is_some()
    }

    /// Vertices whose box overlaps `bbox`, in ascending id order
    pub fn query(&self, bbox: &BoundingBox) -> Vec<VertexId> {
        let mut hits: Vec<VertexId> = self
            .tree
            .locate_in_envelope_intersecting(&bbox.to_aabb())
            .map(|e| e.data)
            .collect();
        hits.sort_unstable();
        hits
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
