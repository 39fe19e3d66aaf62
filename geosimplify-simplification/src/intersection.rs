//! Would removing a vertex make the shape cross itself?

use crate::spatial_index::VertexIndex;
use crate::vertex::{VertexCollection, VertexId};
use geosimplify_core::{edges_cross, Edge};

/// First crossing between the bridge `prev(id) -> next(id)` that removing
/// `id` would create and an edge already in the shape.
///
/// Candidates come from the index query on the box of `id`, visited in
/// ascending id order; for each, the edge to its predecessor is tested
/// before the edge to its successor. The returned pair is the bridge and the
/// existing edge oriented away from the candidate.
///
/// Vertices missing a neighbour, or that have not been indexed, are never
/// flagged.
pub fn creates_intersection(
    collection: &VertexCollection,
    index: &VertexIndex,
    id: VertexId,
) -> Option<(Edge, Edge)> {
    let (prev, next) = (collection.prev(id)?, collection.next(id)?);
    let bbox = collection.vertex(id).bbox?;
    let bridge = Edge::new(collection.vertex(prev).point, collection.vertex(next).point);

    index
        .query(&bbox)
        .into_iter()
        .filter(|&candidate| candidate != id && collection.is_linked(candidate))
        .find_map(|candidate| {
            let from = collection.vertex(candidate).point;
            [collection.prev(candidate), collection.next(candidate)]
                .into_iter()
                .flatten()
                .map(|n| Edge::new(from, collection.vertex(n).point))
                .find(|existing| edges_cross(&bridge, existing))
        })
        .map(|existing| (bridge, existing))
}
