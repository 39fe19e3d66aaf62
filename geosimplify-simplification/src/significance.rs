//! Per-vertex significance and the box a vertex is indexed under

use crate::vertex::{VertexCollection, VertexId};
use geosimplify_core::{triangle_area, BoundingBox, Result};

/// Area of the triangle `prev(id), id, next(id)`, or `+∞` when either
/// neighbour is missing.
pub fn significance(collection: &VertexCollection, id: VertexId) -> f64 {
    match (collection.prev(id), collection.next(id)) {
        (Some(prev), Some(next)) => triangle_area(
            &collection.vertex(prev).point,
            &collection.vertex(id).point,
            &collection.vertex(next).point,
        ),
        _ => f64::INFINITY,
    }
}

/// Box enclosing `id` and whichever neighbours it has.
///
/// # Errors
///
/// Returns `Error::DegenerateGeometry` when the vertex and its neighbours all
/// sit at the same location.
pub fn triangle_bbox(collection: &VertexCollection, id: VertexId) -> Result<BoundingBox> {
    let mut points = Vec::with_capacity(3);
    points.push(collection.vertex(id).point);
    points.extend(
        [collection.prev(id), collection.next(id)]
            .into_iter()
            .flatten()
            .map(|n| collection.vertex(n).point),
    );
    BoundingBox::from_points(&points)
}
