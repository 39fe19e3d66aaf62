//! Brute-force self-intersection scans
//!
//! These scans index every edge of a shape and test each one against its
//! overlapping neighbours. They are slower than the incremental checks the
//! simplifier performs, but simple enough to serve as a reference when
//! verifying simplified output or validating an input loop.

use crate::bbox::{BoundingBox, BranchFactors};
use crate::error::{Error, Result};
use crate::point::Point;
use crate::predicates::{edges_cross, Edge};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;

type IndexedEdge = GeomWithData<Rectangle<[f64; 3]>, usize>;

/// First pair of crossing edges in an open polyline, if any.
///
/// Edges are visited in order; for each one, overlapping edges are tested in
/// ascending index order. Edges touching at a shared vertex never count.
///
/// # Errors
///
/// Returns [`Error::DegenerateGeometry`] if the polyline contains a
/// zero-length edge.
pub fn polyline_self_intersects(polyline: &[Point]) -> Result<Option<(Edge, Edge)>> {
    if polyline.len() < 4 {
        return Ok(None);
    }
    let edges: Vec<Edge> = polyline
        .windows(2)
        .map(|pair| Edge::new(pair[0], pair[1]))
        .collect();
    first_crossing(&edges)
}

/// First pair of crossing edges in a closed loop, including the implicit
/// edge from the last vertex back to the first.
///
/// # Errors
///
/// Returns [`Error::DegenerateGeometry`] if the loop contains a zero-length
/// edge.
pub fn loop_self_intersects(vertices: &[Point]) -> Result<Option<(Edge, Edge)>> {
    if vertices.len() < 4 {
        return Ok(None);
    }
    let n = vertices.len();
    let edges: Vec<Edge> = (0..n)
        .map(|i| Edge::new(vertices[i], vertices[(i + 1) % n]))
        .collect();
    first_crossing(&edges)
}

fn first_crossing(edges: &[Edge]) -> Result<Option<(Edge, Edge)>> {
    let mut boxes = Vec::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        let bbox = BoundingBox::from_points(&[edge.v0, edge.v1])
            .map_err(|_| Error::DegenerateGeometry(format!("edge {} has identical endpoints", i)))?;
        boxes.push(bbox);
    }

    let entries: Vec<IndexedEdge> = boxes
        .iter()
        .enumerate()
        .map(|(i, bbox)| GeomWithData::new(Rectangle::from_aabb(bbox.to_aabb()), i))
        .collect();
    let tree: RTree<IndexedEdge, BranchFactors> = RTree::bulk_load_with_params(entries);

    for (i, edge) in edges.iter().enumerate() {
        let mut candidates: Vec<usize> = tree
            .locate_in_envelope_intersecting(&boxes[i].to_aabb())
            .map(|entry| entry.data)
            .filter(|&j| j != i)
            .collect();
        candidates.sort_unstable();

        if let Some(j) = candidates.into_iter().find(|&j| edges_cross(edge, &edges[j])) {
            return Ok(Some((*edge, edges[j])));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::LatLng;

    fn ll(lat: f64, lng: f64) -> Point {
        Point::from_latlng(LatLng::from_degrees(lat, lng))
    }

    #[test]
    fn test_short_inputs_never_intersect() {
        assert_eq!(polyline_self_intersects(&[]).unwrap(), None);
        let three = [ll(0.0, 0.0), ll(1.0, 1.0), ll(0.0, 1.0)];
        assert_eq!(polyline_self_intersects(&three).unwrap(), None);
        assert_eq!(loop_self_intersects(&three).unwrap(), None);
    }

    #[test]
    fn test_bow_tie_polyline() {
        let line = [ll(0.0, 0.0), ll(1.0, 1.0), ll(1.0, 0.0), ll(0.0, 1.0)];
        let (first, second) = polyline_self_intersects(&line).unwrap().unwrap();
        assert_eq!(first, Edge::new(line[0], line[1]));
        assert_eq!(second, Edge::new(line[2], line[3]));
    }

    #[test]
    fn test_zigzag_is_clean() {
        let line: Vec<Point> = (0..20)
            .map(|i| ll(if i % 2 == 0 { 0.0 } else { 0.5 }, i as f64 * 0.25))
            .collect();
        assert_eq!(polyline_self_intersects(&line).unwrap(), None);
    }

    #[test]
    fn test_loop_closing_edge_is_checked() {
        // As a polyline this is clean; the closing edge creates the bow tie
        let vertices = [ll(0.0, 0.0), ll(1.0, 0.0), ll(0.0, 1.0), ll(1.0, 1.0)];
        assert_eq!(polyline_self_intersects(&vertices).unwrap(), None);
        assert!(loop_self_intersects(&vertices).unwrap().is_some());

        let square = [ll(0.0, 0.0), ll(0.0, 1.0), ll(1.0, 1.0), ll(1.0, 0.0)];
        assert_eq!(loop_self_intersects(&square).unwrap(), None);
    }

    #[test]
    fn test_zero_length_edge_is_degenerate() {
        let line = [ll(0.0, 0.0), ll(1.0, 1.0), ll(1.0, 1.0), ll(0.0, 1.0)];
        assert!(matches!(
            polyline_self_intersects(&line),
            Err(Error::DegenerateGeometry(_))
        ));
    }
}
