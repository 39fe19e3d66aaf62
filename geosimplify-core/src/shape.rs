//! Polylines and closed loops on the unit sphere

use crate::error::{Error, Result};
use crate::point::{LatLng, Point};
use crate::predicates::{turn_angle, Edge};
use crate::self_intersection::loop_self_intersects;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered, open sequence of points
pub type Polyline = Vec<Point>;

/// Build a polyline from latitude/longitude pairs
pub fn polyline_from_latlngs(latlngs: &[LatLng]) -> Polyline {
    latlngs.iter().map(|&ll| Point::from_latlng(ll)).collect()
}

/// A closed loop of vertices; the last vertex connects back to the first.
///
/// The first vertex is not repeated at the end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Loop {
    vertices: Vec<Point>,
}

impl Loop {
    /// Create a loop from its vertices without validating them
    pub fn from_points(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn from_latlngs(latlngs: &[LatLng]) -> Self {
        Self::from_points(polyline_from_latlngs(latlngs))
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex `i`, wrapping around the loop
    pub fn vertex(&self, i: usize) -> Option<&Point> {
        if self.vertices.is_empty() {
            None
        } else {
            self.vertices.get(i % self.vertices.len())
        }
    }

    /// All edges, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Edge::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Sum of the signed turning angles at every vertex.
    ///
    /// Close to `2π` for a small counter-clockwise loop and close to `-2π` for
    /// a small clockwise one. Loops with fewer than three vertices return 0.
    pub fn turning_angle(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        self.vertices
            .iter()
            .circular_tuple_windows::<(_, _, _)>()
            .map(|(a, b, c)| turn_angle(a, b, c))
            .sum()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.turning_angle() > 0.0
    }

    /// Reverse the traversal direction of the loop
    pub fn invert(&mut self) {
        self.vertices.reverse();
    }

    /// Check that the loop is a simple, well-formed polygon.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoop`] when the loop has fewer than three
    /// vertices, a vertex is not unit length, adjacent vertices are identical
    /// or antipodal, a vertex appears twice, or two edges cross.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(Error::InvalidLoop(format!(
                "loop has {} vertices, at least 3 are required",
                n
            )));
        }

        if let Some(i) = self.vertices.iter().position(|v| !v.is_unit()) {
            return Err(Error::InvalidLoop(format!("vertex {} is not unit length", i)));
        }

        for i in 0..n {
            let (a, b) = (&self.vertices[i], &self.vertices[(i + 1) % n]);
            if a == b {
                return Err(Error::InvalidLoop(format!(
                    "edge {} is degenerate (duplicate vertex)",
                    i
                )));
            }
            if a.is_antipodal(b) {
                return Err(Error::InvalidLoop(format!(
                    "vertices {} and {} are antipodal",
                    i,
                    (i + 1) % n
                )));
            }
        }

        let mut seen: HashMap<[u64; 3], usize> = HashMap::with_capacity(n);
        for (i, v) in self.vertices.iter().enumerate() {
            let key = v.to_array().map(f64::to_bits);
            if let Some(first) = seen.insert(key, i) {
                return Err(Error::InvalidLoop(format!(
                    "vertex {} duplicates vertex {}",
                    i, first
                )));
            }
        }

        if let Some((a, b)) = loop_self_intersects(&self.vertices)? {
            return Err(Error::InvalidLoop(format!(
                "self-intersection between edges {:?} and {:?}",
                a, b
            )));
        }

        Ok(())
    }
}

impl From<Vec<Point>> for Loop {
    fn from(vertices: Vec<Point>) -> Self {
        Self::from_points(vertices)
    }
}
