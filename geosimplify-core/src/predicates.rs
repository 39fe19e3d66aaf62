//! Spherical measures and orientation predicates
//!
//! All inputs are expected to be unit-length [`Point`]s. Areas are spherical
//! excess in steradians; orientation follows the right-hand rule so that
//! `a, b, c` is counter-clockwise when `(a x b) . c > 0`.

use crate::point::{vector_angle, Point};
use serde::{Deserialize, Serialize};
use std::ops::Neg;

/// Machine epsilon used by the determinant error bounds
const DBL_EPSILON: f64 = f64::EPSILON;

/// Upper bound on the rounding error of the triple product `(a x b) . c`
const MAX_DETERMINANT_ERROR: f64 = 1.8274e-15;

/// Error multiplier for the edge-based determinant
const DET_ERROR_MULTIPLIER: f64 = 3.2321 * DBL_EPSILON;

/// A geodesic edge between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub v0: Point,
    pub v1: Point,
}

impl Edge {
    pub fn new(v0: Point, v1: Point) -> Self {
        Self { v0, v1 }
    }
}

/// Orientation of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    Indeterminate,
    CounterClockwise,
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::Indeterminate => Direction::Indeterminate,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Outcome of testing two edges for a crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossingSign {
    /// The edges cross at a point interior to both
    Cross,
    /// The edges share a vertex; not a crossing for simplification purposes
    MaybeCross,
    DoNotCross,
}

/// Area of the spherical triangle `abc` in steradians.
///
/// Uses l'Huilier's formula, switching to Girard's formula for skinny
/// triangles where it is the more accurate of the two.
pub fn triangle_area(a: &Point, b: &Point, c: &Point) -> f64 {
    let sa = b.angle(c);
    let sb = c.angle(a);
    let sc = a.angle(b);
    let s = 0.5 * (sa + sb + sc);

    if s >= 3e-4 {
        let dmin = s - sa.max(sb.max(sc));
        if dmin < 1e-2 * s * s * s * s * s {
            let area = girard_area(a, b, c);
            if dmin < s * 0.1 * area {
                return area;
            }
        }
    }

    let product = (0.5 * s).tan()
        * (0.5 * (s - sa)).tan()
        * (0.5 * (s - sb)).tan()
        * (0.5 * (s - sc)).tan();
    4.0 * product.max(0.0).sqrt().atan()
}

/// Area of the spherical triangle `abc` by Girard's formula (sum of angles minus pi)
pub fn girard_area(a: &Point, b: &Point, c: &Point) -> f64 {
    let ab = a.point_cross(b);
    let bc = b.point_cross(c);
    let ac = a.point_cross(c);

    let area = vector_angle(&ab, &ac) - vector_angle(&ab, &bc) + vector_angle(&bc, &ac);
    area.max(0.0)
}

/// Orientation of `abc`, falling back to a more careful determinant when the
/// fast triple product is too close to zero to trust.
pub fn robust_sign(a: &Point, b: &Point, c: &Point) -> Direction {
    let det = a.0.cross(&b.0).dot(&c.0);
    if det > MAX_DETERMINANT_ERROR {
        return Direction::CounterClockwise;
    }
    if det < -MAX_DETERMINANT_ERROR {
        return Direction::Clockwise;
    }
    if a == b || b == c || c == a {
        return Direction::Indeterminate;
    }
    stable_sign(a, b, c)
}

/// Determinant built from the two shortest edges of the triangle, which keeps
/// the error bound proportional to their lengths.
fn stable_sign(a: &Point, b: &Point, c: &Point) -> Direction {
    let ab = b.0 - a.0;
    let bc = c.0 - b.0;
    let ca = a.0 - c.0;
    let ab2 = ab.norm_squared();
    let bc2 = bc.norm_squared();
    let ca2 = ca.norm_squared();

    let (e1, e2, op) = if ab2 >= bc2 && ab2 >= ca2 {
        (ca, bc, c.0)
    } else if bc2 >= ca2 {
        (ab, ca, a.0)
    } else {
        (bc, ab, b.0)
    };

    let normal = e1.cross(&e2);
    let max_err = DET_ERROR_MULTIPLIER * (e1.norm_squared() * e2.norm_squared()).sqrt();
    let det = -normal.dot(&op);

    if det > max_err {
        Direction::CounterClockwise
    } else if det < -max_err {
        Direction::Clockwise
    } else {
        Direction::Indeterminate
    }
}

/// Classify whether edge `ab` crosses edge `cd`.
///
/// Edges sharing an endpoint report [`CrossingSign::MaybeCross`]. An
/// orientation that cannot be resolved reports [`CrossingSign::DoNotCross`].
pub fn crossing_sign(a: &Point, b: &Point, c: &Point, d: &Point) -> CrossingSign {
    if a == c || a == d || b == c || b == d {
        return CrossingSign::MaybeCross;
    }

    let acb = -robust_sign(a, b, c);
    if acb == Direction::Indeterminate {
        return CrossingSign::DoNotCross;
    }
    if robust_sign(a, b, d) != acb {
        return CrossingSign::DoNotCross;
    }
    if -robust_sign(c, d, b) != acb {
        return CrossingSign::DoNotCross;
    }
    if robust_sign(c, d, a) != acb {
        return CrossingSign::DoNotCross;
    }
    CrossingSign::Cross
}

/// Whether two edges cross at a point interior to both.
///
/// Edges that merely touch at a shared vertex never count: consecutive edges
/// of a line always share one.
///
/// There is no exact-arithmetic fallback: a crossing whose orientation is
/// within rounding error of collinear reports `false`.
pub fn edges_cross(e1: &Edge, e2: &Edge) -> bool {
    crossing_sign(&e1.v0, &e1.v1, &e2.v0, &e2.v1) == CrossingSign::Cross
}

/// Signed exterior angle at `b` when walking `a -> b -> c`; positive for a
/// left (counter-clockwise) turn.
pub fn turn_angle(a: &Point, b: &Point, c: &Point) -> f64 {
    let angle = vector_angle(&a.point_cross(b), &b.point_cross(c));
    if a.0.cross(&b.0).dot(&c.0) > 0.0 {
        angle
    } else {
        -angle
    }
}
