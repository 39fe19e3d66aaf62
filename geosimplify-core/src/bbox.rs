//! Axis-aligned bounding boxes and R-tree tuning shared across the workspace

use crate::error::{Error, Result};
use crate::point::Point;
use rstar::{RStarInsertionStrategy, RTreeParams, AABB};
use serde::{Deserialize, Serialize};

/// Extent given to an axis along which all points coincide, so colinear or
/// axis-aligned geometry still has a box with volume.
pub const DEGENERATE_EXTENT: f64 = 0.0001;

/// Minimum number of children per R-tree node
pub const MIN_BRANCH_FACTOR: usize = 25;

/// Maximum number of children per R-tree node
pub const MAX_BRANCH_FACTOR: usize = 50;

/// Fixed R-tree parameters used by every spatial index in geosimplify
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchFactors;

impl RTreeParams for BranchFactors {
    const MIN_SIZE: usize = MIN_BRANCH_FACTOR;
    const MAX_SIZE: usize = MAX_BRANCH_FACTOR;
    const REINSERTION_COUNT: usize = 10;
    type DefaultInsertionStrategy = RStarInsertionStrategy;
}

/// A 3D axis-aligned box in the embedding space of the unit sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Smallest box enclosing all points, with zero-extent axes inflated by
    /// [`DEGENERATE_EXTENT`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateGeometry`] if no points are given or if every
    /// point is identical.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let first = points.first().ok_or_else(|| {
            Error::DegenerateGeometry("cannot bound an empty point set".to_string())
        })?;

        let mut min = first.to_array();
        let mut max = min;
        for point in &points[1..] {
            let coords = point.to_array();
            for axis in 0..3 {
                min[axis] = min[axis].min(coords[axis]);
                max[axis] = max[axis].max(coords[axis]);
            }
        }

        if (0..3).all(|axis| max[axis] - min[axis] == 0.0) {
            return Err(Error::DegenerateGeometry(format!(
                "{} identical vertices at {:?}",
                points.len(),
                min
            )));
        }

        for axis in 0..3 {
            if max[axis] - min[axis] == 0.0 {
                max[axis] = min[axis] + DEGENERATE_EXTENT;
            }
        }

        Ok(Self { min, max })
    }

    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn to_aabb(&self) -> AABB<[f64; 3]> {
        AABB::from_corners(self.min, self.max)
    }
}
