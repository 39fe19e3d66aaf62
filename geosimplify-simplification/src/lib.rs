//! Topology-aware polyline and loop simplification
//!
//! This crate implements Visvalingam-Whyatt vertex elimination on the unit
//! sphere:
//! - Significance is the spherical area of the triangle a vertex forms with
//!   its neighbours
//! - Removal costs never decrease over a run (watermarking)
//! - Optionally, removals that would make the shape cross itself are held
//!   back, using an incremental R-tree of vertex boxes
//!
//! Open polylines keep their end points. Closed loops keep at least four
//! vertices and come back with a non-negative turning angle.

pub mod vertex;
pub mod significance;
pub mod queue;
pub mod spatial_index;
pub mod intersection;
pub mod visvalingam;

pub use vertex::*;
pub use significance::*;
pub use queue::*;
pub use spatial_index::*;
pub use intersection::*;
pub use visvalingam::*;

use geosimplify_core::{Error, Loop, Point, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fewest vertices a simplified loop may have
pub const MIN_LOOP_VERTICES: usize = 4;

/// Parameters of a simplification run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyOptions {
    /// Stop once the cheapest vertex would cost at least this much, in
    /// steradians
    pub threshold: f64,
    /// Never go below this many vertices
    pub min_points_to_keep: usize,
    /// Hold back removals that would make the shape cross itself
    pub avoid_intersections: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            min_points_to_keep: 0,
            avoid_intersections: true,
        }
    }
}

impl SimplifyOptions {
    pub fn new(threshold: f64, min_points_to_keep: usize, avoid_intersections: bool) -> Self {
        Self {
            threshold,
            min_points_to_keep,
            avoid_intersections,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the threshold is NaN or negative.
    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(Error::InvalidData(format!(
                "Threshold must be non-negative, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Simplified shape along with what the elimination did to get there
#[derive(Debug, Clone, PartialEq)]
pub struct Simplified<T> {
    pub output: T,
    pub stats: EliminationStats,
}

/// Reduce the vertex count of lines and loops
pub trait LineSimplifier {
    fn simplify_line(&self, points: &[Point]) -> Result<Vec<Point>>;

    fn simplify_loop(&self, lp: &Loop) -> Result<Loop>;
}

/// Visvalingam-Whyatt simplifier with optional intersection avoidance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisvalingamSimplifier {
    pub options: SimplifyOptions,
}

impl VisvalingamSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(
        threshold: f64,
        min_points_to_keep: usize,
        avoid_intersections: bool,
    ) -> Self {
        Self::with_options(SimplifyOptions::new(
            threshold,
            min_points_to_keep,
            avoid_intersections,
        ))
    }

    pub fn with_options(options: SimplifyOptions) -> Self {
        Self { options }
    }

    /// Simplify an open polyline, keeping its first and last points.
    ///
    /// Inputs of at most `max(min_points_to_keep, 2)` points come back
    /// unchanged.
    pub fn simplify_line_with_stats(&self, points: &[Point]) -> Result<Simplified<Vec<Point>>> {
        self.options.validate()?;

        if points.len() <= self.options.min_points_to_keep.max(2) {
            return Ok(Simplified {
                output: points.to_vec(),
                stats: EliminationStats {
                    removed_areas: Vec::new(),
                    deferrals: 0,
                    stop: StopReason::MinimumReached,
                },
            });
        }

        let collection = VertexCollection::from_polyline(points);
        let mut elimination = Elimination::new(collection, &self.options)?;
        let stats = elimination.run()?;
        let output = elimination.collection().points();

        debug!(
            input = points.len(),
            output = output.len(),
            deferrals = stats.deferrals,
            "simplified polyline"
        );
        Ok(Simplified { output, stats })
    }

    /// Simplify a closed loop.
    ///
    /// The loop is validated before anything else happens. A loop with a
    /// negative turning angle is inverted first, and at least
    /// [`MIN_LOOP_VERTICES`] vertices are kept whatever `min_points_to_keep`
    /// says.
    pub fn simplify_loop_with_stats(&self, lp: &Loop) -> Result<Simplified<Loop>> {
        self.options.validate()?;
        lp.validate()?;

        let mut working = lp.clone();
        if working.turning_angle() < 0.0 {
            debug!("inverting loop with negative turning angle");
            working.invert();
        }

        let options = SimplifyOptions {
            min_points_to_keep: self.options.min_points_to_keep.max(MIN_LOOP_VERTICES),
            ..self.options
        };
        let collection = VertexCollection::from_loop(working.vertices());
        let mut elimination = Elimination::new(collection, &options)?;
        let stats = elimination.run()?;
        let output = Loop::from_points(elimination.collection().points());

        debug!(
            input = lp.num_vertices(),
            output = output.num_vertices(),
            deferrals = stats.deferrals,
            "simplified loop"
        );
        Ok(Simplified { output, stats })
    }
}

impl LineSimplifier for VisvalingamSimplifier {
    fn simplify_line(&self, points: &[Point]) -> Result<Vec<Point>> {
        Ok(self.simplify_line_with_stats(points)?.output)
    }

    fn simplify_loop(&self, lp: &Loop) -> Result<Loop> {
        Ok(self.simplify_loop_with_stats(lp)?.output)
    }
}

/// Simplify an open polyline
pub fn simplify_line(
    points: &[Point],
    threshold: f64,
    min_points_to_keep: usize,
    avoid_intersections: bool,
) -> Result<Vec<Point>> {
    VisvalingamSimplifier::with_params(threshold, min_points_to_keep, avoid_intersections)
        .simplify_line(points)
}

/// Simplify a closed loop
pub fn simplify_loop(
    lp: &Loop,
    threshold: f64,
    min_points_to_keep: usize,
    avoid_intersections: bool,
) -> Result<Loop> {
    VisvalingamSimplifier::with_params(threshold, min_points_to_keep, avoid_intersections)
        .simplify_loop(lp)
}
