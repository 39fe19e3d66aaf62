//! Reading and writing coordinate sequences
//!
//! This crate loads polylines and loops from delimited text files of
//! latitude/longitude pairs and writes simplified results back out.

pub mod latlng_text;
pub mod error;

pub use error::*;
pub use latlng_text::{parse_latlngs, read_latlngs, write_latlngs, write_latlngs_to, Delimiter};

use geosimplify_core::{polyline_from_latlngs, Loop, Point, Polyline};
use std::path::Path;

/// Read a file as an open polyline
pub fn read_polyline<P: AsRef<Path>>(path: P) -> Result<Polyline, IoError> {
    Ok(polyline_from_latlngs(&read_latlngs(path)?))
}

/// Read a file as a closed loop; the first point must not be repeated at the end
pub fn read_loop<P: AsRef<Path>>(path: P) -> Result<Loop, IoError> {
    Ok(Loop::from_latlngs(&read_latlngs(path)?))
}

/// Write points as comma separated degrees
pub fn write_points<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<(), IoError> {
    let latlngs: Vec<_> = points.iter().map(Point::to_latlng).collect();
    write_latlngs(path, &latlngs, Delimiter::Comma)
}
