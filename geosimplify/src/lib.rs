//! # geosimplify
//!
//! Topology-aware simplification of polylines and closed loops on the sphere.
//!
//! This is the umbrella crate that provides convenient access to all geosimplify
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core** (always included): Unit-sphere points, spherical predicates, loops and validation
//! - **Simplification**: Visvalingam-Whyatt elimination with intersection avoidance
//! - **I/O**: Delimited text files of latitude/longitude pairs
//!
//! ## Quick Start
//!
//! ```rust
//! use geosimplify::prelude::*;
//!
//! let line: Vec<Point> = [(0.0, 0.0), (0.5, 1.0), (0.0, 2.0), (0.01, 3.0), (0.0, 4.0)]
//!     .iter()
//!     .map(|&(lat, lng)| Point::from_latlng(LatLng::from_degrees(lat, lng)))
//!     .collect();
//!
//! let simplified = simplify_line(&line, 1e-6, 0, true)?;
//! assert!(simplified.len() <= line.len());
//! assert_eq!(simplified.first(), line.first());
//! assert_eq!(simplified.last(), line.last());
//! # Ok::<(), geosimplify::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io and simplification
//! - `simplification`: The elimination engine
//! - `io`: Coordinate file support
//! - `all`: Enables all features

// Re-export core functionality
pub use geosimplify_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use geosimplify_io as io;

#[cfg(feature = "simplification")]
pub use geosimplify_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use geosimplify_core::{Error, LatLng, Loop, Point, Polyline, Result};

    #[cfg(feature = "io")]
    pub use geosimplify_io::{
        read_latlngs, read_loop, read_polyline, write_latlngs, write_points, Delimiter, IoError,
    };

    #[cfg(feature = "simplification")]
    pub use geosimplify_simplification::{
        simplify_line, simplify_loop, LineSimplifier, SimplifyOptions, VisvalingamSimplifier,
    };
}
