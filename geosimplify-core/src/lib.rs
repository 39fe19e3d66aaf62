//! Core data structures and geometry for geosimplify
//!
//! This crate provides the spherical geometry kernel the simplifier builds on:
//! unit-sphere points, triangle areas, robust crossing predicates, bounding
//! boxes, closed loops with validation, and reference self-intersection scans.

pub mod point;
pub mod predicates;
pub mod bbox;
pub mod shape;
pub mod self_intersection;
pub mod error;

pub use point::*;
pub use predicates::*;
pub use bbox::*;
pub use shape::*;
pub use self_intersection::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::Vector3;
