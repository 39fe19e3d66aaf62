//! Error types for geosimplify

use thiserror::Error;

/// Main error type for geosimplify operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Points that cannot produce a usable bounding box (all coincident)
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A closed loop failed structural validation
    #[error("Invalid loop: {0}")]
    InvalidLoop(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for geosimplify operations
pub type Result<T> = std::result::Result<T, Error>;
