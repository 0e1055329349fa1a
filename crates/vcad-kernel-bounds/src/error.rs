//! Error types for bounding volume construction.

use thiserror::Error;

/// Errors that can occur while building a bounding volume.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    /// A closed convex polytope needs at least four half-spaces.
    #[error("polytope needs at least 4 planes, got {0}")]
    TooFewPlanes(usize),

    /// Plane normal has zero length.
    #[error("plane {0} has a zero-length normal")]
    DegeneratePlane(usize),

    /// The half-spaces do not bound a non-empty region.
    #[error("half-spaces do not enclose a bounded region")]
    EmptyPolytope,
}

/// Result type for bounding volume operations.
pub type Result<T> = std::result::Result<T, BoundsError>;
