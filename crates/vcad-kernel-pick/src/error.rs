//! Error types for pick shapes.

use thiserror::Error;

/// Errors that can occur while preparing a pick shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PickError {
    /// The transform scales axes differently, so a round cross-section
    /// would become elliptical.
    #[error("transform does not have a uniform scale (largest factor {max_scale})")]
    NonUniformScale {
        /// Largest stretch factor of the transform.
        max_scale: f64,
    },
}

/// Result type for pick operations.
pub type Result<T> = std::result::Result<T, PickError>;
