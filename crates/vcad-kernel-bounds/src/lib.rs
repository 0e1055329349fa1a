#![warn(missing_docs)]

//! Bounding volumes for the vcad picking subsystem.
//!
//! Three volume types are supported, collected in the [`Bounds`] sum type:
//!
//! - [`BoundingSphere`] - center and radius
//! - [`Aabb3`] - axis-aligned box
//! - [`Polytope`] - convex region bounded by [`Plane`]s
//!
//! Each volume answers the zero-width line test used by pick shapes
//! (`intersects_line`) and can produce an enclosing sphere for cheap
//! rejection.
//!
//! # Example
//!
//! ```
//! use vcad_kernel_bounds::{Aabb3, Bounds};
//! use vcad_kernel_math::{Point3, Vec3};
//!
//! let bounds = Bounds::Box(Aabb3::new(
//!     Point3::new(-1.0, -1.0, -1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//! ));
//! assert!(bounds.intersects_line(&Point3::new(0.0, 0.0, 5.0), &Vec3::new(0.0, 0.0, -1.0)));
//! ```

/// Line directions whose component along a slab or plane normal is smaller
/// than this are treated as parallel to it.
pub(crate) const PARALLEL_EPS: f64 = 1e-15;

mod aabb;
mod error;
mod polytope;
mod sphere;

pub use aabb::Aabb3;
pub use error::{BoundsError, Result};
pub use polytope::{Plane, Polytope};
pub use sphere::BoundingSphere;

use serde::{Deserialize, Serialize};
use vcad_kernel_math::{Point3, Vec3};

/// A bounding volume of one of the supported kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bounds {
    /// Bounding sphere.
    Sphere(BoundingSphere),
    /// Axis-aligned bounding box.
    Box(Aabb3),
    /// Convex polytope.
    Polytope(Polytope),
}

/// Discriminant of [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundsKind {
    /// [`Bounds::Sphere`].
    Sphere,
    /// [`Bounds::Box`].
    Box,
    /// [`Bounds::Polytope`].
    Polytope,
}

impl Bounds {
    /// Which kind of volume this is.
    pub fn kind(&self) -> BoundsKind {
        match self {
            Bounds::Sphere(_) => BoundsKind::Sphere,
            Bounds::Box(_) => BoundsKind::Box,
            Bounds::Polytope(_) => BoundsKind::Polytope,
        }
    }

    /// Zero-width line test owned by each volume.
    ///
    /// The line through `origin` along `dir` is unbounded in both directions.
    pub fn intersects_line(&self, origin: &Point3, dir: &Vec3) -> bool {
        match self {
            Bounds::Sphere(s) => s.intersects_line(origin, dir),
            Bounds::Box(b) => b.intersects_line(origin, dir),
            Bounds::Polytope(p) => p.intersects_line(origin, dir),
        }
    }

    /// A sphere enclosing the volume.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        match self {
            Bounds::Sphere(s) => *s,
            Bounds::Box(b) => b.bounding_sphere(),
            Bounds::Polytope(p) => p.bounding_sphere(),
        }
    }

    /// Center of the volume (the enclosing sphere's center for polytopes).
    pub fn center(&self) -> Point3 {
        match self {
            Bounds::Sphere(s) => s.center,
            Bounds::Box(b) => b.center(),
            Bounds::Polytope(p) => p.bounding_sphere().center,
        }
    }
}

impl From<BoundingSphere> for Bounds {
    fn from(s: BoundingSphere) -> Self {
        Bounds::Sphere(s)
    }
}

impl From<Aabb3> for Bounds {
    fn from(b: Aabb3) -> Self {
        Bounds::Box(b)
    }
}

impl From<Polytope> for Bounds {
    fn from(p: Polytope) -> Self {
        Bounds::Polytope(p)
    }
}
