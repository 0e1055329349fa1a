#![warn(missing_docs)]

//! Pick shapes for scene-graph picking in the vcad kernel.
//!
//! A pick shape is tested against the bounding volumes of scene nodes to
//! decide which nodes a pick gesture could have touched.
//!
//! - [`PickShape`] - the interface every pick shape implements
//! - [`PickCylinderRay`] - an infinite line swept by a disk, i.e. a ray
//!   with a pick tolerance radius
//!
//! # Example
//!
//! ```
//! use vcad_kernel_bounds::{BoundingSphere, Bounds};
//! use vcad_kernel_math::{Point3, Vec3};
//! use vcad_kernel_pick::{PickCylinderRay, PickShape};
//!
//! let pick = PickCylinderRay::with(Point3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 0.5);
//! let bounds = Bounds::Sphere(BoundingSphere::new(Point3::origin(), 1.0));
//! assert!(pick.intersects(&bounds));
//! ```

mod cylinder_ray;
mod error;

pub use cylinder_ray::PickCylinderRay;
pub use error::{PickError, Result};

use vcad_kernel_bounds::Bounds;
use vcad_kernel_math::{Point4, Transform};

/// A shape used to pick scene nodes by bounding volume.
pub trait PickShape {
    /// Test whether the shape touches `bounds`.
    ///
    /// Shapes that can locate the contact write it to `pick_pos`; shapes
    /// that only answer yes or no leave it untouched.
    fn intersect(&self, bounds: &Bounds, pick_pos: &mut Point4) -> bool;

    /// A copy of this shape expressed in the frame mapped by `t`.
    fn transform(&self, t: &Transform) -> Result<Self>
    where
        Self: Sized;

    /// [`PickShape::intersect`] without a pick position.
    fn intersects(&self, bounds: &Bounds) -> bool {
        let mut pick_pos = Point4::origin();
        self.intersect(bounds, &mut pick_pos)
    }
}
