#![warn(missing_docs)]

//! Math types for the vcad kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types
//! for 3D picking geometry: points, vectors, directions, affine
//! transforms, tolerance constants and the squared-distance
//! primitives in [`distance`].

pub mod distance;

use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};
use serde::{Deserialize, Serialize};

pub use distance::{closest_points_line_segment, line_to_segment_squared, point_to_line_squared};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A homogeneous point, used as the pick position slot.
pub type Point4 = nalgebra::Point4<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Uniform scale by `s` on every axis.
    pub fn uniform(s: f64) -> Self {
        Self::scale(s, s, s)
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// The resulting transform applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a point in place.
    pub fn apply_point_mut(&self, p: &mut Point3) {
        *p = self.apply_point(p);
    }

    /// Transform a direction vector (ignores translation, applies rotation/scale).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    fn linear_part(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// The single scale factor of the linear part, if there is one.
    ///
    /// Returns `Some(s)` when the linear part is `s` times an orthogonal
    /// matrix (rotation, reflection, or identity) within the relative
    /// tolerance `rel_tol`, and `None` for non-uniform scale or shear.
    ///
    /// The deviation of `MᵀM` from `s²I` is measured against `rel_tol * s²`,
    /// so the check is independent of the magnitude of the scale. A linear
    /// part that is exactly zero collapses every direction equally and
    /// reports a scale of `0`.
    pub fn uniform_scale(&self, rel_tol: f64) -> Option<f64> {
        let m = self.linear_part();
        let gram = m.transpose() * m;
        let s2 = gram.trace() / 3.0;
        if s2 == 0.0 {
            return Some(0.0);
        }
        let deviation = (gram - Matrix3::identity() * s2).abs().max();
        if deviation <= rel_tol * s2 {
            Some(s2.sqrt())
        } else {
            None
        }
    }

    /// The largest stretch factor of the linear part (its largest singular value).
    pub fn max_scale(&self) -> f64 {
        self.linear_part().singular_values().max()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Relative tolerance for dimensionless ratios. The uniform scale check
    /// allows `MᵀM` to deviate from `s²I` by at most `relative * s²`.
    pub relative: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 mm linear, 1e-9 relative).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        relative: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
