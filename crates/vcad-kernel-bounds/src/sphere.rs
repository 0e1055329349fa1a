//! Bounding sphere.

use serde::{Deserialize, Serialize};
use vcad_kernel_math::{point_to_line_squared, Point3, Vec3};

use crate::Aabb3;

/// A sphere enclosing some geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius of the sphere.
    pub radius: f64,
}

impl BoundingSphere {
    /// Create a sphere from center and radius.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere centered on the points' AABB center that encloses them all.
    ///
    /// Not the minimal enclosing sphere, but never smaller than it needs to be.
    /// An empty slice gives a zero-radius sphere at the origin.
    pub fn from_points(points: &[Point3]) -> Self {
        if points.is_empty() {
            return Self::new(Point3::origin(), 0.0);
        }
        let mut aabb = Aabb3::empty();
        for p in points {
            aabb.include_point(p);
        }
        let center = aabb.center();
        let radius_sq = points
            .iter()
            .map(|p| (p - center).norm_squared())
            .fold(0.0, f64::max);
        Self::new(center, radius_sq.sqrt())
    }

    /// Test whether a point lies inside or on the sphere.
    pub fn contains_point(&self, p: &Point3) -> bool {
        (p - self.center).norm_squared() <= self.radius * self.radius
    }

    /// Test whether the infinite line through `origin` along `dir` touches the sphere.
    pub fn intersects_line(&self, origin: &Point3, dir: &Vec3) -> bool {
        point_to_line_squared(&self.center, origin, dir) <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points_encloses_all() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
            Point3::new(1.0, 1.0, 6.0),
        ];
        let s = BoundingSphere::from_points(&pts);
        assert_relative_eq!(s.center, Point3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
        for p in &pts {
            assert!(s.contains_point(p));
        }
    }

    #[test]
    fn test_from_no_points() {
        let s = BoundingSphere::from_points(&[]);
        assert_eq!(s.radius, 0.0);
    }

    #[test]
    fn test_line_hits_sphere_behind_origin() {
        let s = BoundingSphere::new(Point3::origin(), 1.0);
        // The sphere lies at negative t; the line still passes through it.
        assert!(s.intersects_line(&Point3::new(5.0, 0.0, 0.0), &Vec3::x()));
    }

    #[test]
    fn test_line_tangent_and_miss() {
        let s = BoundingSphere::new(Point3::origin(), 1.0);
        assert!(s.intersects_line(&Point3::new(0.0, 1.0, 5.0), &Vec3::z()));
        assert!(!s.intersects_line(&Point3::new(0.0, 1.01, 5.0), &Vec3::z()));
    }
}
