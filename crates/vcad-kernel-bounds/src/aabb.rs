//! Axis-aligned bounding box.

use serde::{Deserialize, Serialize};
use vcad_kernel_math::{Point3, Vec3};

use crate::{BoundingSphere, PARALLEL_EPS};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Expand the AABB by a tolerance in all directions.
    pub fn expand(&mut self, tol: f64) {
        self.min -= Vec3::repeat(tol);
        self.max += Vec3::repeat(tol);
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Test if a point lies inside or on the box.
    pub fn contains_point(&self, p: &Point3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// The eight corners. Bit `k` of the index selects `max` on axis `k`.
    pub fn corners(&self) -> [Point3; 8] {
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// The twelve edges: four around the top face (`z = max`), four around
    /// the bottom face (`z = min`), then the four vertical edges.
    pub fn edges(&self) -> [(Point3, Point3); 12] {
        let (lo, hi) = (self.min, self.max);
        let p = Point3::new;
        [
            // Top
            (hi, p(lo.x, hi.y, hi.z)),
            (p(lo.x, hi.y, hi.z), p(lo.x, lo.y, hi.z)),
            (p(lo.x, lo.y, hi.z), p(hi.x, lo.y, hi.z)),
            (p(hi.x, lo.y, hi.z), hi),
            // Bottom
            (lo, p(lo.x, hi.y, lo.z)),
            (p(lo.x, hi.y, lo.z), p(hi.x, hi.y, lo.z)),
            (p(hi.x, hi.y, lo.z), p(hi.x, lo.y, lo.z)),
            (p(hi.x, lo.y, lo.z), lo),
            // Vertical
            (lo, p(lo.x, lo.y, hi.z)),
            (p(lo.x, hi.y, lo.z), p(lo.x, hi.y, hi.z)),
            (p(hi.x, hi.y, lo.z), hi),
            (p(hi.x, lo.y, lo.z), p(hi.x, lo.y, hi.z)),
        ]
    }

    /// Intersect the infinite line `origin + t * dir` with the box (slab method).
    ///
    /// Returns `Some((t_min, t_max))`, the parameter interval inside the box,
    /// or `None` if the line misses. `t` is unrestricted in sign. Axes the
    /// line runs parallel to only constrain the origin.
    pub fn intersect_line(&self, origin: &Point3, dir: &Vec3) -> Option<(f64, f64)> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let (o, d) = (origin[axis], dir[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPS {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (mut t1, mut t2) = ((lo - o) * inv, (hi - o) * inv);
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
        }

        if t_max >= t_min {
            Some((t_min, t_max))
        } else {
            None
        }
    }

    /// Test whether the infinite line through `origin` along `dir` touches the box.
    pub fn intersects_line(&self, origin: &Point3, dir: &Vec3) -> bool {
        self.intersect_line(origin, dir).is_some()
    }

    /// Sphere through the corners, centered on the box.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center(), (self.max - self.min).norm() * 0.5)
    }
}
