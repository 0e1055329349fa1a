//! Convex polytope bounded by half-spaces.
//!
//! The polytope is stored both as its planes and as the hull vertices
//! derived from them. Planes drive the containment and line tests;
//! vertices drive the bounding sphere and the edge search in picking.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use vcad_kernel_math::{Point3, Tolerance, Vec3};

use crate::error::{BoundsError, Result};
use crate::{Aabb3, BoundingSphere, PARALLEL_EPS};

/// A plane `normal · p + offset = 0` with a unit normal.
///
/// Points with a negative signed distance are inside the half-space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Outward unit normal.
    pub normal: Vec3,
    /// Offset so that `normal · p + offset` is the signed distance.
    pub offset: f64,
}

impl Plane {
    /// Create a plane from `normal · p + offset = 0`.
    ///
    /// The equation is rescaled so the normal has unit length. A zero
    /// normal is kept as is and reported by [`Plane::is_degenerate`].
    pub fn new(normal: Vec3, offset: f64) -> Self {
        let len = normal.norm();
        if len > 0.0 {
            Self {
                normal: normal / len,
                offset: offset / len,
            }
        } else {
            Self { normal, offset }
        }
    }

    /// Plane through `point` with outward `normal`.
    pub fn from_point_normal(point: &Point3, normal: &Vec3) -> Self {
        Self::new(*normal, -normal.dot(&point.coords))
    }

    /// Whether the normal has zero length.
    pub fn is_degenerate(&self) -> bool {
        self.normal.norm_squared() == 0.0
    }

    /// Signed distance from the plane, negative inside.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) + self.offset
    }
}

/// A closed convex polytope, the intersection of a set of half-spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Plane>", into = "Vec<Plane>")]
pub struct Polytope {
    planes: Vec<Plane>,
    vertices: Vec<Point3>,
}

impl Polytope {
    /// Build a polytope from its bounding half-spaces.
    ///
    /// Hull vertices are found by intersecting every triple of planes and
    /// keeping the points inside all half-spaces, merged within
    /// `tol.linear`.
    pub fn from_planes(planes: Vec<Plane>, tol: &Tolerance) -> Result<Self> {
        if planes.len() < 4 {
            return Err(BoundsError::TooFewPlanes(planes.len()));
        }
        if let Some(i) = planes.iter().position(Plane::is_degenerate) {
            return Err(BoundsError::DegeneratePlane(i));
        }

        let mut vertices: Vec<Point3> = Vec::new();
        let n = planes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let Some(p) = three_plane_point(&planes[i], &planes[j], &planes[k]) else {
                        continue;
                    };
                    if !planes.iter().all(|pl| pl.signed_distance(&p) <= tol.linear) {
                        continue;
                    }
                    if !vertices.iter().any(|v| tol.points_equal(v, &p)) {
                        vertices.push(p);
                    }
                }
            }
        }

        if vertices.is_empty() {
            return Err(BoundsError::EmptyPolytope);
        }

        log::debug!(
            "built polytope from {} planes with {} vertices",
            planes.len(),
            vertices.len()
        );
        Ok(Self { planes, vertices })
    }

    /// The six half-spaces of an axis-aligned box.
    pub fn from_aabb(aabb: &Aabb3) -> Self {
        let planes = vec![
            Plane::new(-Vec3::x(), aabb.min.x),
            Plane::new(Vec3::x(), -aabb.max.x),
            Plane::new(-Vec3::y(), aabb.min.y),
            Plane::new(Vec3::y(), -aabb.max.y),
            Plane::new(-Vec3::z(), aabb.min.z),
            Plane::new(Vec3::z(), -aabb.max.z),
        ];
        Self {
            planes,
            vertices: aabb.corners().to_vec(),
        }
    }

    /// Bounding half-spaces.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Hull vertices.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Number of hull vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Test if a point lies inside the polytope or within `tol.linear` of it.
    pub fn contains_point(&self, p: &Point3, tol: &Tolerance) -> bool {
        self.planes.iter().all(|pl| pl.signed_distance(p) <= tol.linear)
    }

    /// Test if a point lies on the boundary: inside every half-space and on
    /// at least one plane, both within `tol.linear`.
    pub fn is_on_surface(&self, p: &Point3, tol: &Tolerance) -> bool {
        let mut on_plane = false;
        for pl in &self.planes {
            let d = pl.signed_distance(p);
            if d > tol.linear {
                return false;
            }
            on_plane |= d.abs() <= tol.linear;
        }
        on_plane
    }

    /// Clip the infinite line `origin + t * dir` against every half-space.
    ///
    /// Returns the parameter interval `(t_enter, t_exit)` inside the
    /// polytope, or `None` if the line misses.
    pub fn intersect_line(&self, origin: &Point3, dir: &Vec3) -> Option<(f64, f64)> {
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;

        for pl in &self.planes {
            let num = pl.signed_distance(origin);
            let denom = pl.normal.dot(dir);

            if denom.abs() < PARALLEL_EPS {
                // Parallel: the whole line is on one side.
                if num > 0.0 {
                    return None;
                }
                continue;
            }

            let t = -num / denom;
            if denom < 0.0 {
                t_enter = t_enter.max(t);
            } else {
                t_exit = t_exit.min(t);
            }
            if t_enter > t_exit {
                return None;
            }
        }

        Some((t_enter, t_exit))
    }

    /// Test whether the infinite line through `origin` along `dir` touches the polytope.
    pub fn intersects_line(&self, origin: &Point3, dir: &Vec3) -> bool {
        self.intersect_line(origin, dir).is_some()
    }

    /// Sphere enclosing all hull vertices.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::from_points(&self.vertices)
    }
}

impl TryFrom<Vec<Plane>> for Polytope {
    type Error = BoundsError;

    fn try_from(planes: Vec<Plane>) -> Result<Self> {
        Self::from_planes(planes, &Tolerance::DEFAULT)
    }
}

impl From<Polytope> for Vec<Plane> {
    fn from(polytope: Polytope) -> Self {
        polytope.planes
    }
}

/// Common point of three planes, if their normals are independent.
fn three_plane_point(a: &Plane, b: &Plane, c: &Plane) -> Option<Point3> {
    let m = Matrix3::from_rows(&[
        a.normal.transpose(),
        b.normal.transpose(),
        c.normal.transpose(),
    ]);
    if m.determinant().abs() < 1e-12 {
        return None;
    }
    let rhs = Vec3::new(-a.offset, -b.offset, -c.offset);
    m.lu().solve(&rhs).map(Point3::from)
}
