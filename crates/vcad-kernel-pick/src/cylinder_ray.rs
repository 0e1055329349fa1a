//! Infinite cylindrical ray pick shape.

use serde::{Deserialize, Serialize};
use vcad_kernel_bounds::{Aabb3, BoundingSphere, Bounds, Polytope};
use vcad_kernel_math::{
    line_to_segment_squared, point_to_line_squared, Point3, Point4, Tolerance, Transform, Vec3,
};

use crate::error::{PickError, Result};
use crate::PickShape;

/// An infinite line swept by a disk of fixed radius.
///
/// Models a pick gesture with tolerance: a bounding volume is picked when
/// any part of it comes within `radius` of the axis. The axis passes
/// through `origin` along `direction` and extends both ways. A radius of
/// zero degenerates to a plain line pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickCylinderRay {
    origin: Point3,
    direction: Vec3,
    radius: f64,
}

impl PickCylinderRay {
    /// An empty shape: zero origin, zero direction, zero radius.
    pub fn new() -> Self {
        Self {
            origin: Point3::origin(),
            direction: Vec3::zeros(),
            radius: 0.0,
        }
    }

    /// A shape with the given axis and radius.
    ///
    /// Nothing is validated; `direction` should be non-zero and `radius`
    /// non-negative.
    pub fn with(origin: Point3, direction: Vec3, radius: f64) -> Self {
        Self {
            origin,
            direction,
            radius,
        }
    }

    /// Replace all three parameters at once.
    pub fn set(&mut self, origin: Point3, direction: Vec3, radius: f64) {
        *self = Self::with(origin, direction, radius);
    }

    /// A point on the axis.
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Axis direction, not necessarily unit length.
    pub fn direction(&self) -> &Vec3 {
        &self.direction
    }

    /// Cross-section radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sphere test: grow the sphere by the cylinder radius and test the axis.
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> bool {
        let reach = sphere.radius + self.radius;
        point_to_line_squared(&sphere.center, &self.origin, &self.direction) <= reach * reach
    }

    /// Box test, cheapest checks first.
    pub fn intersect_box(&self, aabb: &Aabb3) -> bool {
        let center = aabb.center();

        // Half diagonal inflated per axis by the radius; loose but enclosing.
        let box_radius_sq: f64 = (0..3)
            .map(|i| {
                let h = center[i] - aabb.min[i] + self.radius;
                h * h
            })
            .sum();

        let dist_sq = point_to_line_squared(&center, &self.origin, &self.direction);
        if dist_sq > box_radius_sq {
            log::trace!("box rejected by enclosing sphere: {dist_sq} > {box_radius_sq}");
            return false;
        }
        if dist_sq < self.radius * self.radius {
            log::trace!("box center inside cylinder");
            return true;
        }

        if aabb.intersects_line(&self.origin, &self.direction) {
            log::trace!("axis hits box");
            return true;
        }

        let radius_sq = self.radius * self.radius;
        let hit = aabb.edges().iter().any(|(a, b)| {
            line_to_segment_squared(&self.origin, &self.direction, a, b) <= radius_sq
        });
        log::trace!("box edge test: {hit}");
        hit
    }

    /// Polytope test with an explicit tolerance for the edge filter.
    ///
    /// Edges are not stored, so every vertex pair is a candidate and pairs
    /// whose midpoint is off the boundary (interior diagonals) are skipped.
    pub fn intersect_polytope(&self, polytope: &Polytope, tol: &Tolerance) -> bool {
        let sphere = polytope.bounding_sphere();
        let reach = sphere.radius + self.radius;
        let dist_sq = point_to_line_squared(&sphere.center, &self.origin, &self.direction);
        if dist_sq > reach * reach {
            log::trace!("polytope rejected by enclosing sphere: {dist_sq} > {}", reach * reach);
            return false;
        }

        if polytope.intersects_line(&self.origin, &self.direction) {
            log::trace!("axis hits polytope");
            return true;
        }

        let radius_sq = self.radius * self.radius;
        let vertices = polytope.vertices();
        for (i, a) in vertices.iter().enumerate() {
            for b in &vertices[i + 1..] {
                let mid = nalgebra::center(a, b);
                if !polytope.is_on_surface(&mid, tol) {
                    continue;
                }
                if line_to_segment_squared(&self.origin, &self.direction, a, b) <= radius_sq {
                    log::trace!("polytope edge {a:?} -> {b:?} within radius");
                    return true;
                }
            }
        }
        false
    }

    /// Like [`PickShape::transform`], but accepts any transform and scales
    /// the radius by the transform's largest stretch factor.
    ///
    /// Under non-uniform scale the transformed cross-section is an ellipse;
    /// the result is a round cylinder enclosing it.
    pub fn transform_conservative(&self, t: &Transform) -> Self {
        self.transformed(t, t.max_scale())
    }

    fn transformed(&self, t: &Transform, scale: f64) -> Self {
        let mut origin = self.origin;
        let mut end = self.origin + self.direction;
        t.apply_point_mut(&mut origin);
        t.apply_point_mut(&mut end);

        // Difference of transformed points drops the translation.
        let direction = (end - origin).try_normalize(0.0).unwrap_or_else(Vec3::zeros);

        Self {
            origin,
            direction,
            radius: self.radius * scale,
        }
    }
}

impl Default for PickCylinderRay {
    fn default() -> Self {
        Self::new()
    }
}

impl PickShape for PickCylinderRay {
    /// Never writes `pick_pos`: the test only decides whether the
    /// cylinder and the volume overlap.
    fn intersect(&self, bounds: &Bounds, _pick_pos: &mut Point4) -> bool {
        match bounds {
            Bounds::Sphere(sphere) => self.intersect_sphere(sphere),
            Bounds::Box(aabb) => self.intersect_box(aabb),
            Bounds::Polytope(polytope) => self.intersect_polytope(polytope, &Tolerance::DEFAULT),
        }
    }

    /// Rejects transforms without a single uniform scale factor.
    fn transform(&self, t: &Transform) -> Result<Self> {
        let Some(scale) = t.uniform_scale(Tolerance::DEFAULT.relative) else {
            let max_scale = t.max_scale();
            log::debug!("refusing to transform cylinder ray by non-uniform scale (max {max_scale})");
            return Err(PickError::NonUniformScale { max_scale });
        };
        Ok(self.transformed(t, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vcad_kernel_bounds::Plane;

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    fn down(x: f64, y: f64, radius: f64) -> PickCylinderRay {
        PickCylinderRay::with(Point3::new(x, y, 5.0), Vec3::new(0.0, 0.0, -1.0), radius)
    }

    /// Octahedron |x| + |y| + |z| <= 1.
    fn octahedron() -> Polytope {
        let mut planes = Vec::new();
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    planes.push(Plane::new(Vec3::new(sx, sy, sz), -1.0));
                }
            }
        }
        Polytope::from_planes(planes, &Tolerance::DEFAULT).unwrap()
    }

    #[test]
    fn test_default_is_empty() {
        let p = PickCylinderRay::default();
        assert_eq!(*p.origin(), Point3::origin());
        assert_eq!(*p.direction(), Vec3::zeros());
        assert_eq!(p.radius(), 0.0);
    }

    #[test]
    fn test_set_replaces_everything() {
        let mut p = PickCylinderRay::with(Point3::new(1.0, 1.0, 1.0), Vec3::x(), 2.0);
        p.set(Point3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 3.0), 0.25);
        assert_eq!(*p.origin(), Point3::new(0.0, 2.0, 0.0));
        assert_eq!(*p.direction(), Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(p.radius(), 0.25);
    }

    #[test]
    fn test_sphere_hit_and_miss() {
        let sphere = BoundingSphere::new(Point3::origin(), 1.0);
        let hit = PickCylinderRay::with(Point3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 0.5);
        assert!(hit.intersect_sphere(&sphere));
        let miss = PickCylinderRay::with(Point3::new(0.0, 5.0, 0.0), Vec3::x(), 0.4);
        assert!(!miss.intersect_sphere(&sphere));
    }

    #[test]
    fn test_sphere_grazed_by_radius() {
        let sphere = BoundingSphere::new(Point3::origin(), 1.0);
        // Axis passes 1.4 from the center
        assert!(down(1.4, 0.0, 0.5).intersect_sphere(&sphere));
        assert!(!down(1.4, 0.0, 0.3).intersect_sphere(&sphere));
    }

    #[test]
    fn test_box_far_away_rejected() {
        assert!(!down(10.0, 10.0, 1.0).intersect_box(&unit_box()));
    }

    #[test]
    fn test_box_center_inside_cylinder() {
        // Axis misses the box entirely but the radius swallows its center.
        let small = Aabb3::new(Point3::new(-0.1, -0.1, -0.1), Point3::new(0.1, 0.1, 0.1));
        let p = PickCylinderRay::with(Point3::new(0.0, 0.5, 0.0), Vec3::x(), 1.0);
        assert!(p.intersect_box(&small));
    }

    #[test]
    fn test_box_axis_through_face() {
        assert!(down(0.9, -0.9, 0.0).intersect_box(&unit_box()));
    }

    #[test]
    fn test_box_edge_grazed() {
        // Axis runs parallel to the vertical edge at (1, 1), 0.2 away diagonally.
        let off = 1.0 + 0.2 / 2f64.sqrt();
        assert!(down(off, off, 0.25).intersect_box(&unit_box()));
        assert!(!down(off, off, 0.15).intersect_box(&unit_box()));
    }

    #[test]
    fn test_box_near_face_not_edge() {
        // Axis 0.3 outside the +x face, mid-span: only the edges at x = 1 are
        // candidates and they are 0.3 away.
        let p = down(1.3, 0.0, 0.35);
        assert!(p.intersect_box(&unit_box()));
        let q = down(1.3, 0.0, 0.25);
        assert!(!q.intersect_box(&unit_box()));
    }

    #[test]
    fn test_polytope_axis_hits() {
        assert!(down(0.1, 0.1, 0.0).intersect_polytope(&octahedron(), &Tolerance::DEFAULT));
    }

    #[test]
    fn test_polytope_edge_grazed() {
        // Edge from (1,0,0) to (0,1,0); its closest point to the axis
        // x = y = 0.5 + d is (0.5, 0.5, 0) at distance d * sqrt(2).
        let d = 0.1;
        let axis = down(0.5 + d, 0.5 + d, 0.0);
        assert!(!axis.intersect_polytope(&octahedron(), &Tolerance::DEFAULT));

        let hit = down(0.5 + d, 0.5 + d, 0.15);
        assert!(hit.intersect_polytope(&octahedron(), &Tolerance::DEFAULT));
        let miss = down(0.5 + d, 0.5 + d, 0.13);
        assert!(!miss.intersect_polytope(&octahedron(), &Tolerance::DEFAULT));
    }

    #[test]
    fn test_polytope_edges_after_first_vertex_are_tested() {
        // The grazed edge joins neither the first nor the last vertex pair in
        // enumeration order; every pair must be visited.
        let poly = octahedron();
        let vertices = poly.vertices();
        let top = vertices.iter().position(|v| v.z > 0.5).unwrap();
        let side = vertices
            .iter()
            .position(|v| v.x < -0.5)
            .unwrap();
        let (a, b) = (vertices[top], vertices[side]);
        // Line parallel to y, offset outward from the edge midpoint.
        let mid = nalgebra::center(&a, &b);
        let outward = Vec3::new(-1.0, 0.0, 1.0).normalize() * 0.1;
        let p = PickCylinderRay::with(mid + outward, Vec3::y(), 0.11);
        assert!(p.intersect_polytope(&poly, &Tolerance::DEFAULT));
        let q = PickCylinderRay::with(mid + outward, Vec3::y(), 0.09);
        assert!(!q.intersect_polytope(&poly, &Tolerance::DEFAULT));
    }

    #[test]
    fn test_polytope_far_away_rejected() {
        assert!(!down(5.0, 5.0, 1.0).intersect_polytope(&octahedron(), &Tolerance::DEFAULT));
    }

    #[test]
    fn test_intersect_leaves_pick_pos_alone() {
        let mut pos = Point4::new(1.0, 2.0, 3.0, 4.0);
        let bounds = Bounds::Box(unit_box());
        assert!(down(0.0, 0.0, 0.1).intersect(&bounds, &mut pos));
        assert_eq!(pos, Point4::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_transform_translation_and_scale() {
        let p = PickCylinderRay::with(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 4.0), 0.5);
        let t = Transform::translation(0.0, 3.0, 0.0).then(&Transform::uniform(2.0));
        let q = p.transform(&t).unwrap();
        assert_relative_eq!(*q.origin(), Point3::new(2.0, 3.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(*q.direction(), Vec3::z(), epsilon = 1e-12);
        assert_relative_eq!(q.radius(), 1.0, epsilon = 1e-12);
        // Receiver untouched
        assert_eq!(p.radius(), 0.5);
    }

    #[test]
    fn test_transform_rejects_non_uniform_scale() {
        let p = down(0.0, 0.0, 1.0);
        let err = p.transform(&Transform::scale(1.0, 3.0, 1.0)).unwrap_err();
        match err {
            PickError::NonUniformScale { max_scale } => assert_relative_eq!(max_scale, 3.0, epsilon = 1e-9),
        }
    }

    #[test]
    fn test_transform_rejects_non_uniform_scale_far_from_one() {
        let p = down(0.0, 0.0, 1.0);
        for t in [Transform::scale(1e-5, 2e-5, 1e-5), Transform::scale(1e6, 1e6, 1.001e6)] {
            assert!(matches!(p.transform(&t), Err(PickError::NonUniformScale { .. })), "{t:?}");
        }
    }

    #[test]
    fn test_transform_conservative_uses_largest_scale() {
        let p = down(0.0, 0.0, 1.0);
        let q = p.transform_conservative(&Transform::scale(1.0, 3.0, 2.0));
        assert_relative_eq!(q.radius(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(*q.direction(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_transform_of_empty_shape_stays_finite() {
        let q = PickCylinderRay::new().transform(&Transform::rotation_x(0.5)).unwrap();
        assert_eq!(*q.direction(), Vec3::zeros());
        assert_eq!(q.radius(), 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let p = PickCylinderRay::with(Point3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 1.0, 0.0), 0.75);
        let json = serde_json::to_string(&p).unwrap();
        let back: PickCylinderRay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
