//! Squared-distance primitives between points, infinite lines and segments.
//!
//! Line directions need not be unit length. All results are squared
//! Euclidean distances so callers can compare against squared radii
//! without a square root.

use crate::{Point3, Vec3};

/// Squared norm below which a direction or segment is treated as a point.
const DEGENERATE_SQ: f64 = 1e-24;

/// Squared distance from `point` to the infinite line through `line_origin`
/// along `line_dir`.
///
/// A zero-length `line_dir` degenerates to the squared distance between
/// `point` and `line_origin`.
pub fn point_to_line_squared(point: &Point3, line_origin: &Point3, line_dir: &Vec3) -> f64 {
    let to_point = point - line_origin;
    let dd = line_dir.norm_squared();
    if dd < DEGENERATE_SQ {
        return to_point.norm_squared();
    }
    let t = to_point.dot(line_dir) / dd;
    (to_point - t * line_dir).norm_squared()
}

/// Squared minimum distance between the infinite line through `line_origin`
/// along `line_dir` and the closed segment `[seg_a, seg_b]`.
pub fn line_to_segment_squared(
    line_origin: &Point3,
    line_dir: &Vec3,
    seg_a: &Point3,
    seg_b: &Point3,
) -> f64 {
    let (on_line, on_segment) = closest_points_line_segment(line_origin, line_dir, seg_a, seg_b);
    (on_line - on_segment).norm_squared()
}

/// Closest pair of points between an infinite line and a closed segment.
///
/// Returns `(point_on_line, point_on_segment)`. When the line and segment
/// are parallel every point of the segment is equally close; `seg_a` is
/// chosen.
pub fn closest_points_line_segment(
    line_origin: &Point3,
    line_dir: &Vec3,
    seg_a: &Point3,
    seg_b: &Point3,
) -> (Point3, Point3) {
    let (s, t) = line_segment_params(line_origin, line_dir, seg_a, seg_b);
    (line_origin + s * line_dir, seg_a + t * (seg_b - seg_a))
}

/// Parameters `(s, t)` of the closest points `line_origin + s * line_dir`
/// and `seg_a + t * (seg_b - seg_a)` with `t` in `[0, 1]`.
fn line_segment_params(
    line_origin: &Point3,
    line_dir: &Vec3,
    seg_a: &Point3,
    seg_b: &Point3,
) -> (f64, f64) {
    let e = seg_b - seg_a;
    let r = line_origin - seg_a;

    let a = line_dir.norm_squared();
    let b = line_dir.dot(&e);
    let c = e.norm_squared();
    let d = line_dir.dot(&r);
    let f = e.dot(&r);

    if a < DEGENERATE_SQ {
        // Line is a point: project it onto the segment.
        let t = if c < DEGENERATE_SQ { 0.0 } else { (f / c).clamp(0.0, 1.0) };
        return (0.0, t);
    }
    if c < DEGENERATE_SQ {
        return (-d / a, 0.0);
    }

    // Minimize |r + s*dir - t*e|^2; the line is unbounded so only t clamps.
    let denom = a * c - b * b;
    let t = if denom <= DEGENERATE_SQ * a * c {
        0.0
    } else {
        ((a * f - b * d) / denom).clamp(0.0, 1.0)
    };
    let s = (t * b - d) / a;
    (s, t)
}
