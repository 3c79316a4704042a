// math/mod.rs
//
// Small planar geometry helpers shared by the path and stroke code.
// No dependencies on the scene or action systems — just math.

use glam::Vec2;

/// Tolerance used for parallel-line detection and miter-limit comparisons.
/// Both checks share the same value so near-degenerate joints cannot flap
/// between miter and bevel output.
pub const EPSILON: f32 = 1e-4;

/// Twice the signed area of the triangle (a, b, c).
///
/// Positive for one winding, negative for the other; zero for collinear
/// points. The sign picks the outward side at a stroke joint.
#[inline]
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Intersection of the infinite lines (p0, p1) and (p2, p3).
///
/// Returns `None` when the lines are parallel within [`EPSILON`].
pub fn line_intersection(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Option<Vec2> {
    let d0 = p1 - p0;
    let d1 = p3 - p2;
    let det = d0.x * d1.y - d1.x * d0.y;
    if det.abs() < EPSILON {
        return None;
    }
    let t = ((p2.x - p0.x) * d1.y - (p2.y - p0.y) * d1.x) / det;
    Some(p0 + d0 * t)
}

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_area_signs() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        let c = Vec2::new(0.0, 1.0);
        assert!(signed_area(a, b, c) > 0.0);
        assert!(signed_area(a, c, b) < 0.0);
        assert_eq!(signed_area(a, b, Vec2::new(2.0, 0.0)), 0.0);
    }

    #[test]
    fn crossing_lines_intersect() {
        let p = line_intersection(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
        )
        .unwrap();
        assert!(p.distance(Vec2::ZERO) < 1e-6);
    }

    #[test]
    fn parallel_lines_return_none() {
        let p = line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        );
        assert!(p.is_none());
    }

    #[test]
    fn intersection_off_segment_is_still_found() {
        // Lines are infinite; the crossing point may lie past the endpoints.
        let p = line_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(5.0, 1.0),
            Vec2::new(5.0, 2.0),
        )
        .unwrap();
        assert!(p.distance(Vec2::new(5.0, 0.0)) < 1e-5);
    }
}
