//! Stroke tessellation: a polyline plus width/cap/join attributes becomes a
//! triangle list ready for GPU upload.
//!
//! Each interior point of the polyline is turned into a joint by offsetting
//! the two adjacent spans by half the line width and intersecting the offset
//! lines. The intersection ("anchor") trims the inner side of both quads;
//! the outer side gets the requested join geometry. Degenerate joints —
//! parallel offset lines, anchors that overshoot a span, miter ratios past
//! the limit — fall back to bevel output instead of erroring, since organic
//! path data produces them constantly.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::{line_intersection, midpoint, signed_area, EPSILON};

/// Geometry added at the two open ends of a stroked polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cap {
    /// Stroke stops exactly at the endpoint.
    #[default]
    Butt,
    /// Semicircle over the endpoint.
    Round,
    /// Half-width extension past the endpoint.
    Square,
}

/// Geometry used at interior polyline vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Join {
    /// Flat corner: the two quads' outer corners are connected directly.
    Bevel,
    /// Triangle fan approximating an arc between the offset directions.
    Round,
    /// Sharp corner reaching the offset-line intersection, subject to the
    /// miter limit.
    #[default]
    Miter,
}

/// Stroke configuration. Pure value, no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeAttributes {
    /// Full stroke width in world units.
    pub width: f32,
    pub cap: Cap,
    pub join: Join,
    /// Maximum ratio of miter length to half-width before a joint is
    /// downgraded to bevel.
    pub miter_limit: f32,
}

impl Default for StrokeAttributes {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: Cap::Butt,
            join: Join::Miter,
            miter_limit: 10.0,
        }
    }
}

impl StrokeAttributes {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: Join) -> Self {
        self.join = join;
        self
    }

    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit;
        self
    }
}

/// Tessellate a stroked polyline into a flat triangle list (3 vertices per
/// triangle).
///
/// Fewer than two distinct points produce no geometry — a documented no-op,
/// not an error. A two-point polyline is always emitted as a bevel-joined
/// quad whatever join was requested; there is no curvature to miter. A
/// polyline whose first and last points coincide is stroked as a closed ring:
/// the seam gets a joint and no caps are added.
pub fn stroke_geometry(points: &[Vec2], attrs: &StrokeAttributes) -> Vec<Vec2> {
    if attrs.width <= 0.0 {
        return Vec::new();
    }

    // Collapse zero-length spans up front so no direction normalizes to NaN.
    let mut pts: Vec<Vec2> = Vec::with_capacity(points.len());
    for &p in points {
        if pts
            .last()
            .map_or(true, |&q| q.distance_squared(p) > EPSILON * EPSILON)
        {
            pts.push(p);
        }
    }
    if pts.len() < 2 {
        return Vec::new();
    }

    let half_width = attrs.width * 0.5;
    let mut verts = Vec::new();

    let closed =
        pts.len() >= 4 && pts[0].distance_squared(pts[pts.len() - 1]) <= EPSILON * EPSILON;

    if pts.len() == 2 {
        let mid = midpoint(pts[0], pts[1]);
        create_triangles(
            pts[0],
            mid,
            pts[1],
            &mut verts,
            half_width,
            Join::Bevel,
            attrs.miter_limit,
        );
    } else if closed {
        pts.pop();
        let n = pts.len();
        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            create_triangles(
                midpoint(prev, pts[i]),
                pts[i],
                midpoint(pts[i], next),
                &mut verts,
                half_width,
                attrs.join,
                attrs.miter_limit,
            );
        }
    } else {
        // Split every span at its midpoint so each interior point becomes
        // exactly one joint.
        let n = pts.len();
        for i in 1..n - 1 {
            let a = if i == 1 {
                pts[0]
            } else {
                midpoint(pts[i - 1], pts[i])
            };
            let b = if i == n - 2 {
                pts[n - 1]
            } else {
                midpoint(pts[i], pts[i + 1])
            };
            create_triangles(
                a,
                pts[i],
                b,
                &mut verts,
                half_width,
                attrs.join,
                attrs.miter_limit,
            );
        }
    }

    if !closed {
        add_caps(&pts, attrs.cap, half_width, &mut verts);
    }

    verts
}

/// Emit the geometry for one joint: the two half-span quads plus the join
/// wedge between them.
fn create_triangles(
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    out: &mut Vec<Vec2>,
    half_width: f32,
    join: Join,
    miter_limit: f32,
) {
    let d01 = p1 - p0;
    let d12 = p2 - p1;
    let l01 = d01.length();
    let l12 = d12.length();

    // A collapsed span leaves no joint; keep whatever quad survives.
    if l01 <= EPSILON && l12 <= EPSILON {
        return;
    }
    if l01 <= EPSILON {
        span_quad(p1, p2, half_width, out);
        return;
    }
    if l12 <= EPSILON {
        span_quad(p0, p1, half_width, out);
        return;
    }

    let mut t0 = d01.perp() / l01 * half_width;
    let mut t1 = d12.perp() / l12 * half_width;

    // Keep the offsets on the outer side of the turn for both windings.
    if signed_area(p0, p1, p2) > 0.0 {
        t0 = -t0;
        t1 = -t1;
    }

    let intersection = line_intersection(p0 + t0, p1 + t0, p2 + t1, p1 + t1);
    let (anchor, anchor_len) = match intersection {
        Some(ip) => (ip - p1, (ip - p1).length()),
        None => (Vec2::ZERO, f32::MAX),
    };
    // Parallel detection and this ratio share EPSILON so near-degenerate
    // joints cannot flap between miter and bevel.
    let miter_fits = intersection.is_some() && anchor_len / half_width < miter_limit - EPSILON;

    if anchor_len > l01 || anchor_len > l12 {
        // The anchor overshoots a span (or the offsets are parallel): emit
        // untrimmed quads and a standalone wedge.
        out.extend([p0 + t0, p0 - t0, p1 + t0]);
        out.extend([p0 - t0, p1 + t0, p1 - t0]);

        match join {
            Join::Round => round_fan(p1, p1 + t0, p1 + t1, p2, out),
            Join::Miter if miter_fits => {
                let ip = p1 + anchor;
                out.extend([ip, p1 + t0, p1 + t1]);
                out.extend([p1, p1 + t0, p1 + t1]);
            }
            _ => out.extend([p1, p1 + t0, p1 + t1]),
        }

        out.extend([p2 + t1, p1 - t1, p1 + t1]);
        out.extend([p2 + t1, p1 - t1, p2 - t1]);
    } else {
        // Anchor-trimmed: both quads share the inner corner.
        let inner = p1 - anchor;

        out.extend([p0 + t0, p0 - t0, inner]);
        out.extend([p0 + t0, inner, p1 + t0]);

        match join {
            Join::Round => {
                let a = p1 + t0;
                let b = p1 + t1;
                out.extend([a, p1, inner]);
                round_fan(p1, a, b, inner, out);
                out.extend([p1, b, inner]);
            }
            Join::Miter if miter_fits => {
                let ip = p1 + anchor;
                out.extend([ip, p1 + t0, p1 + t1]);
                out.extend([inner, p1 + t0, p1 + t1]);
            }
            _ => out.extend([inner, p1 + t0, p1 + t1]),
        }

        out.extend([p2 + t1, inner, p1 + t1]);
        out.extend([p2 + t1, inner, p2 - t1]);
    }
}

/// Plain quad over one span, used when the neighboring span collapsed.
fn span_quad(a: Vec2, b: Vec2, half_width: f32, out: &mut Vec<Vec2>) {
    let d = b - a;
    let l = d.length();
    if l <= EPSILON {
        return;
    }
    let t = d.perp() / l * half_width;
    out.extend([a + t, a - t, b + t]);
    out.extend([a - t, b + t, b - t]);
}

/// Triangle fan approximating the arc from `p_from` to `p_to` around
/// `center`. When the arc is a full semicircle the rotation direction is
/// ambiguous; it is resolved to open away from `away_from`.
fn round_fan(center: Vec2, p_from: Vec2, p_to: Vec2, away_from: Vec2, out: &mut Vec<Vec2>) {
    let v0 = p_from - center;
    let v1 = p_to - center;
    let radius = v0.length();
    if radius <= EPSILON {
        return;
    }

    let a0 = v0.y.atan2(v0.x);
    let a1 = v1.y.atan2(v1.x);
    let mut diff = a1 - a0;
    if diff > PI {
        diff -= TAU;
    } else if diff < -PI {
        diff += TAU;
    }
    if (diff.abs() - PI).abs() < EPSILON {
        let fan_mid = center + Vec2::from_angle(a0 + diff * 0.5) * radius;
        if (fan_mid - center).dot(away_from - center) > 0.0 {
            diff = -diff;
        }
    }

    // Segment count targets ~7 world units of arc per triangle, minimum 1.
    let nsegs = ((diff.abs() * radius) / 7.0).floor() as usize + 1;
    let inc = diff / nsegs as f32;
    for i in 0..nsegs {
        out.push(center);
        out.push(center + Vec2::from_angle(a0 + inc * i as f32) * radius);
        out.push(center + Vec2::from_angle(a0 + inc * (i + 1) as f32) * radius);
    }
}

fn add_caps(pts: &[Vec2], cap: Cap, half_width: f32, out: &mut Vec<Vec2>) {
    if matches!(cap, Cap::Butt) {
        return;
    }
    let n = pts.len();

    let start_dir = (pts[1] - pts[0]).normalize_or_zero();
    let end_dir = (pts[n - 1] - pts[n - 2]).normalize_or_zero();
    if start_dir == Vec2::ZERO || end_dir == Vec2::ZERO {
        return;
    }

    let start_perp = start_dir.perp() * half_width;
    let end_perp = end_dir.perp() * half_width;

    match cap {
        Cap::Butt => {}
        Cap::Round => {
            round_fan(pts[0], pts[0] + start_perp, pts[0] - start_perp, pts[1], out);
            round_fan(
                pts[n - 1],
                pts[n - 1] + end_perp,
                pts[n - 1] - end_perp,
                pts[n - 2],
                out,
            );
        }
        Cap::Square => {
            square_cap(
                pts[0] + start_perp,
                pts[0] - start_perp,
                -start_dir * half_width,
                out,
            );
            square_cap(
                pts[n - 1] + end_perp,
                pts[n - 1] - end_perp,
                end_dir * half_width,
                out,
            );
        }
    }
}

/// Extension quad past an endpoint: the two stroke corners pushed out along
/// the line direction.
fn square_cap(c0: Vec2, c1: Vec2, ext: Vec2, out: &mut Vec<Vec2>) {
    out.extend([c0, c0 + ext, c1 + ext]);
    out.extend([c0, c1 + ext, c1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_all_finite(verts: &[Vec2]) {
        for v in verts {
            assert!(v.x.is_finite() && v.y.is_finite(), "non-finite vertex {v:?}");
        }
    }

    #[test]
    fn empty_and_single_point_produce_nothing() {
        let attrs = StrokeAttributes::new(10.0);
        assert!(stroke_geometry(&[], &attrs).is_empty());
        assert!(stroke_geometry(&[Vec2::ZERO], &attrs).is_empty());
        // Coincident points collapse to a single point.
        assert!(stroke_geometry(&[Vec2::ZERO, Vec2::ZERO], &attrs).is_empty());
    }

    #[test]
    fn zero_width_produces_nothing() {
        let attrs = StrokeAttributes::new(0.0);
        assert!(stroke_geometry(&[Vec2::ZERO, Vec2::new(10.0, 0.0)], &attrs).is_empty());
    }

    #[test]
    fn two_points_become_a_bevel_quad_even_under_miter() {
        let attrs = StrokeAttributes::new(10.0).with_join(Join::Miter);
        let verts = stroke_geometry(&[Vec2::ZERO, Vec2::new(10.0, 0.0)], &attrs);

        assert!(!verts.is_empty());
        assert_eq!(verts.len() % 3, 0);
        assert_all_finite(&verts);
        // No miter spike: with a butt cap everything stays inside the
        // rectangle spanned by the segment plus half the width.
        for v in &verts {
            assert!(v.x >= -1e-3 && v.x <= 10.0 + 1e-3);
            assert!(v.y >= -5.0 - 1e-3 && v.y <= 5.0 + 1e-3);
        }
    }

    #[test]
    fn square_cap_extends_past_the_endpoints() {
        let butt = stroke_geometry(
            &[Vec2::ZERO, Vec2::new(10.0, 0.0)],
            &StrokeAttributes::new(10.0),
        );
        let square = stroke_geometry(
            &[Vec2::ZERO, Vec2::new(10.0, 0.0)],
            &StrokeAttributes::new(10.0).with_cap(Cap::Square),
        );
        // Two extra quads = 12 extra vertices.
        assert_eq!(square.len(), butt.len() + 12);
        assert!(square.iter().any(|v| v.x < -4.9));
        assert!(square.iter().any(|v| v.x > 14.9));
    }

    #[test]
    fn round_cap_adds_fans_at_both_ends() {
        let butt = stroke_geometry(
            &[Vec2::ZERO, Vec2::new(10.0, 0.0)],
            &StrokeAttributes::new(10.0),
        );
        let round = stroke_geometry(
            &[Vec2::ZERO, Vec2::new(10.0, 0.0)],
            &StrokeAttributes::new(10.0).with_cap(Cap::Round),
        );
        assert!(round.len() > butt.len());
        assert_all_finite(&round);
        // The fan reaches past the endpoint but never past the radius.
        let max_x = round.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        assert!(max_x > 10.0 && max_x <= 15.0 + 1e-3);
    }

    #[test]
    fn right_angle_miter_reaches_the_intersection() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(50.0, 50.0),
        ];
        let attrs = StrokeAttributes::new(10.0).with_join(Join::Miter);
        let verts = stroke_geometry(&pts, &attrs);
        assert_all_finite(&verts);

        // For a right angle the miter tip sits half_width * sqrt(2) from the
        // corner, outside the turn.
        let corner = Vec2::new(50.0, 0.0);
        let expected_tip = Vec2::new(55.0, -5.0);
        assert!(
            verts.iter().any(|v| v.distance(expected_tip) < 1e-2),
            "missing miter tip near {expected_tip:?} (corner {corner:?})"
        );
    }

    #[test]
    fn tight_miter_limit_downgrades_to_bevel() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(50.0, 50.0),
        ];
        let attrs = StrokeAttributes::new(10.0)
            .with_join(Join::Miter)
            .with_miter_limit(1.0);
        let verts = stroke_geometry(&pts, &attrs);

        let expected_tip = Vec2::new(55.0, -5.0);
        assert!(
            verts.iter().all(|v| v.distance(expected_tip) > 1e-2),
            "miter tip should not be emitted past the limit"
        );
    }

    #[test]
    fn round_join_emits_more_triangles_than_bevel() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(50.0, 50.0),
        ];
        let bevel = stroke_geometry(&pts, &StrokeAttributes::new(10.0).with_join(Join::Bevel));
        let round = stroke_geometry(&pts, &StrokeAttributes::new(10.0).with_join(Join::Round));
        assert!(round.len() > bevel.len());
        assert_all_finite(&round);
    }

    #[test]
    fn collinear_interior_point_is_harmless() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
        ];
        let verts = stroke_geometry(&pts, &StrokeAttributes::new(4.0));
        assert!(!verts.is_empty());
        assert_all_finite(&verts);
    }

    #[test]
    fn closed_ring_gets_no_caps() {
        let ring = [
            Vec2::new(0.0, 0.0),
            Vec2::new(40.0, 0.0),
            Vec2::new(40.0, 40.0),
            Vec2::new(0.0, 40.0),
            Vec2::new(0.0, 0.0),
        ];
        let square_caps = StrokeAttributes::new(4.0).with_cap(Cap::Square);
        let verts = stroke_geometry(&ring, &square_caps);
        assert!(!verts.is_empty());
        assert_all_finite(&verts);
        // Square caps would poke out past the corners along an axis; a closed
        // ring must stay within the outer offset box.
        for v in &verts {
            assert!(v.x >= -2.0 - 1e-3 && v.x <= 42.0 + 1e-3);
            assert!(v.y >= -2.0 - 1e-3 && v.y <= 42.0 + 1e-3);
        }
    }

    #[test]
    fn reversed_winding_strokes_the_same_outline() {
        let cw = [
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(50.0, 50.0),
        ];
        let ccw = [
            Vec2::new(50.0, 50.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(0.0, 0.0),
        ];
        let attrs = StrokeAttributes::new(10.0).with_join(Join::Miter);
        let a = stroke_geometry(&cw, &attrs);
        let b = stroke_geometry(&ccw, &attrs);
        assert_eq!(a.len(), b.len());

        // Same miter tip either way round.
        let tip = Vec2::new(55.0, -5.0);
        assert!(a.iter().any(|v| v.distance(tip) < 1e-2));
        assert!(b.iter().any(|v| v.distance(tip) < 1e-2));
    }
}
