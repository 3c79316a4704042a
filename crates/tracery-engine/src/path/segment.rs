//! Leaf path segments: line, quadratic, cubic bezier, arc, cardinal spline.
//!
//! All segment kinds share one capability set: length, proportional sampling
//! via `value_at`, tracing into a point buffer, and control-point access with
//! dirty marking. Lines and arcs have analytic lengths; curve lengths are
//! approximated by fixed-step sampling and cached until a control point moves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::path::LengthCache;

/// Sample count used when tracing a curve without an explicit resolution.
pub const DEFAULT_TRACE_POINTS: usize = 50;

/// A single path primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Line(LineSegment),
    Quadratic(QuadraticSegment),
    Cubic(CubicSegment),
    Arc(ArcSegment),
    Spline(CardinalSplineSegment),
}

impl Segment {
    /// Length of this segment in world units.
    pub fn length(&self) -> f32 {
        match self {
            Segment::Line(s) => s.length(),
            Segment::Quadratic(s) => s.length(),
            Segment::Cubic(s) => s.length(),
            Segment::Arc(s) => s.length(),
            Segment::Spline(s) => s.length(),
        }
    }

    /// Point at normalized position `t` in [0, 1] (clamped).
    ///
    /// `t` is parametric, not arc-length-accurate, for curved kinds.
    pub fn value_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Segment::Line(s) => s.value_at(t),
            Segment::Quadratic(s) => s.value_at(t),
            Segment::Cubic(s) => s.value_at(t),
            Segment::Arc(s) => s.value_at(t),
            Segment::Spline(s) => s.value_at(t),
        }
    }

    /// Append `n` evenly-spaced samples (including both endpoints) to `dst`.
    pub fn trace(&self, dst: &mut Vec<Vec2>, n: usize) {
        let n = n.max(2);
        dst.reserve(n);
        for i in 0..n {
            dst.push(self.value_at(i as f32 / (n - 1) as f32));
        }
    }

    pub fn start_point(&self) -> Vec2 {
        self.value_at(0.0)
    }

    pub fn end_point(&self) -> Vec2 {
        self.value_at(1.0)
    }

    /// Append this segment's control points to `dst`.
    pub fn control_points(&self, dst: &mut Vec<Vec2>) {
        match self {
            Segment::Line(s) => dst.extend([s.a, s.b]),
            Segment::Quadratic(s) => dst.extend(s.points),
            Segment::Cubic(s) => dst.extend(s.points),
            Segment::Arc(s) => dst.push(s.center),
            Segment::Spline(s) => dst.extend(s.points.iter().copied()),
        }
    }

    pub fn control_point_count(&self) -> usize {
        match self {
            Segment::Line(_) => 2,
            Segment::Quadratic(_) => 3,
            Segment::Cubic(_) => 4,
            Segment::Arc(_) => 1,
            Segment::Spline(s) => s.points.len(),
        }
    }

    /// Move one control point. Out-of-range indices are ignored.
    ///
    /// Marks the segment dirty; the owning container must be accessed through
    /// its mutable API so the invalidation reaches every cached ancestor.
    pub fn set_control_point(&mut self, idx: usize, v: Vec2) {
        match self {
            Segment::Line(s) => match idx {
                0 => s.a = v,
                1 => s.b = v,
                _ => return,
            },
            Segment::Quadratic(s) => {
                if let Some(p) = s.points.get_mut(idx) {
                    *p = v;
                } else {
                    return;
                }
            }
            Segment::Cubic(s) => {
                if let Some(p) = s.points.get_mut(idx) {
                    *p = v;
                } else {
                    return;
                }
            }
            Segment::Arc(s) => {
                if idx == 0 {
                    s.center = v;
                } else {
                    return;
                }
            }
            Segment::Spline(s) => {
                if let Some(p) = s.points.get_mut(idx) {
                    *p = v;
                } else {
                    return;
                }
            }
        }
        self.set_dirty(true);
    }

    /// Set or clear the dirty flag on this segment's length cache.
    ///
    /// Clearing recomputes immediately so the cache is valid afterwards.
    /// Analytic kinds (line, arc) carry no cache and ignore both directions.
    pub fn set_dirty(&self, dirty: bool) {
        let cache = match self {
            Segment::Line(_) | Segment::Arc(_) => return,
            Segment::Quadratic(s) => &s.cache,
            Segment::Cubic(s) => &s.cache,
            Segment::Spline(s) => &s.cache,
        };
        if dirty {
            cache.invalidate();
        } else if cache.is_dirty() {
            self.length();
        }
    }
}

/// Straight line between two points. Length is analytic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    pub fn value_at(&self, t: f32) -> Vec2 {
        self.a.lerp(self.b, t)
    }
}

/// Quadratic bezier: start, one control point, end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadraticSegment {
    points: [Vec2; 3],
    #[serde(skip)]
    cache: LengthCache,
}

impl QuadraticSegment {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self {
            points: [p0, p1, p2],
            cache: LengthCache::new(),
        }
    }

    pub fn points(&self) -> &[Vec2; 3] {
        &self.points
    }

    pub fn length(&self) -> f32 {
        self.cache
            .get_or_compute(|| sampled_length(DEFAULT_TRACE_POINTS, |t| self.value_at(t)))
    }

    pub fn value_at(&self, t: f32) -> Vec2 {
        let [p0, p1, p2] = self.points;
        let u = 1.0 - t;
        p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
    }
}

/// Cubic bezier: start, two control points, end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubicSegment {
    points: [Vec2; 4],
    #[serde(skip)]
    cache: LengthCache,
}

impl CubicSegment {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self {
            points: [p0, p1, p2, p3],
            cache: LengthCache::new(),
        }
    }

    pub fn points(&self) -> &[Vec2; 4] {
        &self.points
    }

    pub fn length(&self) -> f32 {
        self.cache
            .get_or_compute(|| sampled_length(DEFAULT_TRACE_POINTS, |t| self.value_at(t)))
    }

    pub fn value_at(&self, t: f32) -> Vec2 {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
    }
}

/// Circular arc around a center. Angles in radians; `sweep` may be negative.
/// Length is analytic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub center: Vec2,
    pub radius: f32,
    pub start_angle: f32,
    pub sweep: f32,
}

impl ArcSegment {
    pub fn new(center: Vec2, radius: f32, start_angle: f32, sweep: f32) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep,
        }
    }

    pub fn length(&self) -> f32 {
        self.radius * self.sweep.abs()
    }

    pub fn value_at(&self, t: f32) -> Vec2 {
        self.center + Vec2::from_angle(self.start_angle + self.sweep * t) * self.radius
    }
}

/// Cardinal spline through a run of points.
///
/// `tension` 0.0 gives a Catmull-Rom curve; 1.0 collapses to a polyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardinalSplineSegment {
    points: Vec<Vec2>,
    tension: f32,
    #[serde(skip)]
    cache: LengthCache,
}

impl CardinalSplineSegment {
    pub fn new(points: Vec<Vec2>, tension: f32) -> Self {
        Self {
            points,
            tension,
            cache: LengthCache::new(),
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn tension(&self) -> f32 {
        self.tension
    }

    pub fn set_tension(&mut self, tension: f32) {
        self.tension = tension;
        self.cache.invalidate();
    }

    pub fn length(&self) -> f32 {
        self.cache
            .get_or_compute(|| sampled_length(DEFAULT_TRACE_POINTS, |t| self.value_at(t)))
    }

    pub fn value_at(&self, t: f32) -> Vec2 {
        let n = self.points.len();
        match n {
            0 => Vec2::ZERO,
            1 => self.points[0],
            _ => {
                let spans = n - 1;
                let u = t * spans as f32;
                let i = (u.floor() as usize).min(spans - 1);
                let local = u - i as f32;

                let p = |idx: isize| -> Vec2 {
                    self.points[idx.clamp(0, n as isize - 1) as usize]
                };
                let i = i as isize;
                let s = (1.0 - self.tension) * 0.5;
                let m0 = (p(i + 1) - p(i - 1)) * s;
                let m1 = (p(i + 2) - p(i)) * s;

                let t2 = local * local;
                let t3 = t2 * local;
                let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
                let h10 = t3 - 2.0 * t2 + local;
                let h01 = -2.0 * t3 + 3.0 * t2;
                let h11 = t3 - t2;
                p(i) * h00 + m0 * h10 + p(i + 1) * h01 + m1 * h11
            }
        }
    }
}

fn sampled_length(samples: usize, eval: impl Fn(f32) -> Vec2) -> f32 {
    let samples = samples.max(2);
    let mut total = 0.0;
    let mut prev = eval(0.0);
    for i in 1..samples {
        let next = eval(i as f32 / (samples - 1) as f32);
        total += prev.distance(next);
        prev = next;
    }
    total
}
