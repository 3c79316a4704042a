//! Compound path: an ordered set of contours built canvas-style.
//!
//! # Usage
//!
//! ```ignore
//! let mut path = Path::new();
//! path.move_to(Vec2::ZERO)
//!     .line_to(Vec2::new(10.0, 0.0))
//!     .bezier_to(Vec2::new(12.0, 5.0), Vec2::new(8.0, 9.0), Vec2::new(0.0, 10.0))
//!     .close_path();
//!
//! let mid = path.value_at(0.5);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::EPSILON;
use crate::path::segment::{
    ArcSegment, CardinalSplineSegment, CubicSegment, LineSegment, QuadraticSegment, Segment,
};
use crate::path::subpath::Subpath;
use crate::path::LengthCache;

/// A compound curve: ordered [`Subpath`] contours with a cached total length.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Path {
    subpaths: Vec<Subpath>,
    #[serde(skip)]
    cache: LengthCache,
}

impl Path {
    pub fn new() -> Self {
        Self {
            subpaths: Vec::new(),
            cache: LengthCache::new(),
        }
    }

    /// Discard all contours and start over.
    pub fn begin_path(&mut self) -> &mut Self {
        self.subpaths.clear();
        self.cache.invalidate();
        self
    }

    /// Start a new contour at `p`.
    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.cache.invalidate();
        match self.subpaths.last_mut() {
            // A move on a contour with no segments just relocates it.
            Some(last) if last.is_empty() => last.set_start(p),
            _ => self.subpaths.push(Subpath::new(p)),
        }
        self
    }

    /// Straight line from the pen to `p`.
    /// On an empty path this behaves like `move_to` (canvas semantics).
    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        if self.subpaths.is_empty() {
            return self.move_to(p);
        }
        let pen = self.pen();
        self.push_segment(Segment::Line(LineSegment::new(pen, p)));
        self
    }

    /// Quadratic bezier from the pen through `ctrl` to `to`.
    pub fn quadratic_to(&mut self, ctrl: Vec2, to: Vec2) -> &mut Self {
        let pen = self.pen();
        self.push_segment(Segment::Quadratic(QuadraticSegment::new(pen, ctrl, to)));
        self
    }

    /// Cubic bezier from the pen through `c1`, `c2` to `to`.
    pub fn bezier_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2) -> &mut Self {
        let pen = self.pen();
        self.push_segment(Segment::Cubic(CubicSegment::new(pen, c1, c2, to)));
        self
    }

    /// Circular arc around `center`. Angles in radians; negative `sweep`
    /// runs clockwise. A connecting line is added when the pen is not
    /// already on the arc's starting point.
    pub fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, sweep: f32) -> &mut Self {
        let arc = ArcSegment::new(center, radius, start_angle, sweep);
        let arc_start = arc.value_at(0.0);
        if !self.subpaths.is_empty() {
            let pen = self.pen();
            if pen.distance_squared(arc_start) > EPSILON * EPSILON {
                self.push_segment(Segment::Line(LineSegment::new(pen, arc_start)));
            }
        } else {
            self.move_to(arc_start);
        }
        self.push_segment(Segment::Arc(arc));
        self
    }

    /// Cardinal spline from the pen through the given points.
    /// `tension` 0.0 is Catmull-Rom; 1.0 collapses to a polyline.
    pub fn cardinal_spline_to(&mut self, points: &[Vec2], tension: f32) -> &mut Self {
        let pen = self.pen();
        let mut knots = Vec::with_capacity(points.len() + 1);
        knots.push(pen);
        knots.extend_from_slice(points);
        self.push_segment(Segment::Spline(CardinalSplineSegment::new(knots, tension)));
        self
    }

    /// Close the current contour with a line back to its start.
    pub fn close_path(&mut self) -> &mut Self {
        self.cache.invalidate();
        if let Some(last) = self.subpaths.last_mut() {
            last.close();
        }
        self
    }

    fn push_segment(&mut self, segment: Segment) {
        self.cache.invalidate();
        match self.subpaths.last_mut() {
            Some(current) => current.push(segment),
            None => {
                let mut sp = Subpath::new(segment.start_point());
                sp.push(segment);
                self.subpaths.push(sp);
            }
        }
    }

    /// Current pen position: the end of the last contour.
    pub fn pen(&self) -> Vec2 {
        self.subpaths
            .last()
            .map(|sp| sp.end_point())
            .unwrap_or(Vec2::ZERO)
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    /// Mutable access to one contour, invalidating the path-level cache so
    /// a nested edit is reflected by the next `length()` on the path.
    pub fn subpath_mut(&mut self, idx: usize) -> Option<&mut Subpath> {
        self.cache.invalidate();
        self.subpaths.get_mut(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|sp| sp.is_empty())
    }

    pub fn start_point(&self) -> Option<Vec2> {
        self.subpaths.first().map(|sp| sp.start_point())
    }

    pub fn end_point(&self) -> Option<Vec2> {
        self.subpaths.last().map(|sp| sp.end_point())
    }

    /// Total path length: the sum of contour lengths, cached.
    pub fn length(&self) -> f32 {
        self.cache
            .get_or_compute(|| self.subpaths.iter().map(|sp| sp.length()).sum())
    }

    /// Set or clear the dirty flag. Clearing recomputes the whole tree.
    pub fn set_dirty(&self, dirty: bool) {
        if dirty {
            self.cache.invalidate();
        } else {
            for sp in &self.subpaths {
                sp.set_dirty(false);
            }
            self.length();
        }
    }

    /// Point at normalized position `t` in [0, 1] across all contours,
    /// proportional to their lengths. Positions past the end clamp to the
    /// path's ending point.
    pub fn value_at(&self, t: f32) -> Vec2 {
        let total = self.length();
        if total <= EPSILON {
            return self.end_point().unwrap_or(Vec2::ZERO);
        }
        let target = t.clamp(0.0, 1.0) * total;

        let mut acc = 0.0;
        for sp in &self.subpaths {
            let len = sp.length();
            if len > 0.0 && target <= acc + len {
                return sp.value_at((target - acc) / len);
            }
            acc += len;
        }
        self.end_point().unwrap_or(Vec2::ZERO)
    }

    /// Append `n` samples per contour to `dst`. Contours are traced
    /// independently so disjoint pieces do not get bridged.
    pub fn trace(&self, dst: &mut Vec<Vec2>, n: usize) {
        for sp in &self.subpaths {
            if !sp.is_empty() {
                sp.trace(dst, n);
            }
        }
    }
}

impl Clone for Path {
    /// Deep copy: every contour and segment gets disjoint point storage.
    fn clone(&self) -> Self {
        Self {
            subpaths: self.subpaths.iter().map(|sp| sp.deep_clone()).collect(),
            cache: self.cache.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_line_path_length_and_midpoint() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(10.0, 10.0));

        assert_eq!(path.length(), 20.0);
        // Half the total length lands exactly on the join point.
        assert_eq!(path.value_at(0.5), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn line_to_on_empty_path_acts_as_move_to() {
        let mut path = Path::new();
        path.line_to(Vec2::new(5.0, 5.0)).line_to(Vec2::new(5.0, 9.0));
        assert_eq!(path.length(), 4.0);
        assert_eq!(path.start_point(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn nested_mutation_refreshes_path_length() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(10.0, 10.0));
        assert_eq!(path.length(), 20.0);

        // Drag the elbow through the contour's mutable API: both the contour
        // and the path must serve the fresh value on the next read.
        path.subpath_mut(0)
            .unwrap()
            .segment_mut(0)
            .unwrap()
            .set_control_point(1, Vec2::new(20.0, 0.0));
        // First leg is now 20 long, second leg unchanged geometry-wise.
        assert!((path.length() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn explicit_dirty_marking_round_trip() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO).line_to(Vec2::new(10.0, 0.0));
        assert_eq!(path.length(), 10.0);

        path.set_dirty(true);
        path.set_dirty(false);
        assert_eq!(path.length(), 10.0);
    }

    #[test]
    fn multiple_contours_share_the_parameter_range() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO).line_to(Vec2::new(10.0, 0.0));
        path.move_to(Vec2::new(0.0, 5.0)).line_to(Vec2::new(10.0, 5.0));

        assert_eq!(path.length(), 20.0);
        assert_eq!(path.value_at(0.25), Vec2::new(5.0, 0.0));
        assert_eq!(path.value_at(0.75), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn clone_is_deep() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO).line_to(Vec2::new(10.0, 0.0));
        let copy = path.clone();

        path.subpath_mut(0)
            .unwrap()
            .segment_mut(0)
            .unwrap()
            .set_control_point(1, Vec2::new(99.0, 0.0));

        assert_eq!(copy.length(), 10.0);
        assert_eq!(path.length(), 99.0);
    }

    #[test]
    fn close_path_returns_to_contour_start() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(10.0, 10.0))
            .close_path();
        assert_eq!(path.end_point(), Some(Vec2::ZERO));
        let expected = 20.0 + Vec2::new(10.0, 10.0).length();
        assert!((path.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn arc_connects_from_pen() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO);
        // Arc starts at (20, 0): a connector line from the pen is inserted.
        path.arc(Vec2::new(10.0, 0.0), 10.0, 0.0, std::f32::consts::PI);
        let sp = &path.subpaths()[0];
        assert_eq!(sp.segment_count(), 2);
        assert!((path.length() - (20.0 + 10.0 * std::f32::consts::PI)).abs() < 1e-3);
    }

    #[test]
    fn serde_round_trip_preserves_geometry() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .quadratic_to(Vec2::new(5.0, 10.0), Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(20.0, 0.0));

        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert!((back.length() - path.length()).abs() < 1e-4);
        assert!(back.value_at(0.9).distance(path.value_at(0.9)) < 1e-4);
    }
}
