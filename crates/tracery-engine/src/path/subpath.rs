//! A single contour: an ordered run of connected segments.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, EngineResult};
use crate::math::EPSILON;
use crate::path::segment::Segment;
use crate::path::LengthCache;

/// Ordered, connected segments forming one contour of a [`Path`].
///
/// Subpaths are owned exclusively by their path; they deliberately do not
/// implement `Clone`. Cloning the owning path deep-copies every contour.
///
/// [`Path`]: crate::path::Path
#[derive(Debug, Serialize, Deserialize)]
pub struct Subpath {
    start: Vec2,
    segments: Vec<Segment>,
    closed: bool,
    #[serde(skip)]
    cache: LengthCache,
}

impl Subpath {
    pub fn new(start: Vec2) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
            cache: LengthCache::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Mutable access to one segment.
    ///
    /// Invalidates this contour's cached length up front; the caller reaches
    /// here through the owning path's mutable API, which invalidates the path
    /// cache the same way, so a control-point edit is visible to every
    /// ancestor's next `length()` call.
    pub fn segment_mut(&mut self, idx: usize) -> Option<&mut Segment> {
        self.cache.invalidate();
        self.segments.get_mut(idx)
    }

    pub(crate) fn set_start(&mut self, start: Vec2) {
        self.start = start;
        self.cache.invalidate();
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
        self.cache.invalidate();
    }

    /// Close the contour with a line back to its starting point.
    pub(crate) fn close(&mut self) {
        let end = self.end_point();
        if end.distance_squared(self.start) > EPSILON * EPSILON {
            self.push(Segment::Line(crate::path::segment::LineSegment::new(
                end, self.start,
            )));
        }
        self.closed = true;
    }

    pub fn start_point(&self) -> Vec2 {
        self.start
    }

    pub fn end_point(&self) -> Vec2 {
        self.segments
            .last()
            .map(|s| s.end_point())
            .unwrap_or(self.start)
    }

    /// Total contour length: the sum of child segment lengths, cached.
    pub fn length(&self) -> f32 {
        self.cache
            .get_or_compute(|| self.segments.iter().map(|s| s.length()).sum())
    }

    /// Set or clear the dirty flag.
    ///
    /// Setting stales only this contour's cache (child caches stay valid and
    /// are re-summed). Clearing recomputes children first, then this cache.
    pub fn set_dirty(&self, dirty: bool) {
        if dirty {
            self.cache.invalidate();
        } else {
            for seg in &self.segments {
                seg.set_dirty(false);
            }
            self.length();
        }
    }

    /// Point at normalized position `t` in [0, 1] along the contour,
    /// proportional to segment lengths.
    pub fn value_at(&self, t: f32) -> Vec2 {
        let total = self.length();
        if total <= EPSILON {
            return self.end_point();
        }
        let target = t.clamp(0.0, 1.0) * total;

        // Linear scan over cumulative lengths; a prefix-sum binary search
        // would only pay off for contours with very many segments.
        let mut acc = 0.0;
        for seg in &self.segments {
            let len = seg.length();
            if len > 0.0 && target <= acc + len {
                return seg.value_at((target - acc) / len);
            }
            acc += len;
        }
        // Past the last segment (t at or beyond 1): clamp to the end.
        self.end_point()
    }

    /// Append `n` evenly-spaced samples of the whole contour to `dst`.
    pub fn trace(&self, dst: &mut Vec<Vec2>, n: usize) {
        let n = n.max(2);
        dst.reserve(n);
        for i in 0..n {
            dst.push(self.value_at(i as f32 / (n - 1) as f32));
        }
    }

    /// Standalone subpath cloning is not supported; clone the owning path.
    pub fn try_clone(&self) -> EngineResult<Self> {
        Err(EngineError::unsupported(
            "a subpath cannot be cloned on its own; clone its owning path",
        ))
    }

    pub(crate) fn deep_clone(&self) -> Self {
        Self {
            start: self.start,
            segments: self.segments.clone(),
            closed: self.closed,
            cache: self.cache.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::segment::LineSegment;

    fn l_shape() -> Subpath {
        let mut sp = Subpath::new(Vec2::ZERO);
        sp.push(Segment::Line(LineSegment::new(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
        )));
        sp.push(Segment::Line(LineSegment::new(
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        )));
        sp
    }

    #[test]
    fn length_sums_children() {
        assert_eq!(l_shape().length(), 20.0);
    }

    #[test]
    fn value_at_is_length_proportional() {
        let sp = l_shape();
        assert_eq!(sp.value_at(0.5), Vec2::new(10.0, 0.0));
        assert_eq!(sp.value_at(0.25), Vec2::new(5.0, 0.0));
        assert_eq!(sp.value_at(0.75), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn value_at_clamps_past_the_end() {
        let sp = l_shape();
        assert_eq!(sp.value_at(1.0), Vec2::new(10.0, 10.0));
        assert_eq!(sp.value_at(5.0), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn segment_mutation_refreshes_length() {
        let mut sp = l_shape();
        assert_eq!(sp.length(), 20.0);

        sp.segment_mut(1)
            .unwrap()
            .set_control_point(1, Vec2::new(10.0, 20.0));
        assert_eq!(sp.length(), 30.0);
    }

    #[test]
    fn close_appends_the_return_line() {
        let mut sp = l_shape();
        sp.close();
        assert!(sp.is_closed());
        assert_eq!(sp.segment_count(), 3);
        assert_eq!(sp.end_point(), Vec2::ZERO);
    }

    #[test]
    fn standalone_clone_is_rejected() {
        let err = l_shape().try_clone().unwrap_err();
        assert!(err.to_string().contains("unsupported operation"));
    }

    #[test]
    fn empty_subpath_samples_to_start() {
        let sp = Subpath::new(Vec2::new(3.0, 4.0));
        assert_eq!(sp.value_at(0.5), Vec2::new(3.0, 4.0));
        assert_eq!(sp.length(), 0.0);
    }
}
