//! Triangle-buffer sink for filled and stroked paths.
//!
//! Fills go through lyon's fill tessellator; strokes go through this crate's
//! own [`stroke_geometry`] pass over the path's trace. Both land in one flat
//! `f32` buffer of colored triangle vertices suitable for direct GPU upload.
//!
//! [`stroke_geometry`]: crate::path::stroke::stroke_geometry

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, VertexBuffers,
};

use crate::components::color::Color;
use crate::path::segment::Segment;
use crate::path::stroke::{stroke_geometry, StrokeAttributes};
use crate::path::{Path, DEFAULT_TRACE_POINTS};

/// Per-vertex data for path rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GeometryVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl GeometryVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: Color,
    alpha: f32,
}

impl FillVertexConstructor<GeometryVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> GeometryVertex {
        GeometryVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.alpha,
        }
    }
}

/// Turns paths into colored triangles.
///
/// Holds the lyon tessellator and the output buffer. Cleared each frame and
/// populated by fill/stroke calls.
pub struct Tessellator {
    fill_tess: FillTessellator,
    geometry: VertexBuffers<GeometryVertex, u32>,
    buffer: Vec<f32>,
    trace: Vec<Vec2>,
}

impl Tessellator {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * GeometryVertex::FLOATS),
            trace: Vec::new(),
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / GeometryVertex::FLOATS
    }

    /// The flat float buffer, 6 floats per vertex.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Tessellate and fill a path. Curves are handed to lyon as beziers;
    /// arcs and splines are flattened first.
    pub fn fill_path(&mut self, path: &Path, color: Color, alpha: f32) {
        let lyon_path = build_lyon_path(path);
        let result = self.fill_tess.tessellate_path(
            &lyon_path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color, alpha }),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(err) => {
                log::warn!("fill tessellation failed: {err:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    /// Stroke a path: each contour is traced and run through the stroke
    /// tessellator, then colored into the buffer.
    pub fn stroke_path(
        &mut self,
        path: &Path,
        attrs: &StrokeAttributes,
        color: Color,
        alpha: f32,
    ) {
        for sp in path.subpaths() {
            if sp.is_empty() {
                continue;
            }
            self.trace.clear();
            sp.trace(&mut self.trace, DEFAULT_TRACE_POINTS);
            let verts = stroke_geometry(&self.trace, attrs);
            self.push_triangles(&verts, color, alpha);
        }
    }

    /// Stroke a raw polyline without building a path first.
    pub fn stroke_polyline(
        &mut self,
        points: &[Vec2],
        attrs: &StrokeAttributes,
        color: Color,
        alpha: f32,
    ) {
        let verts = stroke_geometry(points, attrs);
        self.push_triangles(&verts, color, alpha);
    }

    fn push_triangles(&mut self, verts: &[Vec2], color: Color, alpha: f32) {
        self.buffer.reserve(verts.len() * GeometryVertex::FLOATS);
        for v in verts {
            self.buffer
                .extend_from_slice(&[v.x, v.y, color.r, color.g, color.b, alpha]);
        }
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer
                .extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a [`Path`] to a lyon path. Lines and beziers map directly; arcs
/// and splines are flattened through their trace.
fn build_lyon_path(path: &Path) -> lyon::path::Path {
    let mut builder = lyon::path::Path::builder();
    let mut flat = Vec::new();

    for sp in path.subpaths() {
        if sp.is_empty() {
            continue;
        }
        let start = sp.start_point();
        builder.begin(point(start.x, start.y));

        for seg in sp.segments() {
            match seg {
                Segment::Line(s) => {
                    builder.line_to(point(s.b.x, s.b.y));
                }
                Segment::Quadratic(s) => {
                    let [_, c, to] = *s.points();
                    builder.quadratic_bezier_to(point(c.x, c.y), point(to.x, to.y));
                }
                Segment::Cubic(s) => {
                    let [_, c1, c2, to] = *s.points();
                    builder.cubic_bezier_to(
                        point(c1.x, c1.y),
                        point(c2.x, c2.y),
                        point(to.x, to.y),
                    );
                }
                Segment::Arc(_) | Segment::Spline(_) => {
                    flat.clear();
                    seg.trace(&mut flat, DEFAULT_TRACE_POINTS);
                    for p in flat.iter().skip(1) {
                        builder.line_to(point(p.x, p.y));
                    }
                }
            }
        }
        builder.end(sp.is_closed());
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn geometry_vertex_is_24_bytes() {
        assert_eq!(size_of::<GeometryVertex>(), 24);
        assert_eq!(GeometryVertex::FLOATS, 6);
        assert_eq!(GeometryVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn fill_triangle_path() {
        let mut tess = Tessellator::new();
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(100.0, 0.0))
            .line_to(Vec2::new(50.0, 100.0))
            .close_path();

        tess.fill_path(&path, Color::RED, 1.0);
        // A triangle fills to exactly one triangle.
        assert_eq!(tess.vertex_count(), 3);
    }

    #[test]
    fn fill_carries_color_and_alpha() {
        let mut tess = Tessellator::new();
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(10.0, 0.0))
            .line_to(Vec2::new(10.0, 10.0))
            .line_to(Vec2::new(0.0, 10.0))
            .close_path();

        tess.fill_path(&path, Color::new(0.2, 0.4, 0.6), 0.5);
        assert!(tess.vertex_count() > 0);
        let buf = tess.buffer();
        assert_eq!(buf[2], 0.2);
        assert_eq!(buf[3], 0.4);
        assert_eq!(buf[4], 0.6);
        assert_eq!(buf[5], 0.5);
    }

    #[test]
    fn stroke_path_produces_vertices() {
        let mut tess = Tessellator::new();
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(50.0, 0.0))
            .line_to(Vec2::new(50.0, 50.0));

        tess.stroke_path(&path, &StrokeAttributes::new(3.0), Color::WHITE, 1.0);
        assert!(tess.vertex_count() > 0);
        assert_eq!(tess.buffer().len() % GeometryVertex::FLOATS, 0);
    }

    #[test]
    fn clear_resets_buffer() {
        let mut tess = Tessellator::new();
        tess.stroke_polyline(
            &[Vec2::ZERO, Vec2::new(10.0, 10.0)],
            &StrokeAttributes::new(2.0),
            Color::WHITE,
            1.0,
        );
        assert!(tess.vertex_count() > 0);

        tess.clear();
        assert_eq!(tess.vertex_count(), 0);
    }

    #[test]
    fn empty_path_fills_to_nothing() {
        let mut tess = Tessellator::new();
        let path = Path::new();
        tess.fill_path(&path, Color::RED, 1.0);
        assert_eq!(tess.vertex_count(), 0);
    }
}
