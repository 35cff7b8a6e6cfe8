//! Quad emission shared by the layout, decoration and selection stages.
//!
//! Every quad is two triangles in the order
//! bottom-left, top-left, top-right, bottom-left, top-right, bottom-right.

use scribe_core::Color;
use scribe_core::font::Glyph;
use scribe_core::geometry::Rect;
use scribe_core::graphics::TextVertex;
use scribe_core::math::Vec2;

pub const VERTICES_PER_QUAD: usize = 6;

/// Append the textured quad of `glyph` with its origin at `pen`.
///
/// `shear` slants the quad to the right by that many pixels per pixel above
/// the baseline.
pub(crate) fn push_glyph_quad(out: &mut Vec<TextVertex>, pen: Vec2, color: Color, glyph: &Glyph, shear: f32) {
    let b = glyph.bounds;
    let t = glyph.texture_rect;
    let corner = |x: f32, y: f32, u: f32, v: f32| {
        TextVertex::new(Vec2::new(pen.x + x - shear * y, pen.y + y), color, Vec2::new(u, v))
    };

    let (left, top, right, bottom) = (b.x, b.y, b.right(), b.bottom());
    let (u1, v1, u2, v2) = (t.x, t.y, t.right(), t.bottom());
    out.extend_from_slice(&[
        corner(left, bottom, u1, v2),
        corner(left, top, u1, v1),
        corner(right, top, u2, v1),
        corner(left, bottom, u1, v2),
        corner(right, top, u2, v1),
        corner(right, bottom, u2, v2),
    ]);
}

/// Append an axis-aligned quad sampling a single texel.
pub(crate) fn push_solid_quad(out: &mut Vec<TextVertex>, rect: Rect<f32>, color: Color, texel: Vec2) {
    let corner = |x: f32, y: f32| TextVertex::new(Vec2::new(x, y), color, texel);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    out.extend_from_slice(&[
        corner(left, bottom),
        corner(left, top),
        corner(right, top),
        corner(left, bottom),
        corner(right, top),
        corner(right, bottom),
    ]);
}

/// Axis-aligned bounds of a run of vertices. Empty input yields `None`.
pub(crate) fn vertex_bounds(vertices: &[TextVertex]) -> Option<Rect<f32>> {
    let first = vertices.first()?.position();
    let (min, max) = vertices
        .iter()
        .fold((first, first), |(min, max), v| (min.min(v.position()), max.max(v.position())));
    Some(Rect::from_corners(min, max))
}
