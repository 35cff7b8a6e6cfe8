//! The glyph-provider interface the text engine consumes.
//!
//! A provider answers per-character questions (advance, bounding box, where
//! the bitmap lives in its texture) and per-size questions (line spacing,
//! underline metrics). The engine treats every answer as a pure function of
//! its arguments, so providers are free to memoize.

use crate::geometry::Rect;
use crate::math::Vec2;

/// Metrics and atlas placement of one glyph at one pixel size.
///
/// `bounds` is relative to the pen position on the baseline with y pointing
/// down, so `bounds.y` is negative for glyphs that rise above the baseline.
/// `texture_rect` is in texels of the provider's texture for that size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Glyph {
    pub advance: f32,
    pub bounds: Rect<f32>,
    pub texture_rect: Rect<f32>,
}

/// An opaque reference to a texture owned by the glyph provider.
///
/// `id` changes whenever the provider recreates the texture; `width` and
/// `height` let a surface normalize texel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

/// Source of glyph metrics and textures for one font face.
///
/// Implementations must be total: unknown characters return an empty
/// [`Glyph`] rather than failing. Queries take `&self`; providers that cache
/// or rasterize on demand use interior mutability.
pub trait GlyphProvider {
    /// Glyph for `ch` at `size` pixels, in the bold face when `bold` is set.
    fn glyph(&self, ch: char, size: u32, bold: bool) -> Glyph;

    /// Distance between two consecutive baselines at `size`.
    fn line_spacing(&self, size: u32) -> f32;

    /// Offset of the underline from the baseline, y pointing down.
    fn underline_position(&self, size: u32) -> f32;

    fn underline_thickness(&self, size: u32) -> f32;

    /// Texture holding the glyph bitmaps for `size`, if any exist yet.
    fn texture(&self, size: u32) -> Option<TextureHandle>;

    /// Texel coordinate of a fully opaque pixel, used for solid quads such as
    /// underlines.
    fn white_texel(&self) -> Vec2 {
        Vec2::ONE
    }
}
