/// SIMD-accelerated vector math from [`glam`].
///
/// Pen positions, glyph offsets and vertex positions are all [`Vec2`] on the
/// CPU side. Anything that ends up in a vertex buffer is converted to a plain
/// array first, see [`crate::graphics::TextVertex`].
///
/// ```
/// use scribe_core::math::Vec2;
///
/// let pen = Vec2::new(0.0, 20.0);
/// let advanced = pen + Vec2::X * 10.0;
/// assert_eq!(advanced, Vec2::new(10.0, 20.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::*;
