//! Vertex format and the rendering-surface interface.

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

use crate::color::Color;
use crate::font::TextureHandle;
use crate::geometry::Rect;
use crate::math::Vec2;

/// One vertex of a textured text quad.
///
/// `tex_coords` are in texels of the bound texture. Untextured geometry
/// (selection highlights) leaves them at zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct TextVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub tex_coords: [f32; 2],
}

const_assert_eq!(std::mem::size_of::<TextVertex>(), 32);

impl TextVertex {
    pub fn new(position: Vec2, color: Color, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        self.position[0] += offset.x;
        self.position[1] += offset.y;
    }
}

/// A 2D camera: the world-space region shown and where on the target it is
/// shown.
///
/// `viewport` is in target pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub center: Vec2,
    pub size: Vec2,
    pub viewport: Rect<f32>,
}

impl View {
    /// A view that maps a `width` x `height` target one-to-one.
    pub fn from_target_size(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            size: Vec2::new(width, height),
            viewport: Rect::new(0.0, 0.0, width, height),
        }
    }

    /// Map a pixel on the target into world coordinates.
    pub fn pixel_to_world(&self, pixel: Vec2) -> Vec2 {
        if self.viewport.width == 0.0 || self.viewport.height == 0.0 {
            return self.center;
        }
        let normalized = (pixel - self.viewport.position()) / self.viewport.size();
        self.center + (normalized - Vec2::splat(0.5)) * self.size
    }

    /// Inverse of [`View::pixel_to_world`].
    pub fn world_to_pixel(&self, world: Vec2) -> Vec2 {
        if self.size.x == 0.0 || self.size.y == 0.0 {
            return self.viewport.position();
        }
        let normalized = (world - self.center) / self.size + Vec2::splat(0.5);
        self.viewport.position() + normalized * self.viewport.size()
    }
}

/// Something that can draw vertex buffers immediately.
///
/// `origin` is added to every vertex position; it lets a widget keep its
/// geometry in local coordinates.
pub trait RenderSurface {
    fn draw(&mut self, vertices: &[TextVertex], texture: Option<TextureHandle>, origin: Vec2);

    /// The view currently applied to draws.
    fn view(&self) -> View;

    fn pixel_to_world(&self, pixel: Vec2) -> Vec2 {
        self.view().pixel_to_world(pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_pod() {
        let v = TextVertex::new(Vec2::new(1.0, 2.0), Color::RED, Vec2::new(3.0, 4.0));
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 32);
        assert_eq!(v.position(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_identity_view() {
        let view = View::from_target_size(800.0, 600.0);
        assert_eq!(view.pixel_to_world(Vec2::new(10.0, 20.0)), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_scrolled_and_zoomed_view() {
        let view = View {
            center: Vec2::new(500.0, 300.0),
            size: Vec2::new(400.0, 300.0),
            viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
        };
        // Target center maps to view center; each pixel is half a world unit.
        assert_eq!(view.pixel_to_world(Vec2::new(400.0, 300.0)), Vec2::new(500.0, 300.0));
        assert_eq!(view.pixel_to_world(Vec2::new(0.0, 0.0)), Vec2::new(300.0, 150.0));
        let p = Vec2::new(123.0, 456.0);
        assert!((view.world_to_pixel(view.pixel_to_world(p)) - p).length() < 1e-3);
    }

    #[test]
    fn test_degenerate_viewport() {
        let mut view = View::from_target_size(100.0, 100.0);
        view.viewport.width = 0.0;
        assert_eq!(view.pixel_to_world(Vec2::new(5.0, 5.0)), view.center);
    }
}
