//! Mock implementation of RenderSurface for testing.

use parking_lot::Mutex;
use scribe_core::font::TextureHandle;
use scribe_core::graphics::{RenderSurface, TextVertex, View};
use scribe_core::math::Vec2;

/// Records a draw call for verification in tests.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub vertices: Vec<TextVertex>,
    pub texture: Option<TextureHandle>,
    pub origin: Vec2,
}

impl DrawCall {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Render surface that keeps every draw call instead of rasterizing.
///
/// Draws arrive through `&mut self`, but the log sits behind a `Mutex` so a
/// test can share the surface and inspect it through `&self`.
///
/// ```rust
/// use scribe_core::graphics::{RenderSurface, View};
/// use scribe_core::math::Vec2;
/// use scribe_test_utils::MockSurface;
///
/// let mut surface = MockSurface::new(800.0, 600.0);
/// surface.draw(&[], None, Vec2::ZERO);
/// assert_eq!(surface.draw_count(), 1);
/// ```
pub struct MockSurface {
    view: View,
    calls: Mutex<Vec<DrawCall>>,
}

impl MockSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_view(View::from_target_size(width, height))
    }

    pub fn with_view(view: View) -> Self {
        Self {
            view,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().clone()
    }

    pub fn draw_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Vertices submitted across all draws.
    pub fn total_vertices(&self) -> usize {
        self.calls.lock().iter().map(DrawCall::vertex_count).sum()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl RenderSurface for MockSurface {
    fn draw(&mut self, vertices: &[TextVertex], texture: Option<TextureHandle>, origin: Vec2) {
        self.calls.lock().push(DrawCall {
            vertices: vertices.to_vec(),
            texture,
            origin,
        });
    }

    fn view(&self) -> View {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls() {
        let mut surface = MockSurface::new(100.0, 100.0);
        let v = TextVertex::default();
        surface.draw(&[v; 6], None, Vec2::new(5.0, 5.0));
        surface.draw(&[v; 12], None, Vec2::ZERO);
        assert_eq!(surface.draw_count(), 2);
        assert_eq!(surface.total_vertices(), 18);
        assert_eq!(surface.calls()[0].origin, Vec2::new(5.0, 5.0));
        surface.clear();
        assert_eq!(surface.draw_count(), 0);
    }

    #[test]
    fn test_pixel_to_world_uses_view() {
        let mut surface = MockSurface::new(100.0, 100.0);
        surface.set_view(View {
            center: Vec2::new(150.0, 50.0),
            size: Vec2::new(100.0, 100.0),
            viewport: scribe_core::geometry::Rect::new(0.0, 0.0, 100.0, 100.0),
        });
        assert_eq!(surface.pixel_to_world(Vec2::new(0.0, 0.0)), Vec2::new(100.0, 0.0));
    }
}
