//! Axis-aligned rectangles in the y-down coordinate space shared by layout
//! and drawing.

use crate::math::Vec2;

/// Rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect { x, y, width, height }
    }
}

impl Rect<f32> {
    pub const ZERO: Rect<f32> = Rect::new(0.0, 0.0, 0.0, 0.0);

    /// The rect spanning two corners, given in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let (min, max) = (a.min(b), a.max(b));
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rect covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Rect::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.size(), Vec2::new(30.0, 40.0));
        assert!(!r.is_empty());
        assert!(Rect::new(5.0, 5.0, 0.0, 10.0).is_empty());
    }

    #[test]
    fn test_rect_from_corners() {
        let r = Rect::from_corners(Vec2::new(10.0, 2.0), Vec2::new(4.0, 8.0));
        assert_eq!(r, Rect::new(4.0, 2.0, 6.0, 6.0));
    }

    #[test]
    fn test_rect_translate() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).translate(Vec2::new(10.0, -2.0));
        assert_eq!(r, Rect::new(11.0, 0.0, 3.0, 4.0));
    }
}
