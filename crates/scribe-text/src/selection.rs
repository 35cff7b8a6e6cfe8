//! Selection highlight quads.

use std::ops::Range;

use scribe_core::Color;
use scribe_core::geometry::Rect;
use scribe_core::graphics::TextVertex;
use scribe_core::math::Vec2;

use crate::layout::LayoutOutput;
use crate::quad::push_solid_quad;

/// One highlight cell per selected character.
///
/// A cell spans from the character's pen x to the next character's pen x on
/// the same line, or to its own advance for the last character of a line.
/// Vertically it covers one line height starting `character_size` above the
/// baseline. Every cell shares that height, so the cells of consecutive lines
/// tile without gaps or overlap whatever the glyph shapes. Cells are
/// untextured.
pub fn build_quads(
    layout: &LayoutOutput,
    range: Range<usize>,
    character_size: f32,
    line_height: f32,
    color: Color,
) -> Vec<TextVertex> {
    let mut out = Vec::new();
    if range.is_empty() {
        return out;
    }

    let mut index = 0;
    for line in &layout.lines {
        for (j, entry) in line.iter().enumerate() {
            if range.contains(&index) {
                let right = line.get(j + 1).map_or(entry.end_x(), |next| next.position.x);
                let top = entry.position.y - character_size;
                let cell = Rect::from_corners(
                    Vec2::new(entry.position.x, top),
                    Vec2::new(right, top + line_height),
                );
                push_solid_quad(&mut out, cell, color, Vec2::ZERO);
            }
            index += 1;
            if index >= range.end {
                return out;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::quad::vertex_bounds;
    use crate::style::StyleAttributes;
    use scribe_test_utils::MonoFont;

    fn selection(text: &str, width: f32, range: Range<usize>) -> Vec<TextVertex> {
        let font = MonoFont::new();
        let style = StyleAttributes::default().with_size(width, 200.0);
        let out = layout(text, &style, &font);
        build_quads(&out, range, 20.0, 24.0, Color::BLUE)
    }

    #[test]
    fn test_empty_range() {
        assert!(selection("hello", 300.0, 2..2).is_empty());
    }

    #[test]
    fn test_cells_cover_selected_characters() {
        let quads = selection("hello", 300.0, 1..3);
        assert_eq!(quads.len(), 12);
        assert_eq!(vertex_bounds(&quads), Some(Rect::new(10.0, 0.0, 20.0, 24.0)));
    }

    #[test]
    fn test_last_character_of_line_uses_advance() {
        let quads = selection("ab cd", 25.0, 2..3);
        // The hanging space spans 20..30 on the first line.
        assert_eq!(vertex_bounds(&quads), Some(Rect::new(20.0, 0.0, 10.0, 24.0)));
    }

    #[test]
    fn test_second_line_cells() {
        let quads = selection("ab cd", 25.0, 3..5);
        assert_eq!(vertex_bounds(&quads), Some(Rect::new(0.0, 24.0, 20.0, 24.0)));
    }

    #[test]
    fn test_cells_of_consecutive_lines_tile() {
        let quads = selection("ab cd", 25.0, 0..5);
        assert_eq!(quads.len(), 30);
        // Line one covers 0..24, line two 24..48.
        assert_eq!(vertex_bounds(&quads[..18]), Some(Rect::new(0.0, 0.0, 30.0, 24.0)));
        assert_eq!(vertex_bounds(&quads[18..]), Some(Rect::new(0.0, 24.0, 20.0, 24.0)));
    }

    #[test]
    fn test_range_past_end_is_harmless() {
        let quads = selection("ab", 300.0, 0..10);
        assert_eq!(quads.len(), 12);
    }

    #[test]
    fn test_color_and_texture() {
        let quads = selection("ab", 300.0, 0..1);
        assert!(quads.iter().all(|v| v.color == Color::BLUE.to_array()));
        assert!(quads.iter().all(|v| v.tex_coords == [0.0, 0.0]));
    }
}
