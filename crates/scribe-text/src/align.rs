//! Alignment passes over an already emitted layout.
//!
//! Both passes move existing vertices and records instead of laying out
//! again. Offsets are rounded to whole pixels so glyphs stay on the pixel
//! grid.

use scribe_core::math::Vec2;

use crate::layout::LayoutOutput;
use crate::style::{HorizontalAlign, VerticalAlign};

/// Offset that moves a line spanning `left..right` into place.
pub fn horizontal_offset(align: HorizontalAlign, box_width: f32, left: f32, right: f32) -> f32 {
    let offset = match align {
        HorizontalAlign::Left => 0.0,
        HorizontalAlign::Right => box_width - right,
        HorizontalAlign::Centered => box_width / 2.0 - (left + right) / 2.0,
    };
    offset.round()
}

/// Offset that moves a block of height `text_height` into place.
pub fn vertical_offset(align: VerticalAlign, box_height: f32, text_height: f32) -> f32 {
    let offset = match align {
        VerticalAlign::Top => 0.0,
        VerticalAlign::Middle => (box_height - text_height) / 2.0,
        VerticalAlign::Bottom => box_height - text_height,
    };
    offset.round()
}

/// Shift every line on its own so it sits left, centred or right in the box.
///
/// Lines are measured by [`LayoutOutput::line_extent`], which stops at the
/// last visible character.
///
/// The string start moves with the first line and the string end with the
/// last one. The horizontal range of `bounds` is recomputed from the moved
/// lines.
pub fn apply_horizontal(layout: &mut LayoutOutput, align: HorizontalAlign, box_width: f32) {
    if align == HorizontalAlign::Left {
        return;
    }

    let last_line = layout.lines.len().saturating_sub(1);
    for line in 0..layout.lines.len() {
        let (left, right) = layout.line_extent(line);
        let dx = horizontal_offset(align, box_width, left, right);
        if dx == 0.0 {
            continue;
        }

        let LayoutOutput {
            lines,
            line_starts,
            vertices,
            string_start,
            string_end,
            ..
        } = &mut *layout;
        for entry in &mut lines[line] {
            entry.position.x += dx;
            for vertex in &mut vertices[entry.vertices.clone()] {
                vertex.translate(Vec2::new(dx, 0.0));
            }
        }
        line_starts[line].x += dx;
        if line == 0 {
            string_start.x += dx;
        }
        if line == last_line {
            string_end.x += dx;
        }
    }

    refit_horizontal_bounds(layout);
}

/// Horizontal range of the visible text. Whitespace is ignored, so a
/// hanging space never widens the bounds.
fn refit_horizontal_bounds(layout: &mut LayoutOutput) {
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    for line in 0..layout.lines.len() {
        let (left, right) = layout.line_extent(line);
        if right <= left {
            continue;
        }
        min_x = min_x.min(left);
        max_x = max_x.max(right);
        for entry in layout.lines[line].iter().filter(|entry| layout.is_visible(entry)) {
            let quad = layout.quad_bounds(entry);
            min_x = min_x.min(quad.x);
            max_x = max_x.max(quad.right());
        }
    }

    if min_x > max_x {
        layout.bounds.x = layout.string_start.x;
        layout.bounds.width = 0.0;
    } else {
        layout.bounds.x = min_x;
        layout.bounds.width = max_x - min_x;
    }
}

/// Shift the whole block up or down by one common offset.
///
/// The block height is the height of `bounds`. An empty layout has no height,
/// so `character_size` stands in for it, keeping an empty field's cursor
/// where the first line would be.
pub fn apply_vertical(layout: &mut LayoutOutput, align: VerticalAlign, box_height: f32, character_size: f32) {
    let text_height = if layout.character_count() == 0 {
        character_size
    } else {
        layout.bounds.height
    };
    let dy = vertical_offset(align, box_height, text_height);
    if dy != 0.0 {
        layout.translate(Vec2::new(0.0, dy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::style::StyleAttributes;
    use scribe_test_utils::MonoFont;

    fn laid_out(text: &str, width: f32, height: f32) -> LayoutOutput {
        let font = MonoFont::new();
        layout(text, &StyleAttributes::default().with_size(width, height), &font)
    }

    #[test]
    fn test_offsets_are_rounded() {
        assert_eq!(horizontal_offset(HorizontalAlign::Centered, 25.0, 0.0, 10.0), 8.0);
        assert_eq!(horizontal_offset(HorizontalAlign::Right, 25.5, 0.0, 10.0), 16.0);
        assert_eq!(vertical_offset(VerticalAlign::Middle, 41.0, 24.0), 9.0);
    }

    #[test]
    fn test_left_is_identity() {
        let mut out = laid_out("hello", 100.0, 40.0);
        let before = out.clone();
        apply_horizontal(&mut out, HorizontalAlign::Left, 100.0);
        assert_eq!(out, before);
    }

    #[test]
    fn test_right_alignment() {
        let mut out = laid_out("abc", 100.0, 40.0);
        apply_horizontal(&mut out, HorizontalAlign::Right, 100.0);
        assert_eq!(out.lines[0][0].position.x, 70.0);
        assert_eq!(out.vertices[0].position[0], 70.0);
        assert_eq!(out.string_start.x, 70.0);
        assert_eq!(out.string_end.x, 100.0);
        assert_eq!(out.bounds.x, 70.0);
        assert_eq!(out.bounds.width, 30.0);
    }

    #[test]
    fn test_centered_lines_move_independently() {
        let mut out = laid_out("abcd\nab", 100.0, 100.0);
        apply_horizontal(&mut out, HorizontalAlign::Centered, 100.0);
        // "abcd\n" spans 0..40, "ab" spans 0..20.
        assert_eq!(out.lines[0][0].position.x, 30.0);
        assert_eq!(out.lines[1][0].position.x, 40.0);
        assert_eq!(out.string_start.x, 30.0);
        assert_eq!(out.string_end.x, 60.0);
    }

    #[test]
    fn test_right_aligned_wrapped_line_stays_in_box() {
        let mut out = laid_out("ab cd", 25.0, 100.0);
        apply_horizontal(&mut out, HorizontalAlign::Right, 25.0);
        // Both lines end at the right edge; the hanging space sits past it.
        assert_eq!(out.lines[0][0].position.x, 5.0);
        assert_eq!(out.lines[0][2].position.x, 25.0);
        assert_eq!(out.lines[1][0].position.x, 5.0);
        assert!(out.vertices.iter().all(|v| v.position[0] >= 0.0));
        assert_eq!(out.bounds.x, 5.0);
        assert_eq!(out.bounds.width, 20.0);
    }

    #[test]
    fn test_centered_wrapped_line_ignores_hanging_space() {
        let mut out = laid_out("ab cd", 25.0, 100.0);
        apply_horizontal(&mut out, HorizontalAlign::Centered, 25.0);
        // "ab" spans 0..20, so it moves by round(2.5).
        assert_eq!(out.lines[0][0].position.x, 3.0);
        assert_eq!(out.line_extent(0), (3.0, 23.0));
    }

    #[test]
    fn test_centered_empty_string_puts_cursor_mid_box() {
        let mut out = laid_out("", 100.0, 40.0);
        apply_horizontal(&mut out, HorizontalAlign::Centered, 100.0);
        assert_eq!(out.string_start.x, 50.0);
        assert_eq!(out.string_end.x, 50.0);
    }

    #[test]
    fn test_vertical_middle_and_bottom() {
        let mut out = laid_out("ab", 100.0, 100.0);
        // Bounds height is 24.
        apply_vertical(&mut out, VerticalAlign::Middle, 100.0, 20.0);
        assert_eq!(out.lines[0][0].position.y, 58.0);
        assert_eq!(out.bounds.y, 38.0);

        let mut out = laid_out("ab", 100.0, 100.0);
        apply_vertical(&mut out, VerticalAlign::Bottom, 100.0, 20.0);
        assert_eq!(out.bounds.bottom(), 100.0);
        assert_eq!(out.string_end.y, 96.0);
    }

    #[test]
    fn test_vertical_empty_uses_character_size() {
        let mut out = laid_out("", 100.0, 100.0);
        apply_vertical(&mut out, VerticalAlign::Middle, 100.0, 20.0);
        // Cursor top at 40, bottom at 60.
        assert_eq!(out.string_start.y, 60.0);
    }
}
