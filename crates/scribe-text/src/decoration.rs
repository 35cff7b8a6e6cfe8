//! Underline and strike-through lines.
//!
//! Decorations run after alignment so each line's bar starts and ends where
//! the aligned line does. Bars are appended after the character quads and are
//! not referenced by any [`CharacterInfo`](crate::layout::CharacterInfo).

use scribe_core::font::GlyphProvider;
use scribe_core::geometry::Rect;

use crate::layout::LayoutOutput;
use crate::quad::push_solid_quad;
use crate::style::{StyleAttributes, TextStyle};

/// Vertical placement of a decoration bar relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationMetrics {
    pub underline_offset: f32,
    pub strike_offset: f32,
    pub thickness: f32,
}

impl DecorationMetrics {
    /// Strike-through runs through the middle of a lowercase `x`.
    pub fn from_font(font: &dyn GlyphProvider, style: &StyleAttributes) -> Self {
        let size = style.character_size;
        let x_bounds = font.glyph('x', size, style.is_bold()).bounds;
        Self {
            underline_offset: font.underline_position(size),
            strike_offset: x_bounds.y + x_bounds.height / 2.0,
            thickness: font.underline_thickness(size),
        }
    }
}

/// Bar of `thickness` centred on `baseline + offset`, snapped to pixels.
fn bar(left: f32, right: f32, baseline: f32, offset: f32, thickness: f32) -> Rect<f32> {
    let top = (baseline + offset - thickness / 2.0 + 0.5).floor();
    let height = (thickness + 0.5).floor().max(1.0);
    Rect::new(left, top, right - left, height)
}

/// Append one bar per decorated line, spanning the line's visible text.
/// Returns the number of bars added.
pub fn apply(layout: &mut LayoutOutput, style: &StyleAttributes, font: &dyn GlyphProvider) -> usize {
    if !style.style.has_decorations() {
        return 0;
    }

    let metrics = DecorationMetrics::from_font(font, style);
    let texel = font.white_texel();
    let mut offsets = Vec::with_capacity(2);
    if style.style.contains(TextStyle::UNDERLINED) {
        offsets.push(metrics.underline_offset);
    }
    if style.style.contains(TextStyle::STRIKE_THROUGH) {
        offsets.push(metrics.strike_offset);
    }

    let mut bars = Vec::new();
    for line in 0..layout.lines.len() {
        let (left, right) = layout.line_extent(line);
        if right <= left {
            continue;
        }
        let baseline = layout.line_starts[line].y;
        for &offset in &offsets {
            bars.push(bar(left, right, baseline, offset, metrics.thickness));
        }
    }

    for rect in &bars {
        push_solid_quad(&mut layout.vertices, *rect, style.text_color, texel);
    }
    bars.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use scribe_test_utils::MonoFont;

    #[test]
    fn test_no_decorations_is_noop() {
        let font = MonoFont::new();
        let style = StyleAttributes::default();
        let mut out = layout("hello", &style, &font);
        assert_eq!(apply(&mut out, &style, &font), 0);
        assert_eq!(out.vertices.len(), 30);
    }

    #[test]
    fn test_underline_per_line() {
        let font = MonoFont::new();
        let style = StyleAttributes::default()
            .with_size(100.0, 100.0)
            .with_style(TextStyle::UNDERLINED);
        let mut out = layout("ab\ncd\n", &style, &font);
        // The trailing empty line gets no bar.
        assert_eq!(apply(&mut out, &style, &font), 2);
        assert_eq!(out.vertices.len(), 6 * 6 + 2 * 6);

        // Underline 2 px below the baseline, 1 px thick.
        let first_bar = &out.vertices[36..42];
        assert_eq!(first_bar[1].position, [0.0, 22.0]);
        assert_eq!(first_bar[5].position, [20.0, 23.0]);
        assert!(first_bar.iter().all(|v| v.tex_coords == [1.0, 1.0]));
    }

    #[test]
    fn test_underline_stops_before_hanging_space() {
        let font = MonoFont::new();
        let style = StyleAttributes::default()
            .with_size(25.0, 100.0)
            .with_style(TextStyle::UNDERLINED);
        let mut out = layout("ab cd", &style, &font);
        assert_eq!(apply(&mut out, &style, &font), 2);
        let first_bar = &out.vertices[30..36];
        assert_eq!(first_bar[1].position[0], 0.0);
        assert_eq!(first_bar[5].position[0], 20.0);
    }

    #[test]
    fn test_strike_through_crosses_x_height() {
        let font = MonoFont::new();
        let style = StyleAttributes::default().with_style(TextStyle::STRIKE_THROUGH);
        let metrics = DecorationMetrics::from_font(&font, &style);
        // MonoFont glyphs span -16..4 around the baseline at size 20.
        assert_eq!(metrics.strike_offset, -6.0);

        let mut out = layout("ab", &style, &font);
        assert_eq!(apply(&mut out, &style, &font), 1);
    }

    #[test]
    fn test_both_decorations() {
        let font = MonoFont::new();
        let style = StyleAttributes::default().with_style(TextStyle::UNDERLINED | TextStyle::STRIKE_THROUGH);
        let mut out = layout("ab", &style, &font);
        assert_eq!(apply(&mut out, &style, &font), 2);
    }
}
