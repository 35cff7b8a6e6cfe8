//! The glyph layout engine.
//!
//! [`layout`] turns a string, its style and a glyph provider into a line
//! table and a flat vertex buffer in box-local coordinates. It is a pure
//! function; alignment, overflow, decorations and selection are separate
//! stages applied to its output.
//!
//! # Wrapping
//!
//! With wrapping enabled the engine is a greedy word-wrapper with one word of
//! lookahead:
//!
//! - A space is always placed on the current line. If the word after it does
//!   not fit in the room left, the line breaks after the space.
//! - Any other character that would cross the right edge of the box starts a
//!   new line, unless it is already the first character of its line.
//!
//! Wrap-induced breaks advance the pen by the line spacing, explicit `'\n'`
//! breaks by the paragraph spacing.

use std::ops::Range;

use scribe_core::alloc::HashMap;
use scribe_core::font::{Glyph, GlyphProvider};
use scribe_core::geometry::Rect;
use scribe_core::graphics::TextVertex;
use scribe_core::math::Vec2;
use scribe_core::profiling::profile_function;

use crate::quad::{VERTICES_PER_QUAD, push_glyph_quad, vertex_bounds};
use crate::style::StyleAttributes;

/// Layout record of one character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterInfo {
    /// Pen position on the baseline where the character was placed.
    pub position: Vec2,
    /// The character's quad in the vertex buffer, always six vertices long.
    pub vertices: Range<usize>,
    /// Horizontal distance the pen moved past this character.
    pub advance: f32,
}

impl CharacterInfo {
    /// Pen position after this character.
    #[inline]
    pub fn end_x(&self) -> f32 {
        self.position.x + self.advance
    }
}

/// One visual line, left to right.
pub type Line = Vec<CharacterInfo>;

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutput {
    /// Never empty; an empty string has one empty line.
    pub lines: Vec<Line>,
    /// Pen position at the start of each line, parallel to `lines`.
    pub line_starts: Vec<Vec2>,
    pub vertices: Vec<TextVertex>,
    /// Conservative box around everything placed, anchored at the origin.
    /// Whitespace widens it only as far as its own pen position.
    pub bounds: Rect<f32>,
    pub string_start: Vec2,
    pub string_end: Vec2,
}

impl LayoutOutput {
    /// Layout of an empty string at `character_size`.
    pub fn empty(character_size: f32) -> Self {
        let start = Vec2::new(0.0, character_size);
        Self {
            lines: vec![Vec::new()],
            line_starts: vec![start],
            vertices: Vec::new(),
            bounds: Rect::ZERO,
            string_start: start,
            string_end: start,
        }
    }

    /// Number of characters laid out, one per `char` of the input.
    pub fn character_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// All character records in string order.
    pub fn entries(&self) -> impl Iterator<Item = &CharacterInfo> {
        self.lines.iter().flatten()
    }

    pub fn entry(&self, index: usize) -> Option<&CharacterInfo> {
        self.entries().nth(index)
    }

    /// Horizontal extent `(left, right)` of a line's drawn text.
    ///
    /// Lines start at their pen origin and end after the advance of the last
    /// visible character. Trailing whitespace, such as the space a wrapped
    /// line ends with, is not part of the extent. A line without visible
    /// characters has zero width at its origin.
    pub fn line_extent(&self, line: usize) -> (f32, f32) {
        let left = self.line_starts[line].x;
        let right = self.lines[line]
            .iter()
            .rev()
            .find(|entry| self.is_visible(entry))
            .map_or(left, CharacterInfo::end_x);
        (left, right)
    }

    /// Whether the character's quad covers any area. Whitespace, tabs and
    /// line breaks are placed as zero-area quads.
    pub fn is_visible(&self, entry: &CharacterInfo) -> bool {
        !self.quad_bounds(entry).is_empty()
    }

    /// Bounds of one character's quad.
    pub fn quad_bounds(&self, entry: &CharacterInfo) -> Rect<f32> {
        vertex_bounds(&self.vertices[entry.vertices.clone()])
            .unwrap_or(Rect::new(entry.position.x, entry.position.y, 0.0, 0.0))
    }

    /// Move every vertex, record and anchor by `offset`.
    pub(crate) fn translate(&mut self, offset: Vec2) {
        for vertex in &mut self.vertices {
            vertex.translate(offset);
        }
        for entry in self.lines.iter_mut().flatten() {
            entry.position += offset;
        }
        for start in &mut self.line_starts {
            *start += offset;
        }
        self.string_start += offset;
        self.string_end += offset;
        self.bounds = self.bounds.translate(offset);
    }
}

impl Default for LayoutOutput {
    fn default() -> Self {
        Self::empty(0.0)
    }
}

/// Per-pass glyph memo so lookahead does not query the provider twice.
struct GlyphLookup<'a> {
    font: &'a dyn GlyphProvider,
    size: u32,
    bold: bool,
    cache: HashMap<char, Glyph>,
}

impl<'a> GlyphLookup<'a> {
    fn new(font: &'a dyn GlyphProvider, size: u32, bold: bool) -> Self {
        Self {
            font,
            size,
            bold,
            cache: HashMap::new(),
        }
    }

    fn get(&mut self, ch: char) -> Glyph {
        let (font, size, bold) = (self.font, self.size, self.bold);
        *self.cache.entry(ch).or_insert_with(|| font.glyph(ch, size, bold))
    }
}

struct LineBuilder {
    lines: Vec<Line>,
    line_starts: Vec<Vec2>,
    current: Line,
    vertices: Vec<TextVertex>,
    pen: Vec2,
    max: Vec2,
}

impl LineBuilder {
    fn new(start: Vec2, capacity: usize) -> Self {
        Self {
            lines: Vec::new(),
            line_starts: vec![start],
            current: Vec::new(),
            vertices: Vec::with_capacity(capacity * VERTICES_PER_QUAD),
            pen: start,
            max: Vec2::ZERO,
        }
    }

    fn place(&mut self, glyph: &Glyph, advance: f32, style: &StyleAttributes) {
        let start = self.vertices.len();
        push_glyph_quad(&mut self.vertices, self.pen, style.text_color, glyph, style.italic_shear());
        let end = self.vertices.len();

        if let Some(quad) = vertex_bounds(&self.vertices[start..end]) {
            self.max = self.max.max(Vec2::new(quad.right(), quad.bottom()));
            if !quad.is_empty() {
                self.max.x = self.max.x.max(self.pen.x + advance);
            }
        }
        self.current.push(CharacterInfo {
            position: self.pen,
            vertices: start..end,
            advance,
        });
        self.pen.x += advance;
    }

    fn break_line(&mut self, step: f32) {
        self.lines.push(std::mem::take(&mut self.current));
        self.pen = Vec2::new(0.0, self.pen.y + step);
        self.line_starts.push(self.pen);
    }

    fn finish(mut self, string_start: Vec2) -> LayoutOutput {
        let placed_any = !self.vertices.is_empty();
        self.lines.push(self.current);
        let bounds = if placed_any {
            Rect::new(0.0, 0.0, self.max.x, self.max.y)
        } else {
            Rect::ZERO
        };
        LayoutOutput {
            lines: self.lines,
            line_starts: self.line_starts,
            vertices: self.vertices,
            bounds,
            string_start,
            string_end: self.pen,
        }
    }
}

/// Lay out `text` inside the box described by `style`.
///
/// The pen starts at `(0, character_size)`, so the first baseline sits one
/// character size below the top of the box. Every `char` of `text` yields
/// exactly one [`CharacterInfo`] with a six-vertex quad; whitespace, tabs,
/// `'\r'` and `'\n'` get zero-area quads so indices and records stay in step.
pub fn layout(text: &str, style: &StyleAttributes, font: &dyn GlyphProvider) -> LayoutOutput {
    profile_function!();

    let size = style.character_size;
    let start = Vec2::new(0.0, size as f32);
    let chars: Vec<char> = text.chars().collect();
    let mut glyphs = GlyphLookup::new(font, size, style.is_bold());

    let line_height = font.line_spacing(size);
    let line_step = line_height * style.line_spacing;
    let paragraph_step = line_height * style.paragraph_spacing;
    let box_width = style.size.x;

    let space = glyphs.get(' ');
    let letter_spacing = (space.advance / 3.0) * (style.letter_spacing - 1.0);
    let whitespace = space.advance + letter_spacing;

    let mut builder = LineBuilder::new(start, chars.len());
    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '\n' => {
                builder.place(&Glyph::default(), 0.0, style);
                builder.break_line(paragraph_step);
            }
            '\r' => builder.place(&Glyph::default(), 0.0, style),
            ' ' => {
                builder.place(&space, whitespace, style);
                if style.wrapping {
                    let word: f32 = chars[i + 1..]
                        .iter()
                        .take_while(|c| !matches!(c, ' ' | '\t' | '\n'))
                        .map(|&c| glyphs.get(c).advance + letter_spacing)
                        .sum();
                    if word > 0.0 && word > box_width - builder.pen.x {
                        builder.break_line(line_step);
                    }
                }
            }
            _ => {
                let (glyph, advance) = if ch == '\t' {
                    (Glyph::default(), whitespace * 4.0)
                } else {
                    let glyph = glyphs.get(ch);
                    (glyph, glyph.advance + letter_spacing)
                };
                if style.wrapping && builder.pen.x > 0.0 && builder.pen.x + advance > box_width {
                    builder.break_line(line_step);
                }
                builder.place(&glyph, advance, style);
            }
        }
    }

    let output = builder.finish(start);
    tracing::trace!(
        chars = chars.len(),
        lines = output.lines.len(),
        vertices = output.vertices.len(),
        "laid out text"
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_test_utils::MonoFont;

    fn style(width: f32) -> StyleAttributes {
        StyleAttributes::default().with_size(width, 100.0)
    }

    fn line_text(text: &str, out: &LayoutOutput) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut index = 0;
        out.lines
            .iter()
            .map(|line| {
                let s: String = chars[index..index + line.len()].iter().collect();
                index += line.len();
                s
            })
            .collect()
    }

    #[test]
    fn test_empty_string() {
        let font = MonoFont::new();
        let out = layout("", &style(100.0), &font);
        assert_eq!(out.lines.len(), 1);
        assert!(out.lines[0].is_empty());
        assert!(out.vertices.is_empty());
        assert_eq!(out.string_start, Vec2::new(0.0, 20.0));
        assert_eq!(out.string_end, Vec2::new(0.0, 20.0));
        assert_eq!(out.bounds, Rect::ZERO);
    }

    #[test]
    fn test_single_line_positions() {
        let font = MonoFont::new();
        let out = layout("Hello", &style(300.0), &font);
        assert_eq!(out.lines.len(), 1);
        let xs: Vec<f32> = out.entries().map(|e| e.position.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        assert!(out.entries().all(|e| e.position.y == 20.0));
        assert_eq!(out.string_end, Vec2::new(50.0, 20.0));
        assert_eq!(out.vertices.len(), 30);
    }

    #[test]
    fn test_every_character_owns_one_quad() {
        let font = MonoFont::new();
        let text = "a b\tc\r\nd";
        let out = layout(text, &style(300.0), &font);
        assert_eq!(out.character_count(), text.chars().count());
        assert_eq!(out.vertices.len(), text.chars().count() * 6);
        for (i, entry) in out.entries().enumerate() {
            assert_eq!(entry.vertices, i * 6..i * 6 + 6);
        }
    }

    #[test]
    fn test_newline_uses_paragraph_spacing() {
        let font = MonoFont::new();
        let out = layout("ab\ncd", &style(300.0), &font);
        assert_eq!(out.lines.len(), 2);
        // Line spacing is 24, paragraph factor 1.5.
        assert_eq!(out.lines[1][0].position, Vec2::new(0.0, 56.0));
        // The break itself is recorded at the end of the first line.
        assert_eq!(out.lines[0].len(), 3);
        assert_eq!(out.lines[0][2].position, Vec2::new(20.0, 20.0));
        assert_eq!(out.lines[0][2].advance, 0.0);
    }

    #[test]
    fn test_trailing_newline_opens_empty_line() {
        let font = MonoFont::new();
        let out = layout("ab\n", &style(300.0), &font);
        assert_eq!(out.lines.len(), 2);
        assert!(out.lines[1].is_empty());
        assert_eq!(out.string_end, Vec2::new(0.0, 56.0));
        assert_eq!(out.line_starts[1], Vec2::new(0.0, 56.0));
    }

    #[test]
    fn test_space_is_kept_at_end_of_wrapped_line() {
        let font = MonoFont::new();
        let text = "ab cd";
        let out = layout(text, &style(25.0), &font);
        assert_eq!(line_text(text, &out), vec!["ab ", "cd"]);
        assert_eq!(out.lines[1][0].position, Vec2::new(0.0, 44.0));
        assert_eq!(out.string_end, Vec2::new(20.0, 44.0));
    }

    #[test]
    fn test_wrap_after_second_word() {
        let font = MonoFont::new();
        let text = "aa bb cc";
        // Two words and the space between them fill the box exactly.
        let out = layout(text, &style(50.0), &font);
        assert_eq!(line_text(text, &out), vec!["aa bb ", "cc"]);
    }

    #[test]
    fn test_long_word_breaks_mid_word() {
        let font = MonoFont::new();
        let text = "abcdefg";
        let out = layout(text, &style(30.0), &font);
        assert_eq!(line_text(text, &out), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_glyph_wider_than_box_stays_on_its_line() {
        let font = MonoFont::with_advance(50.0);
        let out = layout("ab", &style(30.0), &font);
        assert_eq!(out.lines.len(), 2);
        assert!(out.lines.iter().all(|line| line.len() == 1));
    }

    #[test]
    fn test_no_wrapping_keeps_one_line() {
        let font = MonoFont::new();
        let s = style(25.0).with_wrapping(false);
        let out = layout("ab cd ef", &s, &font);
        assert_eq!(out.lines.len(), 1);
        assert_eq!(out.string_end.x, 80.0);
    }

    #[test]
    fn test_trailing_space_does_not_open_line() {
        let font = MonoFont::new();
        let out = layout("ab ", &style(25.0), &font);
        assert_eq!(out.lines.len(), 1);
    }

    #[test]
    fn test_line_count_matches_breaks() {
        let font = MonoFont::new();
        let out = layout("one two\nthree four five", &style(70.0), &font);
        // "one two" fits in 70, "three four five" wraps twice.
        assert_eq!(out.lines.len(), 4);
    }

    #[test]
    fn test_letter_spacing() {
        let font = MonoFont::with_advance(9.0);
        let s = style(300.0).with_letter_spacing(2.0);
        let out = layout("ab", &s, &font);
        // Space advance 9, so each character gains (9 / 3) * 1 = 3.
        assert_eq!(out.lines[0][1].position.x, 12.0);
        assert_eq!(out.string_end.x, 24.0);
    }

    #[test]
    fn test_tab_is_four_spaces() {
        let font = MonoFont::new();
        let out = layout("\ta", &style(300.0), &font);
        assert_eq!(out.lines[0][1].position.x, 40.0);
    }

    #[test]
    fn test_carriage_return_has_no_width() {
        let font = MonoFont::new();
        let out = layout("a\rb", &style(300.0), &font);
        assert_eq!(out.lines.len(), 1);
        assert_eq!(out.lines[0][2].position.x, 10.0);
    }

    #[test]
    fn test_bounds_are_conservative() {
        let font = MonoFont::new();
        let out = layout("ab", &style(300.0), &font);
        // Glyphs reach 0.2 * size below the baseline.
        assert_eq!(out.bounds, Rect::new(0.0, 0.0, 20.0, 24.0));
    }

    #[test]
    fn test_bold_uses_bold_glyphs() {
        let font = MonoFont::new().with_bold_advance(12.0);
        let s = style(300.0).with_style(crate::style::TextStyle::BOLD);
        let out = layout("ab", &s, &font);
        assert_eq!(out.string_end.x, 24.0);
    }

    #[test]
    fn test_glyphs_are_memoized_per_pass() {
        let font = MonoFont::new();
        layout("aaaa aaaa aaaa", &style(300.0), &font);
        assert_eq!(font.lookups_for('a'), 1);
    }

    #[test]
    fn test_line_extent() {
        let font = MonoFont::new();
        let out = layout("ab\n", &style(300.0), &font);
        assert_eq!(out.line_extent(0), (0.0, 20.0));
        assert_eq!(out.line_extent(1), (0.0, 0.0));
    }

    #[test]
    fn test_line_extent_skips_hanging_space() {
        let font = MonoFont::new();
        let out = layout("ab cd", &style(25.0), &font);
        assert!(!out.is_visible(&out.lines[0][2]));
        assert_eq!(out.line_extent(0), (0.0, 20.0));
        assert_eq!(out.line_extent(1), (0.0, 20.0));
        // The hanging space does not widen the bounds past the glyphs.
        assert_eq!(out.bounds, Rect::new(0.0, 0.0, 20.0, 48.0));
    }

    #[test]
    fn test_whitespace_only_line_has_no_extent() {
        let font = MonoFont::new();
        let out = layout("  \t", &style(300.0), &font);
        assert_eq!(out.line_extent(0), (0.0, 0.0));
    }
}
