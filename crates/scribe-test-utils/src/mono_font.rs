//! A fixed-advance glyph provider.

use parking_lot::Mutex;
use scribe_core::alloc::HashMap;
use scribe_core::font::{Glyph, GlyphProvider, TextureHandle};
use scribe_core::geometry::Rect;
use scribe_core::math::Vec2;

/// Glyph provider where every character advances by the same width.
///
/// Metrics at pixel size `s`:
///
/// | query | value |
/// |-------|-------|
/// | advance | `advance` (default 10), or `bold_advance` for bold glyphs |
/// | bounds (visible glyph) | `left 0, top -0.8 s, width advance, height s` |
/// | bounds (whitespace) | empty |
/// | line spacing | `1.2 s` |
/// | underline position / thickness | `0.1 s` / `0.05 s` |
///
/// Each distinct character gets its own `advance x s` cell in a virtual
/// texture, in order of first lookup.
pub struct MonoFont {
    advance: f32,
    bold_advance: f32,
    texture_id: u64,
    state: Mutex<MonoFontState>,
}

#[derive(Default)]
struct MonoFontState {
    lookups: usize,
    per_char: HashMap<char, usize>,
    cells: HashMap<char, u32>,
}

impl MonoFont {
    /// A font with a 10 px advance for every glyph.
    pub fn new() -> Self {
        Self::with_advance(10.0)
    }

    pub fn with_advance(advance: f32) -> Self {
        Self {
            advance,
            bold_advance: advance,
            texture_id: 1,
            state: Mutex::new(MonoFontState::default()),
        }
    }

    /// Use a different advance for bold glyphs.
    pub fn with_bold_advance(mut self, bold_advance: f32) -> Self {
        self.bold_advance = bold_advance;
        self
    }

    pub fn with_texture_id(mut self, id: u64) -> Self {
        self.texture_id = id;
        self
    }

    pub fn advance(&self) -> f32 {
        self.advance
    }

    /// Total number of `glyph` calls so far.
    pub fn glyph_lookups(&self) -> usize {
        self.state.lock().lookups
    }

    /// Number of `glyph` calls for one character.
    pub fn lookups_for(&self, ch: char) -> usize {
        self.state.lock().per_char.get(&ch).copied().unwrap_or(0)
    }

    pub fn reset_counters(&self) {
        let mut state = self.state.lock();
        state.lookups = 0;
        state.per_char.clear();
    }
}

impl Default for MonoFont {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphProvider for MonoFont {
    fn glyph(&self, ch: char, size: u32, bold: bool) -> Glyph {
        let mut state = self.state.lock();
        state.lookups += 1;
        *state.per_char.entry(ch).or_insert(0) += 1;

        let advance = if bold { self.bold_advance } else { self.advance };
        if ch.is_whitespace() {
            return Glyph {
                advance,
                ..Default::default()
            };
        }

        let next_cell = state.cells.len() as u32;
        let cell = *state.cells.entry(ch).or_insert(next_cell);
        let s = size as f32;
        Glyph {
            advance,
            bounds: Rect::new(0.0, -0.8 * s, advance, s),
            texture_rect: Rect::new(2.0 + cell as f32 * advance, 0.0, advance, s),
        }
    }

    fn line_spacing(&self, size: u32) -> f32 {
        size as f32 * 1.2
    }

    fn underline_position(&self, size: u32) -> f32 {
        size as f32 * 0.1
    }

    fn underline_thickness(&self, size: u32) -> f32 {
        size as f32 * 0.05
    }

    fn texture(&self, size: u32) -> Option<TextureHandle> {
        Some(TextureHandle {
            id: self.texture_id,
            width: 1024,
            height: size.max(1),
        })
    }

    fn white_texel(&self) -> Vec2 {
        Vec2::new(1.0, 1.0)
    }
}
