//! Style attributes of a text field.

use bitflags::bitflags;
use scribe_core::Color;
use scribe_core::math::Vec2;

/// Horizontal placement of each line inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Centered,
    Right,
}

/// Vertical placement of the whole text block inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// What to do with text that does not fit in the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowType {
    /// Render everything, even outside the box.
    #[default]
    Overflow,
    /// Cut the displayed text before the first character that leaves the box.
    Truncate,
    /// Like `Truncate`, but give up four more characters and show `...`.
    Dotted,
}

bitflags! {
    /// Style bits applied to the whole string.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextStyle: u8 {
        const REGULAR        = 0;
        const BOLD           = 1 << 0;
        const ITALIC         = 1 << 1;
        const UNDERLINED     = 1 << 2;
        const STRIKE_THROUGH = 1 << 3;
    }
}

impl TextStyle {
    /// Whether the decoration stage has anything to emit.
    #[inline]
    pub fn has_decorations(&self) -> bool {
        self.intersects(Self::UNDERLINED | Self::STRIKE_THROUGH)
    }
}

/// Everything besides the string and the font that decides how text is laid
/// out and colored.
///
/// `Default` matches a freshly created text field: 20 px black text, single
/// line spacing, 1.5 paragraph spacing, wrapping on, in a 300 x 40 box.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleAttributes {
    /// Pixel size passed to the glyph provider.
    pub character_size: u32,
    /// Multiplier on the font's line spacing for wrap-induced breaks.
    pub line_spacing: f32,
    /// Multiplier on the font's line spacing for explicit `'\n'` breaks.
    pub paragraph_spacing: f32,
    /// `1.0` is the font's natural spacing.
    pub letter_spacing: f32,
    pub style: TextStyle,
    pub text_color: Color,
    pub selection_color: Color,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    pub overflow: OverflowType,
    pub wrapping: bool,
    /// Width and height of the layout box.
    pub size: Vec2,
}

impl Default for StyleAttributes {
    fn default() -> Self {
        Self {
            character_size: 20,
            line_spacing: 1.0,
            paragraph_spacing: 1.5,
            letter_spacing: 1.0,
            style: TextStyle::REGULAR,
            text_color: Color::BLACK,
            selection_color: Color::from_rgba_u8(0, 0, 255, 100),
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            overflow: OverflowType::Overflow,
            wrapping: true,
            size: Vec2::new(300.0, 40.0),
        }
    }
}

impl StyleAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_character_size(mut self, size: u32) -> Self {
        self.character_size = size;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn with_wrapping(mut self, wrapping: bool) -> Self {
        self.wrapping = wrapping;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowType) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_alignment(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        self.horizontal_align = horizontal;
        self.vertical_align = vertical;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_letter_spacing(mut self, factor: f32) -> Self {
        self.letter_spacing = factor;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.style.contains(TextStyle::BOLD)
    }

    /// Horizontal shear applied per pixel of height, zero unless italic.
    pub fn italic_shear(&self) -> f32 {
        if self.style.contains(TextStyle::ITALIC) {
            // 12 degrees
            0.209
        } else {
            0.0
        }
    }
}
