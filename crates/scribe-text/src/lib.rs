//! Text layout and text fields for the Scribe UI toolkit.
//!
//! The crate has two layers:
//!
//! - **The layout engine** ([`layout()`]): a pure function from a string,
//!   [`StyleAttributes`] and a [`GlyphProvider`](scribe_core::font::GlyphProvider)
//!   to a line table and a vertex buffer, followed by independent stages for
//!   [overflow], [alignment](align), [decorations](decoration) and
//!   [selection] highlights.
//! - **[`TextField`]**: the stateful wrapper widgets use. It keeps the string
//!   and style, rebuilds geometry lazily on the first read after a change and
//!   answers cursor queries (index to position and back).
//!
//! Fonts come from any `GlyphProvider`. [`CosmicFont`] is the real one, built
//! on cosmic-text; [`FontRegistry`] keeps them by name.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use scribe_core::math::Vec2;
//! use scribe_text::{HorizontalAlign, TextField};
//! use scribe_test_utils::MonoFont;
//!
//! let mut field = TextField::with_font(Arc::new(MonoFont::new()));
//! field.set_size(Vec2::new(200.0, 40.0));
//! field.set_string("Hello, world");
//! field.set_horizontal_alignment(HorizontalAlign::Centered);
//! field.set_selection(0, 5);
//!
//! let batch = field.render();
//! assert_eq!(batch.glyphs.len(), 12 * 6);
//! assert_eq!(batch.selection.len(), 5 * 6);
//! ```

pub mod align;
pub mod atlas;
pub mod cosmic;
pub mod decoration;
pub mod error;
pub mod field;
pub mod layout;
pub mod overflow;
mod quad;
pub mod registry;
pub mod selection;
pub mod style;

pub use cosmic::{CosmicFont, CosmicFontConfig};
pub use error::{TextError, TextResult};
pub use field::{RenderBatch, TextField};
pub use layout::{CharacterInfo, LayoutOutput, Line, layout};
pub use quad::VERTICES_PER_QUAD;
pub use registry::FontRegistry;
pub use style::{HorizontalAlign, OverflowType, StyleAttributes, TextStyle, VerticalAlign};
