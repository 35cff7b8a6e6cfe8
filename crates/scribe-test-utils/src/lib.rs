//! Test utilities for the Scribe text toolkit.
//!
//! The text engine talks to the outside world through two traits from
//! `scribe-core`: [`GlyphProvider`](scribe_core::font::GlyphProvider) and
//! [`RenderSurface`](scribe_core::graphics::RenderSurface). This crate ships
//! deterministic stand-ins for both so layout can be asserted to the pixel.
//!
//! - [`MonoFont`] - fixed-advance glyph provider with exact, size-derived metrics
//! - `MockSurface` - records every draw call (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! use scribe_core::font::GlyphProvider;
//! use scribe_test_utils::MonoFont;
//!
//! let font = MonoFont::new();
//! let glyph = font.glyph('a', 20, false);
//! assert_eq!(glyph.advance, 10.0);
//! assert_eq!(font.line_spacing(20), 24.0);
//! assert_eq!(font.glyph_lookups(), 1);
//! ```
//!
//! # Design Philosophy
//!
//! ## 1. Exact metrics
//!
//! Every number `MonoFont` reports is a simple function of the pixel size or
//! the configured advance, so tests can compute expected positions by hand.
//!
//! ## 2. Interior Mutability
//!
//! Both mocks keep their logs behind a `parking_lot::Mutex` and expose them
//! through `&self`, so a test can hold an `Arc` to the font it handed to a
//! text field and still read the counters.

pub mod mono_font;
#[cfg(feature = "mock")]
pub mod mock_surface;

pub use mono_font::*;
#[cfg(feature = "mock")]
pub use mock_surface::*;
