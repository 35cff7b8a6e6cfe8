//! Scribe Core
//!
//! This crate contains the shared building blocks of the Scribe text toolkit:
//! math and geometry types, colors, logging and profiling helpers, and the two
//! interfaces the text engine consumes from its host, [`font::GlyphProvider`]
//! and [`graphics::RenderSurface`].

pub mod alloc;
pub mod color;
pub mod font;
pub mod geometry;
pub mod graphics;
pub mod logging;
pub mod math;
pub mod profiling;

pub use color::Color;
