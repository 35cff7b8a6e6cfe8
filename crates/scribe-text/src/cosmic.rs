//! A [`GlyphProvider`] backed by cosmic-text.
//!
//! Each character is shaped on its own with cosmic-text, rasterized by
//! swash and packed into a [`GlyphAtlas`]. Results are memoized per
//! `(char, size, bold)`, so the layout engine's repeated queries are cheap
//! after the first pass.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent, Weight, fontdb};
use parking_lot::Mutex;
use scribe_core::alloc::HashMap;
use scribe_core::font::{Glyph, GlyphProvider, TextureHandle};
use scribe_core::geometry::Rect;
use scribe_core::math::Vec2;
use scribe_core::profiling::profile_function;

use crate::atlas::GlyphAtlas;
use crate::error::{TextError, TextResult};

static NEXT_ATLAS_ID: AtomicU64 = AtomicU64::new(1);

/// Configuration for [`CosmicFont`].
///
/// # Memory Usage
///
/// The atlas is one byte per texel.
///
/// | Config | Atlas Size | Memory |
/// |--------|------------|--------|
/// | small() | 512x512 | 0.25 MB |
/// | medium() | 1024x1024 | 1 MB |
/// | large() | 2048x2048 | 4 MB |
#[derive(Clone, Debug, PartialEq)]
pub struct CosmicFontConfig {
    /// Atlas width and height in texels.
    /// Default: 1024
    pub atlas_size: u32,
    /// Locale used for shaping. `None` asks the operating system and falls
    /// back to `en-US`.
    pub locale: Option<String>,
}

impl Default for CosmicFontConfig {
    fn default() -> Self {
        Self {
            atlas_size: 1024,
            locale: None,
        }
    }
}

impl CosmicFontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small config for memory-constrained environments.
    pub fn small() -> Self {
        Self {
            atlas_size: 512,
            ..Default::default()
        }
    }

    pub fn medium() -> Self {
        Self {
            atlas_size: 1024,
            ..Default::default()
        }
    }

    /// Large config for many sizes or large glyphs.
    pub fn large() -> Self {
        Self {
            atlas_size: 2048,
            ..Default::default()
        }
    }

    pub fn with_atlas_size(mut self, size: u32) -> Self {
        self.atlas_size = size;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    fn resolved_locale(&self) -> String {
        self.locale
            .clone()
            .or_else(sys_locale::get_locale)
            .unwrap_or_else(|| String::from("en-US"))
    }
}

/// A cosmic-text font system with no fonts loaded, shareable between
/// several [`CosmicFont`]s.
pub fn empty_font_system(config: &CosmicFontConfig) -> Arc<Mutex<FontSystem>> {
    let db = fontdb::Database::new();
    Arc::new(Mutex::new(FontSystem::new_with_locale_and_db(config.resolved_locale(), db)))
}

type GlyphKey = (char, u32, bool);

struct RasterState {
    swash_cache: SwashCache,
    atlas: GlyphAtlas,
    glyphs: HashMap<GlyphKey, Glyph>,
    line_metrics: HashMap<u32, LineMetrics>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LineMetrics {
    line_spacing: f32,
    underline_position: f32,
    underline_thickness: f32,
}

impl LineMetrics {
    fn fallback(size: u32) -> Self {
        let size = size as f32;
        Self {
            line_spacing: size * 1.2,
            underline_position: size * 0.1,
            underline_thickness: (size / 14.0).max(1.0),
        }
    }
}

/// One font face loaded into cosmic-text.
///
/// All sizes share one atlas, so [`GlyphProvider::texture`] returns the same
/// handle for every size. Hosts upload the atlas contents returned by
/// [`CosmicFont::take_atlas_upload`] whenever it is `Some`.
pub struct CosmicFont {
    family: String,
    face: fontdb::ID,
    font_system: Arc<Mutex<FontSystem>>,
    state: Mutex<RasterState>,
}

impl std::fmt::Debug for CosmicFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmicFont")
            .field("family", &self.family)
            .field("face", &self.face)
            .finish_non_exhaustive()
    }
}

impl CosmicFont {
    /// Load a font from raw TrueType/OpenType bytes into its own font system.
    pub fn from_bytes(data: Vec<u8>, config: &CosmicFontConfig) -> TextResult<Self> {
        Self::load_into(empty_font_system(config), data, config)
    }

    /// Load a font file into its own font system.
    pub fn from_file(path: impl AsRef<Path>, config: &CosmicFontConfig) -> TextResult<Self> {
        let data = read_font_file(path.as_ref())?;
        Self::from_bytes(data, config)
    }

    /// Load a font into an existing, possibly shared, font system.
    pub fn load_into(
        font_system: Arc<Mutex<FontSystem>>,
        data: Vec<u8>,
        config: &CosmicFontConfig,
    ) -> TextResult<Self> {
        let (face, family) = {
            let mut fs = font_system.lock();
            let ids = fs.db_mut().load_font_source(fontdb::Source::Binary(Arc::new(data)));
            let face = *ids
                .first()
                .ok_or_else(|| TextError::InvalidFontData("no font face found in data".into()))?;
            let family = fs
                .db()
                .face(face)
                .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
                .ok_or_else(|| TextError::InvalidFontData("font face has no family name".into()))?;
            (face, family)
        };

        tracing::debug!(family = %family, atlas_size = config.atlas_size, "loaded font face");

        Ok(Self {
            family,
            face,
            font_system,
            state: Mutex::new(RasterState {
                swash_cache: SwashCache::new(),
                atlas: GlyphAtlas::new(NEXT_ATLAS_ID.fetch_add(1, Ordering::Relaxed), config.atlas_size),
                glyphs: HashMap::new(),
                line_metrics: HashMap::new(),
            }),
        })
    }

    /// Family name the face registered under.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Atlas pixels to upload, one byte of coverage per texel, if they
    /// changed since the last call.
    pub fn take_atlas_upload(&self) -> Option<(TextureHandle, Vec<u8>)> {
        let mut state = self.state.lock();
        let handle = state.atlas.handle();
        state.atlas.take_upload().map(|pixels| (handle, pixels.to_vec()))
    }

    fn rasterize(&self, state: &mut RasterState, ch: char, size: u32, bold: bool) -> Glyph {
        profile_function!();

        let mut font_system = self.font_system.lock();
        let font_size = size as f32;
        let mut buffer = Buffer::new(&mut font_system, Metrics::new(font_size, font_size));
        let attrs = Attrs::new()
            .family(Family::Name(&self.family))
            .weight(if bold { Weight::BOLD } else { Weight::NORMAL });
        let mut utf8 = [0u8; 4];
        buffer.set_text(&mut font_system, ch.encode_utf8(&mut utf8), attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut font_system, false);

        let Some(layout_glyph) = buffer.layout_runs().find_map(|run| run.glyphs.first().cloned()) else {
            return Glyph::default();
        };
        let advance = layout_glyph.w;
        let physical = layout_glyph.physical((0., 0.), 1.0);

        let Some(image) = state.swash_cache.get_image(&mut font_system, physical.cache_key) else {
            return Glyph {
                advance,
                ..Default::default()
            };
        };

        let width = image.placement.width;
        let height = image.placement.height;
        if width == 0 || height == 0 {
            return Glyph {
                advance,
                ..Default::default()
            };
        }

        let coverage: Vec<u8> = match image.content {
            SwashContent::Mask => image.data.clone(),
            // Keep alpha only; the atlas stores coverage.
            SwashContent::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
            SwashContent::SubpixelMask => image
                .data
                .chunks_exact(4)
                .map(|px| px[0].max(px[1]).max(px[2]))
                .collect(),
        };
        let bounds = Rect::new(
            image.placement.left as f32,
            -(image.placement.top as f32),
            width as f32,
            height as f32,
        );

        let texture_rect = state
            .atlas
            .insert(width, height, &coverage)
            .map_or(Rect::ZERO, |entry| {
                Rect::new(entry.x as f32, entry.y as f32, entry.width as f32, entry.height as f32)
            });

        Glyph {
            advance,
            bounds,
            texture_rect,
        }
    }

    fn line_metrics(&self, size: u32) -> LineMetrics {
        let mut state = self.state.lock();
        if let Some(metrics) = state.line_metrics.get(&size) {
            return *metrics;
        }

        let metrics = {
            let mut font_system = self.font_system.lock();
            match font_system.get_font(self.face) {
                Some(font) => {
                    let m = font.as_swash().metrics(&[]).scale(size as f32);
                    LineMetrics {
                        line_spacing: m.ascent + m.descent + m.leading,
                        underline_position: -m.underline_offset,
                        underline_thickness: m.stroke_size.max(1.0),
                    }
                }
                None => {
                    tracing::warn!(family = %self.family, "font face disappeared, using fallback metrics");
                    LineMetrics::fallback(size)
                }
            }
        };
        state.line_metrics.insert(size, metrics);
        metrics
    }
}

impl GlyphProvider for CosmicFont {
    fn glyph(&self, ch: char, size: u32, bold: bool) -> Glyph {
        let mut state = self.state.lock();
        let key = (ch, size, bold);
        if let Some(glyph) = state.glyphs.get(&key) {
            return *glyph;
        }
        let glyph = self.rasterize(&mut state, ch, size, bold);
        state.glyphs.insert(key, glyph);
        glyph
    }

    fn line_spacing(&self, size: u32) -> f32 {
        self.line_metrics(size).line_spacing
    }

    fn underline_position(&self, size: u32) -> f32 {
        self.line_metrics(size).underline_position
    }

    fn underline_thickness(&self, size: u32) -> f32 {
        self.line_metrics(size).underline_thickness
    }

    fn texture(&self, _size: u32) -> Option<TextureHandle> {
        Some(self.state.lock().atlas.handle())
    }

    fn white_texel(&self) -> Vec2 {
        self.state.lock().atlas.white_texel()
    }
}

pub(crate) fn read_font_file(path: &Path) -> TextResult<Vec<u8>> {
    if !path.exists() {
        return Err(TextError::FontFileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read(path)?)
}
