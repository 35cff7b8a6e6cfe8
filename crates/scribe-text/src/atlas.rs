//! CPU-side glyph atlas.
//!
//! Glyph coverage is packed into a single-channel square texture. Texture
//! coordinates handed out are in texels, so entries never move once placed.

use scribe_core::font::TextureHandle;
use scribe_core::math::Vec2;

/// Position and size of one bitmap in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasEntry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Row packer: fills left to right, then opens a new row below the
/// tallest entry of the current one.
#[derive(Debug)]
pub(crate) struct AtlasPacker {
    size: u32,
    padding: u32,
    current_x: u32,
    current_y: u32,
    row_height: u32,
}

impl AtlasPacker {
    pub fn new(size: u32, padding: u32) -> Self {
        Self {
            size,
            padding,
            current_x: 0,
            current_y: 0,
            row_height: 0,
        }
    }

    pub fn pack(&mut self, width: u32, height: u32) -> Option<AtlasEntry> {
        let padded_width = width + self.padding;
        let padded_height = height + self.padding;
        if padded_width > self.size {
            return None;
        }

        if self.current_x + padded_width > self.size {
            self.current_x = 0;
            self.current_y += self.row_height;
            self.row_height = 0;
        }

        if self.current_y + padded_height > self.size {
            return None;
        }

        let entry = AtlasEntry {
            x: self.current_x,
            y: self.current_y,
            width,
            height,
        };

        self.current_x += padded_width;
        self.row_height = self.row_height.max(padded_height);

        Some(entry)
    }
}

/// Side of the opaque block reserved at the atlas origin.
const WHITE_BLOCK: u32 = 2;

/// Coverage atlas with an opaque block at the origin for solid quads.
#[derive(Debug)]
pub struct GlyphAtlas {
    id: u64,
    size: u32,
    pixels: Vec<u8>,
    packer: AtlasPacker,
    dirty: bool,
    full_reported: bool,
}

impl GlyphAtlas {
    pub fn new(id: u64, size: u32) -> Self {
        let size = size.max(WHITE_BLOCK + 1);
        let mut atlas = Self {
            id,
            size,
            pixels: vec![0; (size * size) as usize],
            packer: AtlasPacker::new(size, 1),
            dirty: true,
            full_reported: false,
        };
        let white = vec![u8::MAX; (WHITE_BLOCK * WHITE_BLOCK) as usize];
        // A fresh packer always has room for the block.
        let _ = atlas.insert(WHITE_BLOCK, WHITE_BLOCK, &white);
        atlas
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn handle(&self) -> TextureHandle {
        TextureHandle {
            id: self.id,
            width: self.size,
            height: self.size,
        }
    }

    /// Texel in the middle of the reserved opaque block.
    pub fn white_texel(&self) -> Vec2 {
        Vec2::splat(WHITE_BLOCK as f32 / 2.0)
    }

    /// Copy a `width` x `height` coverage bitmap into the atlas.
    ///
    /// Returns `None` once the atlas is full; the first failure is logged.
    pub fn insert(&mut self, width: u32, height: u32, coverage: &[u8]) -> Option<AtlasEntry> {
        let Some(entry) = self.packer.pack(width, height) else {
            if !self.full_reported {
                tracing::warn!(
                    atlas_size = self.size,
                    width,
                    height,
                    "glyph atlas is full, further glyphs render without a bitmap"
                );
                self.full_reported = true;
            }
            return None;
        };

        for row in 0..height {
            let src = (row * width) as usize;
            let dst = ((entry.y + row) * self.size + entry.x) as usize;
            let len = width as usize;
            if let (Some(from), Some(to)) = (coverage.get(src..src + len), self.pixels.get_mut(dst..dst + len)) {
                to.copy_from_slice(from);
            }
        }

        self.dirty = true;
        Some(entry)
    }

    /// Pixel data to upload, if anything changed since the last call.
    pub fn take_upload(&mut self) -> Option<&[u8]> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(&self.pixels)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
