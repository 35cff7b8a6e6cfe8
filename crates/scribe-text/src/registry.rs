//! Named font table owned by the host.

use std::path::Path;
use std::sync::Arc;

use cosmic_text::FontSystem;
use parking_lot::Mutex;
use scribe_core::alloc::HashMap;
use scribe_core::font::GlyphProvider;

use crate::cosmic::{CosmicFont, CosmicFontConfig, empty_font_system, read_font_file};
use crate::error::{TextError, TextResult};

/// Fonts by name.
///
/// The registry is an ordinary value: create one in the application context
/// and hand fonts from it to text fields. Fonts loaded from files or bytes
/// share one cosmic-text font system; any other [`GlyphProvider`] can be
/// registered with [`FontRegistry::insert`].
///
/// ```no_run
/// use scribe_text::{FontRegistry, TextField};
///
/// let mut fonts = FontRegistry::new();
/// fonts.load("body", "assets/fonts/Inter-Regular.ttf")?;
///
/// let mut field = TextField::new();
/// field.set_font(fonts.get("body"));
/// # Ok::<(), scribe_text::TextError>(())
/// ```
pub struct FontRegistry {
    fonts: HashMap<String, Arc<dyn GlyphProvider>>,
    font_system: Arc<Mutex<FontSystem>>,
    config: CosmicFontConfig,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::with_config(CosmicFontConfig::default())
    }

    pub fn with_config(config: CosmicFontConfig) -> Self {
        Self {
            fonts: HashMap::new(),
            font_system: empty_font_system(&config),
            config,
        }
    }

    /// Load a font file under `name`.
    ///
    /// Fails without touching the registry if the name is taken, the file is
    /// missing or unreadable, or it holds no font face.
    pub fn load(&mut self, name: impl Into<String>, path: impl AsRef<Path>) -> TextResult<Arc<CosmicFont>> {
        let name = name.into();
        self.ensure_vacant(&name)?;
        let data = read_font_file(path.as_ref())?;
        self.load_bytes(name, data)
    }

    /// Load a font from memory under `name`.
    pub fn load_bytes(&mut self, name: impl Into<String>, data: Vec<u8>) -> TextResult<Arc<CosmicFont>> {
        let name = name.into();
        self.ensure_vacant(&name)?;
        let font = Arc::new(CosmicFont::load_into(self.font_system.clone(), data, &self.config)?);
        tracing::debug!(name, family = font.family(), "registered font");
        self.fonts.insert(name, font.clone());
        Ok(font)
    }

    /// Register any glyph provider under `name`.
    pub fn insert(&mut self, name: impl Into<String>, font: Arc<dyn GlyphProvider>) -> TextResult<()> {
        let name = name.into();
        self.ensure_vacant(&name)?;
        self.fonts.insert(name, font);
        Ok(())
    }

    /// Look a font up by name. Unknown names are logged and yield `None`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn GlyphProvider>> {
        let font = self.fonts.get(name).cloned();
        if font.is_none() {
            tracing::warn!(name, "font is not registered");
        }
        font
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn GlyphProvider>> {
        self.fonts.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn ensure_vacant(&self, name: &str) -> TextResult<()> {
        if self.fonts.contains_key(name) {
            tracing::warn!(name, "font name already in use");
            return Err(TextError::DuplicateFont(name.to_string()));
        }
        Ok(())
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}
