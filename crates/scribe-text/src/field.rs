//! The stateful text field.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use scribe_core::Color;
use scribe_core::font::{GlyphProvider, TextureHandle};
use scribe_core::geometry::Rect;
use scribe_core::graphics::{RenderSurface, TextVertex};
use scribe_core::math::Vec2;
use scribe_core::profiling::profile_function;

use crate::layout::{self, LayoutOutput};
use crate::style::{HorizontalAlign, OverflowType, StyleAttributes, TextStyle, VerticalAlign};
use crate::{align, decoration, overflow, selection};

/// Snapshot of a field's drawable geometry.
///
/// Vertices are in field-local coordinates; draw them translated by `origin`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderBatch {
    pub glyphs: Vec<TextVertex>,
    pub selection: Vec<TextVertex>,
    /// Font texture to bind for `glyphs`. `selection` is untextured.
    pub texture: Option<TextureHandle>,
    pub origin: Vec2,
}

#[derive(Debug, Clone, Default)]
struct TextGeometry {
    layout: LayoutOutput,
    displayed: Option<String>,
    selection: Vec<TextVertex>,
    texture: Option<TextureHandle>,
    line_height: f32,
}

/// A string laid out inside a box, with a selection highlight.
///
/// # Lazy geometry
///
/// Setters only record the new value and mark the cached geometry dirty.
/// Every read that needs geometry (`find_character_pos`, `find_index`, the
/// bounds getters, `render`, `draw`) rebuilds it first if it is dirty, so any
/// number of writes between two reads costs a single layout pass. Reads
/// take `&self`; the cache lives behind a `RefCell`, which makes a
/// `TextField` `!Sync`.
///
/// # Without a font
///
/// A field with no font is valid and permanently empty: queries return
/// zero positions, index 0 and empty bounds, and drawing does nothing.
///
/// ```
/// use std::sync::Arc;
/// use scribe_core::math::Vec2;
/// use scribe_text::TextField;
/// use scribe_test_utils::MonoFont;
///
/// let mut field = TextField::with_font(Arc::new(MonoFont::new()));
/// field.set_string("Hello");
/// field.set_position(Vec2::new(100.0, 50.0));
///
/// // Top-left of the cursor slot in front of 'l'.
/// assert_eq!(field.find_character_pos(2), Vec2::new(120.0, 50.0));
/// assert_eq!(field.find_index(Vec2::new(121.0, 52.0)), 2);
/// ```
pub struct TextField {
    string: String,
    font: Option<Arc<dyn GlyphProvider>>,
    style: StyleAttributes,
    position: Vec2,
    selection: (usize, usize),
    dirty: Cell<bool>,
    geometry: RefCell<TextGeometry>,
}

fn replace_if_changed<T: PartialEq>(dirty: &Cell<bool>, slot: &mut T, value: T) {
    if *slot != value {
        *slot = value;
        dirty.set(true);
    }
}

impl TextField {
    /// An empty field without a font.
    pub fn new() -> Self {
        Self::with_style(None, StyleAttributes::default())
    }

    pub fn with_font(font: Arc<dyn GlyphProvider>) -> Self {
        Self::with_style(Some(font), StyleAttributes::default())
    }

    pub fn with_style(font: Option<Arc<dyn GlyphProvider>>, style: StyleAttributes) -> Self {
        Self {
            string: String::new(),
            font,
            style,
            position: Vec2::ZERO,
            selection: (0, 0),
            dirty: Cell::new(true),
            geometry: RefCell::new(TextGeometry::default()),
        }
    }

    pub fn set_string(&mut self, string: impl Into<String>) {
        let string = string.into();
        if self.string == string {
            return;
        }
        self.string = string;
        let len = self.string.chars().count();
        self.selection = (self.selection.0.min(len), self.selection.1.min(len));
        self.dirty.set(true);
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    /// Replace the font. Fonts are compared by identity.
    pub fn set_font(&mut self, font: Option<Arc<dyn GlyphProvider>>) {
        let same = match (&self.font, &font) {
            (Some(current), Some(new)) => Arc::ptr_eq(current, new),
            (None, None) => true,
            _ => false,
        };
        if !same {
            self.font = font;
            self.dirty.set(true);
        }
    }

    pub fn font(&self) -> Option<&Arc<dyn GlyphProvider>> {
        self.font.as_ref()
    }

    pub fn set_character_size(&mut self, size: u32) {
        replace_if_changed(&self.dirty, &mut self.style.character_size, size);
    }

    pub fn character_size(&self) -> u32 {
        self.style.character_size
    }

    pub fn set_line_spacing(&mut self, factor: f32) {
        replace_if_changed(&self.dirty, &mut self.style.line_spacing, factor);
    }

    pub fn line_spacing(&self) -> f32 {
        self.style.line_spacing
    }

    pub fn set_paragraph_spacing(&mut self, factor: f32) {
        replace_if_changed(&self.dirty, &mut self.style.paragraph_spacing, factor);
    }

    pub fn paragraph_spacing(&self) -> f32 {
        self.style.paragraph_spacing
    }

    pub fn set_letter_spacing(&mut self, factor: f32) {
        replace_if_changed(&self.dirty, &mut self.style.letter_spacing, factor);
    }

    pub fn letter_spacing(&self) -> f32 {
        self.style.letter_spacing
    }

    pub fn set_style(&mut self, style: TextStyle) {
        replace_if_changed(&self.dirty, &mut self.style.style, style);
    }

    pub fn style(&self) -> TextStyle {
        self.style.style
    }

    /// Change the fill color.
    ///
    /// When the geometry is up to date the vertex colors are rewritten in
    /// place and no layout pass is scheduled.
    pub fn set_text_color(&mut self, color: Color) {
        if self.style.text_color == color {
            return;
        }
        self.style.text_color = color;
        if !self.dirty.get() {
            for vertex in &mut self.geometry.get_mut().layout.vertices {
                vertex.color = color.to_array();
            }
        }
    }

    pub fn text_color(&self) -> Color {
        self.style.text_color
    }

    /// Change the highlight color, in place when the geometry is up to date.
    pub fn set_selection_color(&mut self, color: Color) {
        if self.style.selection_color == color {
            return;
        }
        self.style.selection_color = color;
        if !self.dirty.get() {
            for vertex in &mut self.geometry.get_mut().selection {
                vertex.color = color.to_array();
            }
        }
    }

    pub fn selection_color(&self) -> Color {
        self.style.selection_color
    }

    pub fn set_overflow_type(&mut self, overflow: OverflowType) {
        replace_if_changed(&self.dirty, &mut self.style.overflow, overflow);
    }

    pub fn overflow_type(&self) -> OverflowType {
        self.style.overflow
    }

    pub fn enable_wrapping(&mut self, wrapping: bool) {
        replace_if_changed(&self.dirty, &mut self.style.wrapping, wrapping);
    }

    pub fn is_wrapping_enabled(&self) -> bool {
        self.style.wrapping
    }

    pub fn set_horizontal_alignment(&mut self, align: HorizontalAlign) {
        replace_if_changed(&self.dirty, &mut self.style.horizontal_align, align);
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlign {
        self.style.horizontal_align
    }

    pub fn set_vertical_alignment(&mut self, align: VerticalAlign) {
        replace_if_changed(&self.dirty, &mut self.style.vertical_align, align);
    }

    pub fn vertical_alignment(&self) -> VerticalAlign {
        self.style.vertical_align
    }

    /// Move the field. Geometry is kept in local coordinates, so this never
    /// schedules a layout pass.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Resize the layout box.
    pub fn set_size(&mut self, size: Vec2) {
        replace_if_changed(&self.dirty, &mut self.style.size, size);
    }

    pub fn size(&self) -> Vec2 {
        self.style.size
    }

    /// Select characters `start..end`.
    ///
    /// `start > end` is ignored and the previous selection kept. Otherwise
    /// both ends are clamped to `0..=len`, where `len` counts `char`s of the
    /// stored string.
    pub fn set_selection(&mut self, start: isize, end: isize) {
        if start > end {
            return;
        }
        let len = self.string.chars().count() as isize;
        let clamp = |i: isize| i.clamp(0, len) as usize;
        replace_if_changed(&self.dirty, &mut self.selection, (clamp(start), clamp(end)));
    }

    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    pub fn attributes(&self) -> &StyleAttributes {
        &self.style
    }

    /// Whether the next geometry read will run a layout pass.
    pub fn needs_update(&self) -> bool {
        self.dirty.get()
    }

    /// World position of the top of the cursor slot in front of character
    /// `index`.
    ///
    /// Negative indices resolve to the start of the string and indices past
    /// the end to the end of the string.
    pub fn find_character_pos(&self, index: isize) -> Vec2 {
        self.ensure_geometry_update();
        if self.font.is_none() {
            return Vec2::ZERO;
        }

        let geometry = self.geometry.borrow();
        let layout = &geometry.layout;
        let local = match usize::try_from(index) {
            Err(_) => layout.string_start,
            Ok(index) => layout.entry(index).map_or(layout.string_end, |entry| entry.position),
        };
        self.cursor_origin() + local
    }

    /// Index of the character whose cursor slot is nearest to the world
    /// position `point`.
    ///
    /// The slot after the last character competes too, so clicking past the
    /// end of the text yields the string length. Ties go to the earlier
    /// character. Empty text yields 0.
    pub fn find_index(&self, point: Vec2) -> usize {
        self.ensure_geometry_update();

        let geometry = self.geometry.borrow();
        let layout = &geometry.layout;
        let origin = self.cursor_origin();

        let mut best: Option<(usize, f32)> = None;
        for (index, entry) in layout.entries().enumerate() {
            let distance = (origin + entry.position).distance_squared(point);
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((index, distance));
            }
        }

        let Some((index, closest)) = best else {
            return 0;
        };
        if (origin + layout.string_end).distance_squared(point) < closest {
            layout.character_count()
        } else {
            index
        }
    }

    fn cursor_origin(&self) -> Vec2 {
        self.position - Vec2::new(0.0, self.style.character_size as f32)
    }

    /// Bounds of the laid out text in field-local coordinates.
    pub fn local_bounds(&self) -> Rect<f32> {
        self.ensure_geometry_update();
        self.geometry.borrow().layout.bounds
    }

    /// [`TextField::local_bounds`] moved to the field's position.
    pub fn global_bounds(&self) -> Rect<f32> {
        self.local_bounds().translate(self.position)
    }

    pub fn line_count(&self) -> usize {
        self.ensure_geometry_update();
        self.geometry.borrow().layout.lines.len()
    }

    /// One rect per line in field-local coordinates, from the line's start to
    /// the end of its last visible character and one line height tall.
    pub fn line_bounds(&self) -> Vec<Rect<f32>> {
        self.ensure_geometry_update();
        let geometry = self.geometry.borrow();
        let layout = &geometry.layout;
        let character_size = self.style.character_size as f32;
        (0..layout.lines.len())
            .map(|line| {
                let (left, right) = layout.line_extent(line);
                let top = layout.line_starts[line].y - character_size;
                Rect::new(left, top, right - left, geometry.line_height)
            })
            .collect()
    }

    /// The string actually laid out, which differs from [`TextField::string`]
    /// when an overflow policy cut it.
    pub fn displayed_string(&self) -> String {
        self.ensure_geometry_update();
        self.geometry
            .borrow()
            .displayed
            .clone()
            .unwrap_or_else(|| self.string.clone())
    }

    pub fn render(&self) -> RenderBatch {
        self.ensure_geometry_update();
        let geometry = self.geometry.borrow();
        RenderBatch {
            glyphs: geometry.layout.vertices.clone(),
            selection: geometry.selection.clone(),
            texture: geometry.texture,
            origin: self.position,
        }
    }

    /// Draw the glyphs, then the selection highlight over them.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        self.ensure_geometry_update();
        let geometry = self.geometry.borrow();
        if !geometry.layout.vertices.is_empty() {
            surface.draw(&geometry.layout.vertices, geometry.texture, self.position);
        }
        if !geometry.selection.is_empty() {
            surface.draw(&geometry.selection, None, self.position);
        }
    }

    fn ensure_geometry_update(&self) {
        if !self.dirty.get() {
            return;
        }
        profile_function!();

        let rebuilt = match &self.font {
            Some(font) => self.rebuild(font.as_ref()),
            None => TextGeometry::default(),
        };
        *self.geometry.borrow_mut() = rebuilt;
        self.dirty.set(false);
    }

    fn rebuild(&self, font: &dyn GlyphProvider) -> TextGeometry {
        let style = &self.style;
        let character_size = style.character_size as f32;

        let mut laid_out = layout::layout(&self.string, style, font);
        let mut displayed = None;
        if style.overflow != OverflowType::Overflow
            && let Some(index) = overflow::find_overflow(&laid_out, style.size)
            && let Some(shown) = overflow::overflow_string(&self.string, index, style.overflow)
        {
            tracing::trace!(index, overflow = ?style.overflow, "text overflows its box");
            laid_out = layout::layout(&shown, style, font);
            displayed = Some(shown);
        }

        align::apply_horizontal(&mut laid_out, style.horizontal_align, style.size.x);
        align::apply_vertical(&mut laid_out, style.vertical_align, style.size.y, character_size);
        decoration::apply(&mut laid_out, style, font);

        let line_height = font.line_spacing(style.character_size);
        let (start, end) = self.selection;
        let selection = selection::build_quads(
            &laid_out,
            start..end,
            character_size,
            line_height,
            style.selection_color,
        );

        tracing::debug!(
            lines = laid_out.lines.len(),
            vertices = laid_out.vertices.len(),
            selected = selection.len() / 6,
            "rebuilt text field geometry"
        );

        TextGeometry {
            layout: laid_out,
            displayed,
            selection,
            texture: font.texture(style.character_size),
            line_height,
        }
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextField")
            .field("string", &self.string)
            .field("has_font", &self.font.is_some())
            .field("style", &self.style)
            .field("position", &self.position)
            .field("selection", &self.selection)
            .field("dirty", &self.dirty.get())
            .finish()
    }
}
