use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{BoothError, BoothResult};

/// Family names tried, in order, before falling back to a generic sans-serif face.
///
/// Color faces are fine here: CBDT/sbix PNG strikes go through vello_cpu's bitmap glyph path
/// (which needs its `png` feature) and COLR faces through its color-outline path.
const EMOJI_FAMILIES: &[&str] = &[
    "Noto Color Emoji",
    "Apple Color Emoji",
    "Segoe UI Emoji",
    "Twemoji Mozilla",
    "Noto Emoji",
    "Symbola",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

/// Font face used to draw sticker glyphs.
#[derive(Clone, Debug)]
pub struct StickerFont {
    bytes: Arc<Vec<u8>>,
    index: u32,
}

impl StickerFont {
    /// Wrap raw font bytes (TTF/OTF, or a collection with `index`).
    pub fn from_bytes(bytes: Vec<u8>, index: u32) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index,
        }
    }

    /// Read a font file from disk.
    pub fn from_path(path: &Path) -> BoothResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            BoothError::render(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Ok(Self::from_bytes(bytes, 0))
    }

    /// First installed emoji face, or a sans-serif face when no emoji font is present.
    pub fn system() -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let emoji = EMOJI_FAMILIES.iter().find_map(|name| {
            db.query(&usvg::fontdb::Query {
                families: &[usvg::fontdb::Family::Name(name)],
                ..Default::default()
            })
        });
        let id = emoji.or_else(|| {
            db.query(&usvg::fontdb::Query {
                families: &[usvg::fontdb::Family::SansSerif],
                ..Default::default()
            })
        })?;

        db.with_face_data(id, |data, index| Self::from_bytes(data.to_vec(), index))
    }

    /// Resolve the sticker font: `explicit` path first, then an installed system face.
    ///
    /// Returns `None` when nothing usable exists; text draws are then skipped.
    pub fn resolve(explicit: Option<&Path>) -> Option<Self> {
        if let Some(path) = explicit {
            match Self::from_path(path) {
                Ok(font) => return Some(font),
                Err(err) => tracing::warn!(%err, "sticker font unusable, trying system fonts"),
            }
        }
        Self::system()
    }

    /// `true` when the face maps `ch` to a real glyph.
    pub fn has_glyph(&self, ch: char) -> bool {
        let Ok(index) = usize::try_from(self.index) else {
            return false;
        };
        parley::swash::FontRef::from_index(&self.bytes, index)
            .is_some_and(|font| font.charmap().map(ch) != 0)
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Face index inside the font file.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn font_data(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.bytes.as_ref().clone()),
            self.index,
        )
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_name: None,
        }
    }

    /// Register `font` once; later calls reuse the family.
    fn family_for(&mut self, font: &StickerFont) -> BoothResult<String> {
        if let Some(name) = &self.family_name {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BoothError::render("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BoothError::render("registered font family has no name"))?
            .to_string();
        self.family_name = Some(family_name.clone());
        Ok(family_name)
    }

    /// Shape and lay out a single unwrapped line of text.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        font: &StickerFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> BoothResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BoothError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
