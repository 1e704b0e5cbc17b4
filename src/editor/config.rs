use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assets::slots::SLOT_COUNT;
use crate::compose::frame::FrameStyle;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{BoothError, BoothResult};
use crate::overlay::stickers::DEFAULT_STICKER_SIZE;
use crate::render::preview::DEFAULT_DECODE_TIMEOUT;

/// Environment variable naming a font file for sticker glyphs.
pub const ENV_STICKER_FONT: &str = "PHOTOBOOTH_STICKER_FONT";

/// Environment variable overriding the preview settle timeout, in milliseconds.
pub const ENV_DECODE_TIMEOUT_MS: &str = "PHOTOBOOTH_DECODE_TIMEOUT_MS";

/// Editor tuning knobs.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorOpts {
    pub(crate) sticker_size: f64,
    pub(crate) decode_timeout: Duration,
    pub(crate) sticker_font: Option<PathBuf>,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            sticker_size: DEFAULT_STICKER_SIZE,
            decode_timeout: DEFAULT_DECODE_TIMEOUT,
            sticker_font: None,
        }
    }
}

impl EditorOpts {
    /// Defaults with environment overrides applied. Invalid or zero values are ignored.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(ms) = std::env::var(ENV_DECODE_TIMEOUT_MS)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            opts.decode_timeout = Duration::from_millis(ms);
        }
        opts.sticker_font = std::env::var_os(ENV_STICKER_FONT)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        opts
    }

    /// Return options with a different edge length for new stickers.
    pub fn with_sticker_size(mut self, size: f64) -> Self {
        if size.is_finite() && size > 0.0 {
            self.sticker_size = size;
        }
        self
    }

    /// Return options with a different preview settle timeout.
    pub fn with_decode_timeout(mut self, timeout: Duration) -> Self {
        self.decode_timeout = timeout;
        self
    }

    /// Return options with an explicit sticker font file (overrides the environment).
    pub fn with_sticker_font(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.sticker_font = path;
        }
        self
    }

    /// Edge length of new stickers in overlay pixels.
    pub fn sticker_size(&self) -> f64 {
        self.sticker_size
    }

    /// Preview settle timeout.
    pub fn decode_timeout(&self) -> Duration {
        self.decode_timeout
    }

    /// Sticker font file, if configured.
    pub fn sticker_font(&self) -> Option<&Path> {
        self.sticker_font.as_deref()
    }
}

/// Overlay rectangle in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayConfig {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// One sticker placed in overlay-local coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StickerConfig {
    /// Glyph or short text.
    pub content: String,
    /// Left edge in overlay space.
    pub x: f64,
    /// Top edge in overlay space.
    pub y: f64,
    /// Box width; defaults to the editor sticker size.
    #[serde(default)]
    pub width: Option<f64>,
    /// Box height; defaults to the editor sticker size.
    #[serde(default)]
    pub height: Option<f64>,
}

/// Headless description of a collage, as read from a JSON project file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Square canvas edge length in pixels.
    pub canvas_size: u32,
    /// Frame style for every cell.
    #[serde(default)]
    pub frame: FrameStyle,
    /// Optional background URL.
    #[serde(default)]
    pub background: Option<String>,
    /// Up to four image paths, in slot order; missing slots get the placeholder.
    #[serde(default)]
    pub slots: Vec<String>,
    /// Overlay bounds; defaults to the canvas square at the origin.
    #[serde(default)]
    pub overlay: Option<OverlayConfig>,
    /// Stickers in creation order.
    #[serde(default)]
    pub stickers: Vec<StickerConfig>,
    /// Optional font file for sticker glyphs.
    #[serde(default)]
    pub sticker_font: Option<PathBuf>,
}

impl ProjectConfig {
    /// Parse a project from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BoothResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BoothError::validation(format!("parse project JSON: {e}")))
    }

    /// Parse a project from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BoothError::validation(format!("open project JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value domains that serde cannot express.
    pub fn validate(&self) -> BoothResult<()> {
        if self.canvas_size == 0 {
            return Err(BoothError::validation("canvas_size must be > 0"));
        }
        if self.canvas_size > u32::from(u16::MAX) {
            return Err(BoothError::validation(format!(
                "canvas_size must be <= {}",
                u16::MAX
            )));
        }
        if self.slots.len() > SLOT_COUNT {
            return Err(BoothError::validation(format!(
                "at most {SLOT_COUNT} slots are supported (got {})",
                self.slots.len()
            )));
        }
        if let Some(o) = &self.overlay {
            let finite = [o.x, o.y, o.width, o.height].iter().all(|v| v.is_finite());
            if !finite || o.width <= 0.0 || o.height <= 0.0 {
                return Err(BoothError::validation(
                    "overlay must have finite coordinates and a positive size",
                ));
            }
        }
        for (i, s) in self.stickers.iter().enumerate() {
            if !s.x.is_finite() || !s.y.is_finite() {
                return Err(BoothError::validation(format!(
                    "sticker {i} has non-finite coordinates"
                )));
            }
            for v in [s.width, s.height].into_iter().flatten() {
                if !v.is_finite() || v <= 0.0 {
                    return Err(BoothError::validation(format!(
                        "sticker {i} size must be finite and > 0"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Overlay rectangle, defaulting to the canvas square at the origin.
    pub fn overlay_rect(&self) -> Rect {
        match self.overlay {
            Some(o) => Rect::new(o.x, o.y, o.x + o.width, o.y + o.height),
            None => Rect::from_origin_size(
                (0.0, 0.0),
                Size::new(f64::from(self.canvas_size), f64::from(self.canvas_size)),
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/config.rs"]
mod tests;
