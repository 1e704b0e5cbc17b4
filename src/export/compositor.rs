//! Flattening of background, grid and stickers into the downloadable raster.
//!
//! Unlike the live preview, export is a single ordered sequence: the background is loaded (or
//! fails) before anything is composited, so layering is deterministic.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::decode::{DecodedImage, decode_image, looks_like_svg, rasterize_svg};
use crate::assets::loader::ImageLoader;
use crate::compose::cover::CoverCrop;
use crate::foundation::core::{Point, Rect, Rgba8, Size};
use crate::foundation::error::{BoothError, BoothResult};
use crate::overlay::mapping::overlay_to_export;
use crate::overlay::stickers::Sticker;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::plan::{DrawOp, RenderPlan};

/// File name used for downloads.
pub const EXPORT_FILE_NAME: &str = "collage.png";

/// Sticker glyph size relative to its mapped box height.
pub const STICKER_FONT_RATIO: f64 = 0.9;

/// Vertical inset of sticker glyphs relative to their mapped box height.
pub const STICKER_TOP_INSET_RATIO: f64 = 0.05;

/// Fill color for sticker glyphs without color tables.
pub const STICKER_TEXT_COLOR: Rgba8 = Rgba8::new(0, 0, 0, 255);

/// Inputs of one export.
#[derive(Clone, Copy, Debug)]
pub struct ExportRequest<'a> {
    /// Rendered grid canvas; drawn unscaled at the origin.
    pub grid: &'a FrameRGBA,
    /// Stickers in creation order, positioned in overlay-local coordinates.
    pub stickers: &'a [Sticker],
    /// Overlay rectangle in screen coordinates.
    pub overlay_bounds: Rect,
    /// Optional background URL.
    pub background: Option<&'a str>,
}

impl ExportRequest<'_> {
    /// Export width (same as the grid canvas).
    pub fn width(&self) -> u32 {
        self.grid.width
    }

    /// Export height (same as the grid canvas).
    pub fn height(&self) -> u32 {
        self.grid.height
    }
}

/// Base layer resolved for an export.
#[derive(Clone, Debug)]
pub enum Backdrop {
    /// No background configured: solid white.
    Unset,
    /// Background image stretched over the whole export.
    Image(Arc<DecodedImage>),
    /// A background was configured but could not be loaded: nothing is drawn.
    Failed,
}

/// Load and decode the background for a `width x height` export.
///
/// Failures are non-fatal and logged; they resolve to [`Backdrop::Failed`].
pub fn load_backdrop(
    url: Option<&str>,
    loader: &dyn ImageLoader,
    width: u32,
    height: u32,
) -> Backdrop {
    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty() && *u != "none") else {
        return Backdrop::Unset;
    };
    let decoded = loader.load_bytes(url).and_then(|bytes| {
        if looks_like_svg(&bytes) {
            rasterize_svg(&bytes, width, height)
        } else {
            decode_image(&bytes)
        }
    });
    match decoded {
        Ok(img) => Backdrop::Image(Arc::new(img)),
        Err(err) => {
            tracing::warn!(%err, "background failed to load; exporting without it");
            Backdrop::Failed
        }
    }
}

/// Build the export draw list: backdrop, grid layer, then stickers in creation order.
pub fn plan_export(req: &ExportRequest<'_>, backdrop: &Backdrop) -> RenderPlan {
    let (w, h) = (req.width(), req.height());
    let mut plan = RenderPlan::new(w, h);

    match backdrop {
        Backdrop::Unset => plan.push(DrawOp::Fill {
            color: Rgba8::WHITE,
        }),
        Backdrop::Image(img) => plan.push(DrawOp::Image {
            image: Arc::clone(img),
            crop: CoverCrop::full(img.width, img.height),
            dest: Rect::new(0.0, 0.0, f64::from(w), f64::from(h)),
            clip: None,
        }),
        Backdrop::Failed => {}
    }

    plan.push(DrawOp::Layer {
        frame: Arc::new(req.grid.clone()),
    });

    let export = Size::new(f64::from(w), f64::from(h));
    let origin = req.overlay_bounds.origin().to_vec2();
    for sticker in req.stickers {
        if sticker.content.is_empty() {
            continue;
        }
        let screen = sticker.bounds() + origin;
        let Some(mapped) = overlay_to_export(screen, req.overlay_bounds, export) else {
            continue;
        };
        let size_px = (mapped.height() * STICKER_FONT_RATIO).floor();
        if size_px <= 0.0 {
            continue;
        }
        plan.push(DrawOp::Text {
            text: sticker.content.clone(),
            origin: Point::new(
                mapped.x0,
                mapped.y0 + mapped.height() * STICKER_TOP_INSET_RATIO,
            ),
            size_px: size_px as f32,
            color: STICKER_TEXT_COLOR,
        });
    }

    tracing::debug!(ops = plan.ops.len(), "export plan built");
    plan
}

/// Load the background, then composite and render the final raster.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(width = req.width(), height = req.height(), stickers = req.stickers.len())
)]
pub fn export(
    req: &ExportRequest<'_>,
    loader: &dyn ImageLoader,
    backend: &mut dyn RenderBackend,
) -> BoothResult<FrameRGBA> {
    let backdrop = load_backdrop(req.background, loader, req.width(), req.height());
    let plan = plan_export(req, &backdrop);
    backend.execute(&plan)
}

/// Encode a rendered frame as PNG bytes.
pub fn encode_png(frame: &FrameRGBA) -> BoothResult<Vec<u8>> {
    let img = frame.to_rgba_image()?;
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| BoothError::render(format!("png encode failed: {e}")))?;
    Ok(out.into_inner())
}

/// Write `frame` as `collage.png` inside `dir` and return the file path.
pub fn save_png(frame: &FrameRGBA, dir: &Path) -> BoothResult<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    write_png(frame, &path)?;
    Ok(path)
}

/// Write `frame` as a PNG file at `path`.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> BoothResult<()> {
    let bytes = encode_png(frame)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/compositor.rs"]
mod tests;
