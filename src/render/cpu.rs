use std::path::PathBuf;
use std::sync::Arc;

use kurbo::{Affine, BezPath, Shape};

use crate::assets::decode::DecodedImage;
use crate::compose::cover::CoverCrop;
use crate::foundation::core::{Circle, Point, Rect, Rgba8};
use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::{premul_over_in_place, premul_over_px};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::plan::DrawOp;
use crate::render::text::{StickerFont, TextBrushRgba8, TextLayoutEngine};

/// Options for the CPU backend.
#[derive(Clone, Debug, Default)]
pub struct CpuBackendOpts {
    pub(crate) sticker_font: Option<PathBuf>,
}

impl CpuBackendOpts {
    /// Return options with an explicit font file for sticker glyphs.
    pub fn with_sticker_font(mut self, path: Option<PathBuf>) -> Self {
        self.sticker_font = path;
        self
    }
}

enum FontState {
    Unresolved,
    Missing,
    Ready {
        font: StickerFont,
        data: vello_cpu::peniko::FontData,
    },
}

/// CPU raster backend powered by `vello_cpu`.
///
/// Vector ops (images, strokes, text) are batched into one render context pass, rendered into a
/// transparent scratch pixmap, then premultiplied-over onto the target. Fills and layers are
/// composited directly on the target bytes.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    ctx: Option<vello_cpu::RenderContext>,
    text_engine: TextLayoutEngine,
    font: FontState,
}

impl CpuBackend {
    /// Create a backend with `opts`. Fonts are resolved on first text draw.
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            opts,
            ctx: None,
            text_engine: TextLayoutEngine::new(),
            font: FontState::Unresolved,
        }
    }

    /// Create a backend that draws text with `font` and never consults the system.
    pub fn with_font(font: StickerFont) -> Self {
        let data = font.font_data();
        Self {
            opts: CpuBackendOpts::default(),
            ctx: None,
            text_engine: TextLayoutEngine::new(),
            font: FontState::Ready { font, data },
        }
    }

    /// Return `true` if a sticker font is available (resolving it if needed).
    pub fn has_font(&mut self) -> bool {
        self.ensure_font();
        matches!(self.font, FontState::Ready { .. })
    }

    fn ensure_font(&mut self) {
        if !matches!(self.font, FontState::Unresolved) {
            return;
        }
        self.font = match StickerFont::resolve(self.opts.sticker_font.as_deref()) {
            Some(font) => {
                let data = font.font_data();
                FontState::Ready { font, data }
            }
            None => {
                tracing::warn!("no sticker font found; sticker glyphs will not be drawn");
                FontState::Missing
            }
        };
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> BoothResult<R>,
    ) -> BoothResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_vector_batch(&mut self, target: &mut FrameRGBA, ops: &[DrawOp]) -> BoothResult<()> {
        let w: u16 = target
            .width
            .try_into()
            .map_err(|_| BoothError::render("surface width exceeds u16"))?;
        let h: u16 = target
            .height
            .try_into()
            .map_err(|_| BoothError::render("surface height exceeds u16"))?;

        if ops.iter().any(|op| matches!(op, DrawOp::Text { .. })) {
            self.ensure_font();
        }

        // `vello_cpu` renders into a fresh buffer, so we render into a temp surface and then
        // premul-over onto the destination buffer.
        let mut tmp = vello_cpu::Pixmap::new(w, h);
        self.with_ctx_mut(w, h, |this, ctx| {
            for op in ops {
                this.draw_vector_op(ctx, op)?;
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut tmp);
            Ok(())
        })?;
        premul_over_in_place(&mut target.data, tmp.data_as_u8_slice())
    }

    fn draw_vector_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
    ) -> BoothResult<()> {
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::Image {
                image,
                crop,
                dest,
                clip,
            } => draw_image(ctx, image, *crop, *dest, *clip),
            DrawOp::StrokeRect { rect, width, color } => {
                draw_stroke_rect(ctx, *rect, *width, *color);
                Ok(())
            }
            DrawOp::Text {
                text,
                origin,
                size_px,
                color,
            } => self.draw_text(ctx, text, *origin, *size_px, *color),
            DrawOp::Fill { .. } | DrawOp::Layer { .. } => Ok(()),
        }
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        size_px: f32,
        color: Rgba8,
    ) -> BoothResult<()> {
        let FontState::Ready { font, data } = &self.font else {
            return Ok(());
        };
        if text.is_empty() || !size_px.is_finite() || size_px <= 0.0 {
            return Ok(());
        }
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self
            .text_engine
            .layout_plain(text, font, size_px, brush)?;

        ctx.set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(CpuBackendOpts::default())
    }
}

impl RenderBackend for CpuBackend {
    fn draw_ops(&mut self, target: &mut FrameRGBA, ops: &[DrawOp]) -> BoothResult<()> {
        if target.data.len() != (target.width as usize) * (target.height as usize) * 4 {
            return Err(BoothError::render("target byte length does not match its size"));
        }
        if target.width == 0 || target.height == 0 {
            return Ok(());
        }

        let mut i = 0;
        while i < ops.len() {
            if ops[i].is_vector() {
                let start = i;
                while i < ops.len() && ops[i].is_vector() {
                    i += 1;
                }
                self.draw_vector_batch(target, &ops[start..i])?;
                continue;
            }
            match &ops[i] {
                DrawOp::Fill { color } => fill_in_place(&mut target.data, *color),
                DrawOp::Layer { frame } => layer_over(target, frame)?,
                _ => {}
            }
            i += 1;
        }
        Ok(())
    }
}

fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    image: &DecodedImage,
    crop: CoverCrop,
    dest: Rect,
    clip: Option<Circle>,
) -> BoothResult<()> {
    if crop.is_empty() || dest.width() <= 0.0 || dest.height() <= 0.0 {
        return Ok(());
    }
    let paint = rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?;

    // Image space -> destination: the crop's top-left lands on `dest`'s top-left.
    let sx = dest.width() / f64::from(crop.source_width);
    let sy = dest.height() / f64::from(crop.source_height);
    let tr = Affine::translate((dest.x0, dest.y0))
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate((-f64::from(crop.source_x), -f64::from(crop.source_y)));

    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(paint);
    match clip {
        Some(circle) => {
            let local = tr.inverse() * circle.to_path(0.1);
            ctx.fill_path(&bezpath_to_cpu(&local));
        }
        None => {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                f64::from(crop.source_x),
                f64::from(crop.source_y),
                f64::from(crop.source_x) + f64::from(crop.source_width),
                f64::from(crop.source_y) + f64::from(crop.source_height),
            ));
        }
    }
    Ok(())
}

// Outline centered on the rect edges, filled as four non-overlapping bands.
fn draw_stroke_rect(ctx: &mut vello_cpu::RenderContext, rect: Rect, width: f64, color: Rgba8) {
    if !width.is_finite() || width <= 0.0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }
    let half = width / 2.0;
    let outer = rect.inflate(half, half);
    let inner = rect.inflate(-half, -half);
    let inner_x0 = inner.x0.min(outer.x1);
    let inner_x1 = inner.x1.max(inner_x0);
    let inner_y0 = inner.y0.min(outer.y1);
    let inner_y1 = inner.y1.max(inner_y0);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    let bands = [
        Rect::new(outer.x0, outer.y0, outer.x1, inner_y0),
        Rect::new(outer.x0, inner_y1, outer.x1, outer.y1),
        Rect::new(outer.x0, inner_y0, inner_x0, inner_y1),
        Rect::new(inner_x1, inner_y0, outer.x1, inner_y1),
    ];
    for band in bands {
        if band.width() > 0.0 && band.height() > 0.0 {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                band.x0, band.y0, band.x1, band.y1,
            ));
        }
    }
}

fn fill_in_place(data: &mut [u8], color: Rgba8) {
    let src = color.to_premul();
    for px in data.chunks_exact_mut(4) {
        premul_over_px(px, &src);
    }
}

// Unscaled composite at the origin; only the overlapping region is touched.
fn layer_over(target: &mut FrameRGBA, layer: &FrameRGBA) -> BoothResult<()> {
    if layer.data.len() != (layer.width as usize) * (layer.height as usize) * 4 {
        return Err(BoothError::render("layer byte length does not match its size"));
    }
    if layer.width == target.width && layer.height == target.height {
        return premul_over_in_place(&mut target.data, &layer.data);
    }
    let w = target.width.min(layer.width) as usize * 4;
    let h = target.height.min(layer.height) as usize;
    let dst_stride = target.width as usize * 4;
    let src_stride = layer.width as usize * 4;
    for y in 0..h {
        let dst = &mut target.data[y * dst_stride..y * dst_stride + w];
        let src = &layer.data[y * src_stride..y * src_stride + w];
        premul_over_in_place(dst, src)?;
    }
    Ok(())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BoothResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BoothError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BoothError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BoothError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> BoothResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
