use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap premultiplied bytes, checking that the length matches `width * height * 4`.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> BoothResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BoothError::decode("image size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(BoothError::decode(format!(
                "image byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Premultiplied pixel at `(x, y)`; `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BoothResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BoothError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Solid-fill image, used for placeholders and tests.
pub fn solid_image(width: u32, height: u32, color: Rgba8) -> DecodedImage {
    let px = color.to_premul();
    let n = (width as usize) * (height as usize);
    let mut bytes = Vec::with_capacity(n * 4);
    for _ in 0..n {
        bytes.extend_from_slice(&px);
    }
    DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(bytes),
    }
}

/// Cheap sniff for SVG documents (optional BOM/whitespace, then `<svg` or `<?xml`).
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let head = &bytes[start..];
    head.starts_with(b"<svg") || head.starts_with(b"<?xml")
}

/// Parse an SVG document and rasterize it stretched to exactly `width x height`.
pub fn rasterize_svg(bytes: &[u8], width: u32, height: u32) -> BoothResult<DecodedImage> {
    if width == 0 || height == 0 {
        return Err(BoothError::decode("svg raster target must be non-empty"));
    }
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| BoothError::decode(format!("parse svg tree: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BoothError::decode("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    DecodedImage::from_premul(width, height, pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
