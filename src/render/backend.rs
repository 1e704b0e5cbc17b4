use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::plan::{DrawOp, RenderPlan};

/// A rendered surface as RGBA8 pixels.
///
/// Surfaces are **premultiplied alpha**. The `premultiplied` flag is included to make this
/// explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent premultiplied surface.
    pub fn new_transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)` as stored; `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Straight-alpha copy suitable for encoding.
    pub fn to_rgba_image(&self) -> BoothResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| BoothError::render("frame byte length does not match its size"))
    }
}

/// A renderer that executes [`DrawOp`]s onto a [`FrameRGBA`].
///
/// Implementations must honor op order; the export and preview paths rely on it for layering.
pub trait RenderBackend {
    /// Draw `ops` in order on top of the current contents of `target`.
    fn draw_ops(&mut self, target: &mut FrameRGBA, ops: &[DrawOp]) -> BoothResult<()>;

    /// Execute a whole [`RenderPlan`] onto a fresh transparent surface.
    fn execute(&mut self, plan: &RenderPlan) -> BoothResult<FrameRGBA> {
        let mut target = FrameRGBA::new_transparent(plan.width, plan.height);
        self.draw_ops(&mut target, &plan.ops)?;
        Ok(target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
