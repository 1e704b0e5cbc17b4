use std::sync::Arc;

use crate::assets::decode::DecodedImage;
use crate::assets::slots::SLOT_COUNT;
use crate::compose::cover::compute_cover_crop;
use crate::compose::frame::{BORDER_COLOR, FrameStyle};
use crate::foundation::core::PixelRect;
use crate::layout::grid::GridLayout;
use crate::render::plan::{DrawOp, RenderPlan};

/// Draw ops for one cell: the cover-fit image (clipped for circular masks), then the border.
///
/// Border strokes come after the image and are never clipped. Zero-area cells draw nothing.
pub fn plan_cell(
    image: Arc<DecodedImage>,
    cell: PixelRect,
    style: FrameStyle,
    canvas_width: u32,
) -> Vec<DrawOp> {
    if cell.is_empty() {
        return Vec::new();
    }
    let dest = cell.to_rect();
    let crop = compute_cover_crop(image.width, image.height, cell.width, cell.height);

    let mut ops = Vec::with_capacity(2);
    if !crop.is_empty() {
        ops.push(DrawOp::Image {
            image,
            crop,
            dest,
            clip: style.clip_for(dest),
        });
    }
    if let Some(width) = style.border_width(canvas_width) {
        ops.push(DrawOp::StrokeRect {
            rect: dest,
            width,
            color: BORDER_COLOR,
        });
    }
    ops
}

/// Full grid plan on a transparent canvas; `None` slots (failed decodes) are skipped.
pub fn plan_grid(
    layout: &GridLayout,
    images: &[Option<Arc<DecodedImage>>; SLOT_COUNT],
    style: FrameStyle,
) -> RenderPlan {
    let mut plan = RenderPlan::new(layout.canvas_size, layout.canvas_size);
    for (cell, image) in layout.cells.iter().zip(images) {
        if let Some(image) = image {
            plan.ops
                .extend(plan_cell(Arc::clone(image), *cell, style, layout.canvas_size));
        }
    }
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/compose/grid.rs"]
mod tests;
