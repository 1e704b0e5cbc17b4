use crate::assets::slots::SLOT_COUNT;
use crate::foundation::core::PixelRect;

/// Gutter size as a fraction of the canvas edge.
pub const PADDING_RATIO: f64 = 0.03;

/// Square 2x2 grid computed for one canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GridLayout {
    /// Canvas edge length in pixels (the canvas is square).
    pub canvas_size: u32,
    /// Gutter between cells and around the border.
    pub padding: u32,
    /// Edge length of each square cell.
    pub cell: u32,
    /// Cell rectangles in reading order.
    pub cells: [PixelRect; SLOT_COUNT],
}

/// Compute the four cell rectangles for a square canvas of `canvas_size` pixels.
///
/// Never fails: tiny canvases produce zero-area cells, which draw nothing.
#[tracing::instrument(level = "debug")]
pub fn compute_layout(canvas_size: u32) -> GridLayout {
    let padding = (f64::from(canvas_size) * PADDING_RATIO).floor() as u32;
    let cell = canvas_size.saturating_sub(padding.saturating_mul(3)) / 2;

    let near = padding;
    let far = padding.saturating_mul(2).saturating_add(cell);
    let cells = [
        PixelRect::new(near, near, cell, cell),
        PixelRect::new(far, near, cell, cell),
        PixelRect::new(near, far, cell, cell),
        PixelRect::new(far, far, cell, cell),
    ];

    GridLayout {
        canvas_size,
        padding,
        cell,
        cells,
    }
}

/// Canvas edge length for an on-screen container of `container_width` CSS pixels.
pub fn canvas_size_for_container(container_width: f64) -> u32 {
    if !container_width.is_finite() || container_width <= 0.0 {
        return 0;
    }
    container_width.floor().min(f64::from(u16::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
