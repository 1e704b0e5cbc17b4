use std::sync::Arc;

use crate::assets::decode::DecodedImage;
use crate::compose::cover::CoverCrop;
use crate::foundation::core::{Circle, Point, Rect, Rgba8};
use crate::render::backend::FrameRGBA;

#[derive(Clone, Debug)]
/// A single draw operation in a [`RenderPlan`].
///
/// Ops are executed strictly in order; later ops land on top of earlier ones.
pub enum DrawOp {
    /// Fill the whole target with a color (source-over).
    Fill {
        /// Straight-alpha fill color.
        color: Rgba8,
    },
    /// Draw the `crop` region of `image` scaled into `dest`, optionally clipped to a circle.
    Image {
        /// Decoded source pixels.
        image: Arc<DecodedImage>,
        /// Source sub-rectangle to sample.
        crop: CoverCrop,
        /// Destination rectangle in target pixels.
        dest: Rect,
        /// Optional clip shape in target pixels.
        clip: Option<Circle>,
    },
    /// Stroke the outline of `rect`, centered on its edges.
    StrokeRect {
        /// Rectangle to outline.
        rect: Rect,
        /// Stroke width in pixels.
        width: f64,
        /// Straight-alpha stroke color.
        color: Rgba8,
    },
    /// Composite a pre-rendered surface at the origin, unscaled.
    Layer {
        /// Premultiplied source surface.
        frame: Arc<FrameRGBA>,
    },
    /// Draw a single line of text with its top-left corner at `origin`.
    Text {
        /// Text content (typically a single emoji).
        text: String,
        /// Top-left of the text box in target pixels.
        origin: Point,
        /// Font size in pixels.
        size_px: f32,
        /// Straight-alpha text color.
        color: Rgba8,
    },
}

/// Discriminant of a [`DrawOp`], used for ordering checks and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawKind {
    /// [`DrawOp::Fill`].
    Fill,
    /// [`DrawOp::Image`].
    Image,
    /// [`DrawOp::StrokeRect`].
    StrokeRect,
    /// [`DrawOp::Layer`].
    Layer,
    /// [`DrawOp::Text`].
    Text,
}

impl DrawOp {
    /// Kind of this op.
    pub fn kind(&self) -> DrawKind {
        match self {
            Self::Fill { .. } => DrawKind::Fill,
            Self::Image { .. } => DrawKind::Image,
            Self::StrokeRect { .. } => DrawKind::StrokeRect,
            Self::Layer { .. } => DrawKind::Layer,
            Self::Text { .. } => DrawKind::Text,
        }
    }

    /// Return `true` when the op is rasterized through the vector pipeline.
    pub(crate) fn is_vector(&self) -> bool {
        matches!(
            self,
            Self::Image { .. } | Self::StrokeRect { .. } | Self::Text { .. }
        )
    }
}

#[derive(Clone, Debug)]
/// Backend-agnostic draw list for one target surface.
pub struct RenderPlan {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Ordered draw operations.
    pub ops: Vec<DrawOp>,
}

impl RenderPlan {
    /// Empty plan for a `width x height` target.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Append one op.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Sequence of op kinds, in execution order.
    pub fn kinds(&self) -> Vec<DrawKind> {
        self.ops.iter().map(DrawOp::kind).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
