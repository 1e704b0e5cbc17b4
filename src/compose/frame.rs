use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{Circle, Rect, Rgba8};
use crate::foundation::error::BoothError;

/// Semi-opaque white used for bordered cells.
pub const BORDER_COLOR: Rgba8 = Rgba8::new(255, 255, 255, 230);

/// Minimum border stroke width in pixels.
pub const MIN_BORDER_WIDTH: f64 = 6.0;

/// Per-cell decoration applied at draw time.
///
/// Styles never change crop geometry, and they are never combined.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FrameStyle {
    /// Plain cover-fit image.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Stroked outline drawn on top of the image.
    #[serde(rename = "bordered-frame", alias = "frame1", alias = "bordered")]
    Bordered,
    /// Image clipped to the circle inscribed in its cell.
    #[serde(rename = "circular-mask", alias = "frame2", alias = "circularMask")]
    CircularMask,
}

impl FrameStyle {
    /// Stable name used by configuration surfaces.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bordered => "bordered-frame",
            Self::CircularMask => "circular-mask",
        }
    }

    /// Clip circle for `dest`, if this style masks the image.
    pub fn clip_for(self, dest: Rect) -> Option<Circle> {
        match self {
            Self::CircularMask => Some(inscribed_circle(dest)),
            Self::None | Self::Bordered => None,
        }
    }

    /// Border stroke width for a canvas `canvas_width` pixels wide, if this style draws one.
    pub fn border_width(self, canvas_width: u32) -> Option<f64> {
        match self {
            Self::Bordered => Some(border_width(canvas_width)),
            Self::None | Self::CircularMask => None,
        }
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameStyle {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "bordered-frame" | "bordered" | "frame1" => Ok(Self::Bordered),
            "circular-mask" | "circularMask" | "frame2" => Ok(Self::CircularMask),
            other => Err(BoothError::validation(format!(
                "unknown frame style '{other}' (expected none, bordered-frame, circular-mask)"
            ))),
        }
    }
}

/// Border stroke width: 1% of the canvas width, never thinner than [`MIN_BORDER_WIDTH`].
pub fn border_width(canvas_width: u32) -> f64 {
    (f64::from(canvas_width) * 0.01).max(MIN_BORDER_WIDTH)
}

/// Circle centered in `rect` with radius `min(w, h) / 2`.
pub fn inscribed_circle(rect: Rect) -> Circle {
    let radius = rect.width().min(rect.height()).max(0.0) / 2.0;
    Circle::new(rect.center(), radius)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;
