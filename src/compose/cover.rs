/// Source sub-rectangle selected for an aspect-preserving "cover" fit.
///
/// The crop always lies inside the source image and has the destination's aspect ratio (within
/// one pixel of rounding).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct CoverCrop {
    /// Left edge of the crop in source pixels.
    pub source_x: u32,
    /// Top edge of the crop in source pixels.
    pub source_y: u32,
    /// Crop width in source pixels.
    pub source_width: u32,
    /// Crop height in source pixels.
    pub source_height: u32,
}

impl CoverCrop {
    /// Crop covering the whole source.
    pub const fn full(source_width: u32, source_height: u32) -> Self {
        Self {
            source_x: 0,
            source_y: 0,
            source_width,
            source_height,
        }
    }

    /// Return `true` when the crop selects no pixels.
    pub fn is_empty(self) -> bool {
        self.source_width == 0 || self.source_height == 0
    }
}

/// Compute the centered cover crop of a `source_w x source_h` image for a `dest_w x dest_h` box.
///
/// A relatively wider source keeps its full height and is cropped horizontally; anything else
/// (including equal aspect ratios) keeps its full width and is cropped vertically.
///
/// Degenerate inputs never panic: an empty destination selects the full source, and an empty
/// source yields an empty crop.
pub fn compute_cover_crop(source_w: u32, source_h: u32, dest_w: u32, dest_h: u32) -> CoverCrop {
    if source_w == 0 || source_h == 0 {
        return CoverCrop::default();
    }
    if dest_w == 0 || dest_h == 0 {
        return CoverCrop::full(source_w, source_h);
    }

    let sw = f64::from(source_w);
    let sh = f64::from(source_h);
    let ar_src = sw / sh;
    let ar_dst = f64::from(dest_w) / f64::from(dest_h);

    if ar_src > ar_dst {
        let width = round_clamped(sh * ar_dst, source_w);
        let x = ((sw - f64::from(width)) / 2.0).round() as u32;
        CoverCrop {
            source_x: x.min(source_w - width),
            source_y: 0,
            source_width: width,
            source_height: source_h,
        }
    } else {
        let height = round_clamped(sw / ar_dst, source_h);
        let y = ((sh - f64::from(height)) / 2.0).round() as u32;
        CoverCrop {
            source_x: 0,
            source_y: y.min(source_h - height),
            source_width: source_w,
            source_height: height,
        }
    }
}

// Rounded extent, kept inside 1..=max so the crop never leaves the source.
fn round_clamped(v: f64, max: u32) -> u32 {
    (v.round() as u32).clamp(1, max)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/cover.rs"]
mod tests;
