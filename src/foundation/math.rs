use crate::foundation::error::{BoothError, BoothResult};

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Premultiplied source-over of `src` onto `dst`; both buffers must be equal-length RGBA8.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> BoothResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BoothError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        premul_over_px(d, s);
    }
    Ok(())
}

/// Source-over for a single premultiplied pixel.
pub(crate) fn premul_over_px(d: &mut [u8], s: &[u8]) {
    let sa = u16::from(s[3]);
    if sa == 0 {
        return;
    }
    if sa == 255 {
        d[..4].copy_from_slice(&s[..4]);
        return;
    }
    let inv = 255u16 - sa;
    d[3] = (sa as u8).saturating_add(mul_div255_u8(u16::from(d[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(d[c]), inv);
        d[c] = s[c].saturating_add(dc);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
