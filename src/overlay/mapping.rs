use crate::foundation::core::{Rect, Size};

/// Map an overlay-space rectangle into export pixel space.
///
/// `item` and `overlay` are in the same screen coordinate system; the result is
/// `(item - overlay.origin) / overlay.size * export`, applied per axis. Returns `None` when the
/// overlay has no area or any input is non-finite.
pub fn overlay_to_export(item: Rect, overlay: Rect, export: Size) -> Option<Rect> {
    let ow = overlay.width();
    let oh = overlay.height();
    if !(ow.is_finite() && oh.is_finite()) || ow <= 0.0 || oh <= 0.0 {
        return None;
    }
    let sx = export.width / ow;
    let sy = export.height / oh;
    let mapped = Rect::new(
        (item.x0 - overlay.x0) * sx,
        (item.y0 - overlay.y0) * sy,
        (item.x1 - overlay.x0) * sx,
        (item.y1 - overlay.y0) * sy,
    );
    let finite = [mapped.x0, mapped.y0, mapped.x1, mapped.y1]
        .iter()
        .all(|v| v.is_finite());
    finite.then_some(mapped)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/mapping.rs"]
mod tests;
