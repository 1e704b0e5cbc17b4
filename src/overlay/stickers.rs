//! Draggable sticker annotations in overlay space.
//!
//! Overlay space is sized to the on-screen container, independent of the canvas resolution.
//! Drags are an explicit state machine (`Idle -> Dragging -> Idle`) keyed by pointer id, so
//! several pointers can drag different stickers at once.

use std::collections::HashMap;

use crate::foundation::core::{Point, Rect, Size, Vec2};

/// Sticker palette offered by the editor.
pub const DEFAULT_PALETTE: [&str; 8] = ["🧡", "😎", "✨", "🎉", "🌸", "⭐", "📍", "❤️"];

/// Default sticker box edge in overlay pixels.
pub const DEFAULT_STICKER_SIZE: f64 = 46.0;

/// Stable sticker identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct StickerId(pub u64);

/// Pointer identity (mouse, pen, or one touch contact).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PointerId(pub u64);

/// One placed sticker.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Sticker {
    /// Identity.
    pub id: StickerId,
    /// Glyph or short text drawn for the sticker.
    pub content: String,
    /// Top-left corner in overlay space.
    pub position: Point,
    /// Box size in overlay space.
    pub size: Size,
}

impl Sticker {
    /// Bounding box in overlay space.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragState {
    sticker: StickerId,
    pointer_origin: Point,
    sticker_origin: Point,
}

/// Ordered sticker collection plus per-pointer drag state.
///
/// Creation order is paint order: later stickers draw on top.
#[derive(Clone, Debug)]
pub struct StickerOverlay {
    bounds: Size,
    sticker_size: Size,
    stickers: Vec<Sticker>,
    drags: HashMap<PointerId, DragState>,
    next_id: u64,
}

impl StickerOverlay {
    /// Empty overlay of `bounds` with the default sticker size.
    pub fn new(bounds: Size) -> Self {
        Self::with_sticker_size(bounds, Size::new(DEFAULT_STICKER_SIZE, DEFAULT_STICKER_SIZE))
    }

    /// Empty overlay of `bounds` whose new stickers are `sticker_size`.
    pub fn with_sticker_size(bounds: Size, sticker_size: Size) -> Self {
        Self {
            bounds: sanitize_size(bounds),
            sticker_size: sanitize_size(sticker_size),
            stickers: Vec::new(),
            drags: HashMap::new(),
            next_id: 1,
        }
    }

    /// Overlay size.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Stickers in creation (paint) order.
    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    /// Sticker by id.
    pub fn get(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    /// Add a sticker centered in the overlay and return it.
    pub fn add(&mut self, content: impl Into<String>) -> Sticker {
        self.add_sized(content, self.sticker_size)
    }

    /// Add a sticker of an explicit `size`, centered in the overlay.
    pub fn add_sized(&mut self, content: impl Into<String>, size: Size) -> Sticker {
        let size = sanitize_size(size);
        self.insert(content.into(), centered(size, self.bounds), size)
    }

    /// Add a sticker at an explicit top-left `position` (clamped into the overlay).
    pub fn add_at(&mut self, content: impl Into<String>, position: Point, size: Size) -> Sticker {
        self.insert(content.into(), position, sanitize_size(size))
    }

    fn insert(&mut self, content: String, position: Point, size: Size) -> Sticker {
        let sticker = Sticker {
            id: StickerId(self.next_id),
            content,
            position: clamp_position(position, size, self.bounds),
            size,
        };
        self.next_id += 1;
        self.stickers.push(sticker.clone());
        sticker
    }

    /// Begin dragging `id` with `pointer` at `pointer_pos`.
    ///
    /// Returns `false` (and changes nothing) when the sticker does not exist, the pointer is
    /// already dragging, or another pointer has captured the sticker.
    pub fn start_drag(&mut self, id: StickerId, pointer: PointerId, pointer_pos: Point) -> bool {
        if self.drags.contains_key(&pointer) || self.drags.values().any(|d| d.sticker == id) {
            return false;
        }
        if !is_finite(pointer_pos) {
            return false;
        }
        let Some(sticker) = self.get(id) else {
            return false;
        };
        let state = DragState {
            sticker: id,
            pointer_origin: pointer_pos,
            sticker_origin: sticker.position,
        };
        self.drags.insert(pointer, state);
        true
    }

    /// Move the sticker captured by `pointer`; returns its new clamped position.
    ///
    /// Non-finite pointer positions are ignored.
    pub fn drag(&mut self, pointer: PointerId, pointer_pos: Point) -> Option<Point> {
        let state = *self.drags.get(&pointer)?;
        if !is_finite(pointer_pos) {
            return self.get(state.sticker).map(|s| s.position);
        }
        let bounds = self.bounds;
        let sticker = self.stickers.iter_mut().find(|s| s.id == state.sticker)?;
        let delta: Vec2 = pointer_pos - state.pointer_origin;
        sticker.position = clamp_position(state.sticker_origin + delta, sticker.size, bounds);
        Some(sticker.position)
    }

    /// Release `pointer`'s capture. Unknown pointers are ignored.
    pub fn end_drag(&mut self, pointer: PointerId) {
        self.drags.remove(&pointer);
    }

    /// Return `true` if some pointer is dragging `id`.
    pub fn is_dragging(&self, id: StickerId) -> bool {
        self.drags.values().any(|d| d.sticker == id)
    }

    /// Remove one sticker; removing an unknown id is a no-op.
    pub fn remove(&mut self, id: StickerId) -> bool {
        let before = self.stickers.len();
        self.stickers.retain(|s| s.id != id);
        self.drags.retain(|_, d| d.sticker != id);
        self.stickers.len() != before
    }

    /// Remove every sticker and cancel all drags.
    pub fn reset_all(&mut self) {
        self.stickers.clear();
        self.drags.clear();
    }

    /// Resize the overlay, re-clamping every sticker into the new bounds.
    ///
    /// Stickers added while the overlay had no area were pinned to the origin; the first resize
    /// to a real size centers them instead.
    pub fn resize(&mut self, bounds: Size) {
        let was_empty = self.bounds.width <= 0.0 || self.bounds.height <= 0.0;
        self.bounds = sanitize_size(bounds);
        for s in &mut self.stickers {
            let position = if was_empty {
                centered(s.size, self.bounds)
            } else {
                s.position
            };
            s.position = clamp_position(position, s.size, self.bounds);
        }
    }
}

/// Clamp a top-left `position` so a `size` box stays inside `bounds`.
///
/// When the box is larger than the overlay it is pinned to the origin.
pub fn clamp_position(position: Point, size: Size, bounds: Size) -> Point {
    let max_x = (bounds.width - size.width).max(0.0);
    let max_y = (bounds.height - size.height).max(0.0);
    let x = if position.x.is_finite() { position.x } else { 0.0 };
    let y = if position.y.is_finite() { position.y } else { 0.0 };
    Point::new(x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

fn centered(size: Size, bounds: Size) -> Point {
    Point::new(
        (bounds.width - size.width) / 2.0,
        (bounds.height - size.height) / 2.0,
    )
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn sanitize_size(s: Size) -> Size {
    let fix = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    Size::new(fix(s.width), fix(s.height))
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/stickers.rs"]
mod tests;
