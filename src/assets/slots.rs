use std::sync::Arc;

use crate::assets::decode::{DecodedImage, decode_image, solid_image};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};

/// Number of photo slots in the collage.
pub const SLOT_COUNT: usize = 4;

/// Edge length of the placeholder square used for empty slots.
pub const PLACEHOLDER_SIZE: u32 = 600;

/// Fill color of the placeholder square.
pub const PLACEHOLDER_COLOR: Rgba8 = Rgba8::opaque_hex(0xcccccc);

/// A decodable raster held by a slot.
///
/// Encoded bytes are decoded lazily at render time, so a slot can be filled without paying for
/// decode up front.
#[derive(Clone, Debug)]
pub enum RasterSource {
    /// Encoded image bytes (PNG, JPEG, ...).
    Encoded(Arc<[u8]>),
    /// Already-decoded pixels.
    Decoded(Arc<DecodedImage>),
}

impl RasterSource {
    /// Wrap encoded bytes.
    pub fn encoded(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Encoded(bytes.into())
    }

    /// Wrap decoded pixels.
    pub fn decoded(image: DecodedImage) -> Self {
        Self::Decoded(Arc::new(image))
    }

    /// Deterministic placeholder for an empty slot.
    pub fn placeholder() -> Self {
        Self::decoded(solid_image(
            PLACEHOLDER_SIZE,
            PLACEHOLDER_SIZE,
            PLACEHOLDER_COLOR,
        ))
    }

    /// Decode (or share) the pixels behind this source.
    pub fn decode(&self) -> BoothResult<Arc<DecodedImage>> {
        match self {
            Self::Encoded(bytes) => decode_image(bytes).map(Arc::new),
            Self::Decoded(img) => Ok(Arc::clone(img)),
        }
    }
}

/// Four ordered photo slots (reading order: top-left, top-right, bottom-left, bottom-right).
#[derive(Clone, Debug, Default)]
pub struct ImageSlotStore {
    slots: [Option<RasterSource>; SLOT_COUNT],
}

impl ImageSlotStore {
    /// Create a store with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `source` into slot `index`, replacing what was there.
    pub fn set(&mut self, index: usize, source: RasterSource) -> BoothResult<()> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            BoothError::validation(format!("slot index {index} out of range 0..{SLOT_COUNT}"))
        })?;
        *slot = Some(source);
        Ok(())
    }

    /// Fill the first empty slot and return its index.
    pub fn push(&mut self, source: RasterSource) -> BoothResult<usize> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or_else(|| BoothError::validation("all photo slots are already filled"))?;
        self.slots[index] = Some(source);
        Ok(index)
    }

    /// Replace every slot with the first four of `sources`.
    ///
    /// Fewer than four sources is an [`BoothError::InsufficientInput`] and leaves the store
    /// untouched.
    pub fn replace_all(&mut self, sources: Vec<RasterSource>) -> BoothResult<()> {
        if sources.len() < SLOT_COUNT {
            return Err(BoothError::insufficient_input(format!(
                "choose {SLOT_COUNT} photos (got {})",
                sources.len()
            )));
        }
        for (slot, source) in self.slots.iter_mut().zip(sources) {
            *slot = Some(source);
        }
        Ok(())
    }

    /// Source in slot `index`, if filled.
    pub fn get(&self, index: usize) -> Option<&RasterSource> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of filled slots.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Return `true` when every slot holds a source.
    pub fn is_full(&self) -> bool {
        self.filled_count() == SLOT_COUNT
    }

    /// Pad every empty slot with the placeholder square.
    pub fn fill_placeholders(&mut self) {
        for slot in &mut self.slots {
            if slot.is_none() {
                *slot = Some(RasterSource::placeholder());
            }
        }
    }

    /// All four sources, with placeholders standing in for empty slots.
    pub fn resolved(&self) -> [RasterSource; SLOT_COUNT] {
        std::array::from_fn(|i| {
            self.slots[i]
                .clone()
                .unwrap_or_else(RasterSource::placeholder)
        })
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/slots.rs"]
mod tests;
