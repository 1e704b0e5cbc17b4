use std::path::Path;

use crate::assets::slots::{ImageSlotStore, RasterSource, SLOT_COUNT};
use crate::foundation::error::{BoothError, BoothResult};

/// Read the first four of `paths` as encoded raster sources.
///
/// Fewer than four paths is [`BoothError::InsufficientInput`]; an unreadable file is
/// [`BoothError::Acquisition`]. Files are not decoded here, so a corrupt image only surfaces
/// later as a skipped slot.
pub fn load_upload_batch<P: AsRef<Path>>(paths: &[P]) -> BoothResult<Vec<RasterSource>> {
    if paths.len() < SLOT_COUNT {
        return Err(BoothError::insufficient_input(format!(
            "choose {SLOT_COUNT} photos (got {})",
            paths.len()
        )));
    }
    paths
        .iter()
        .take(SLOT_COUNT)
        .map(|p| {
            let p = p.as_ref();
            std::fs::read(p).map(RasterSource::encoded).map_err(|e| {
                BoothError::acquisition(format!("failed to read '{}': {e}", p.display()))
            })
        })
        .collect()
}

/// Load an upload batch and replace every slot of `store` with it.
///
/// On any error the store is left untouched.
pub fn upload_into<P: AsRef<Path>>(store: &mut ImageSlotStore, paths: &[P]) -> BoothResult<()> {
    let sources = load_upload_batch(paths)?;
    store.replace_all(sources)?;
    tracing::debug!(count = SLOT_COUNT, "upload batch loaded");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/upload.rs"]
mod tests;
