//! Camera capture session.
//!
//! The session holds the device only while it is needed: it is released synchronously after the
//! last slot is captured, on [`CaptureSession::stop`], and when the session is dropped.

use crate::assets::slots::{ImageSlotStore, RasterSource, SLOT_COUNT};
use crate::foundation::error::{BoothError, BoothResult};

/// A platform camera stream.
pub trait CameraDevice {
    /// Grab one still frame from the live stream.
    fn capture(&mut self) -> BoothResult<RasterSource>;

    /// Stop the stream and release the hardware. Must be idempotent.
    fn release(&mut self);
}

/// Four-shot capture session writing into an [`ImageSlotStore`].
pub struct CaptureSession<D: CameraDevice> {
    device: Option<D>,
    captured: usize,
}

impl<D: CameraDevice> CaptureSession<D> {
    /// Start a session on `device`, clearing any previous photos from `store`.
    pub fn start(device: D, store: &mut ImageSlotStore) -> Self {
        store.clear();
        tracing::debug!("camera session started");
        Self {
            device: Some(device),
            captured: 0,
        }
    }

    /// Capture the next photo into `store` and return its slot index.
    ///
    /// The device is released right after the last slot is filled. Capturing on a finished or
    /// stopped session is an acquisition error.
    pub fn capture(&mut self, store: &mut ImageSlotStore) -> BoothResult<usize> {
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| BoothError::acquisition("camera session is no longer active"))?;
        let source = match device.capture() {
            Ok(source) => source,
            Err(err) => {
                self.stop();
                return Err(match err {
                    BoothError::Acquisition(_) => err,
                    other => BoothError::acquisition(format!("camera capture failed: {other}")),
                });
            }
        };
        let index = store.push(source)?;
        self.captured += 1;
        tracing::debug!(slot = index, captured = self.captured, "photo captured");
        if self.captured >= SLOT_COUNT {
            self.stop();
        }
        Ok(index)
    }

    /// Number of photos captured so far.
    pub fn captured(&self) -> usize {
        self.captured
    }

    /// `true` once all slots are captured.
    pub fn is_complete(&self) -> bool {
        self.captured >= SLOT_COUNT
    }

    /// `true` while the device is held.
    pub fn is_active(&self) -> bool {
        self.device.is_some()
    }

    /// Release the device now. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.release();
            tracing::debug!(captured = self.captured, "camera released");
        }
    }
}

impl<D: CameraDevice> Drop for CaptureSession<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/acquire/camera.rs"]
mod tests;
