//! Eventually-consistent live preview of the photo grid.
//!
//! Every invalidation starts a new generation: the canvas is cleared, the layout recomputed and
//! one decode task per slot is spawned on the rayon pool. Completions are drawn as they arrive,
//! so intermediate frames may be partial. Completions tagged with an older generation are
//! dropped, which keeps the settled frame free of tearing when invalidations overlap.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crate::assets::decode::DecodedImage;
use crate::assets::slots::{RasterSource, SLOT_COUNT};
use crate::compose::frame::FrameStyle;
use crate::compose::grid::plan_cell;
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::grid::{GridLayout, compute_layout};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::CpuBackend;

/// Default time [`PreviewRenderer::settle`] waits for outstanding decodes.
pub const DEFAULT_DECODE_TIMEOUT: Duration = Duration::from_secs(30);

struct DecodeDone {
    generation: u64,
    slot: usize,
    result: BoothResult<Arc<DecodedImage>>,
}

/// Owner of the preview canvas.
pub struct PreviewRenderer<B: RenderBackend = CpuBackend> {
    backend: B,
    canvas: FrameRGBA,
    layout: GridLayout,
    style: FrameStyle,
    generation: u64,
    pending: [bool; SLOT_COUNT],
    decode_timeout: Duration,
    tx: Sender<DecodeDone>,
    rx: Receiver<DecodeDone>,
}

impl<B: RenderBackend> PreviewRenderer<B> {
    /// Create a renderer with an empty 0x0 canvas.
    pub fn new(backend: B, decode_timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            canvas: FrameRGBA::new_transparent(0, 0),
            layout: compute_layout(0),
            style: FrameStyle::None,
            generation: 0,
            pending: [false; SLOT_COUNT],
            decode_timeout,
            tx,
            rx,
        }
    }

    /// Start a new render pass for `sources` on a `canvas_size` square canvas.
    ///
    /// Returns the new generation number.
    #[tracing::instrument(level = "debug", skip(self, sources), fields(generation))]
    pub fn invalidate(
        &mut self,
        sources: [RasterSource; SLOT_COUNT],
        canvas_size: u32,
        style: FrameStyle,
    ) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        tracing::Span::current().record("generation", generation);

        self.layout = compute_layout(canvas_size);
        self.style = style;
        self.canvas = FrameRGBA::new_transparent(canvas_size, canvas_size);
        self.pending = [true; SLOT_COUNT];

        for (slot, source) in sources.into_iter().enumerate() {
            let tx = self.tx.clone();
            rayon::spawn(move || {
                let result = source.decode();
                // The receiver only disappears with the renderer itself.
                let _ = tx.send(DecodeDone {
                    generation,
                    slot,
                    result,
                });
            });
        }
        generation
    }

    /// Draw every decode that has already completed. Returns how many slots were drawn.
    pub fn pump(&mut self) -> BoothResult<usize> {
        let mut drawn = 0;
        while let Ok(done) = self.rx.try_recv() {
            if self.apply(done) {
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    /// Block until every slot of the current generation has been handled.
    ///
    /// Fails with a render error if the decode timeout elapses first.
    pub fn settle(&mut self) -> BoothResult<()> {
        let deadline = Instant::now() + self.decode_timeout;
        self.pump()?;
        while !self.is_settled() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(done) => {
                    self.apply(done);
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(BoothError::render(format!(
                        "preview decode timed out after {:?}",
                        self.decode_timeout
                    )));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(BoothError::render("preview decode channel closed"));
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, done: DecodeDone) -> bool {
        if done.generation != self.generation {
            tracing::debug!(
                stale = done.generation,
                current = self.generation,
                slot = done.slot,
                "dropping stale decode"
            );
            return false;
        }
        let Some(pending) = self.pending.get_mut(done.slot) else {
            return false;
        };
        *pending = false;

        match done.result {
            Ok(image) => {
                let ops = plan_cell(
                    image,
                    self.layout.cells[done.slot],
                    self.style,
                    self.layout.canvas_size,
                );
                match self.backend.draw_ops(&mut self.canvas, &ops) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(slot = done.slot, %err, "skipping slot that failed to draw");
                        false
                    }
                }
            }
            Err(err) => {
                tracing::warn!(slot = done.slot, %err, "skipping slot that failed to decode");
                false
            }
        }
    }

    /// Drop the canvas and every outstanding decode.
    ///
    /// In-flight completions belong to an older generation afterwards and are discarded.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = [false; SLOT_COUNT];
        self.layout = compute_layout(0);
        self.canvas = FrameRGBA::new_transparent(0, 0);
        tracing::debug!(generation = self.generation, "preview reset");
    }

    /// `true` once every slot of the current generation has been drawn or skipped.
    pub fn is_settled(&self) -> bool {
        self.pending.iter().all(|p| !p)
    }

    /// Current preview pixels (premultiplied).
    pub fn canvas(&self) -> &FrameRGBA {
        &self.canvas
    }

    /// Layout used by the current generation.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Current generation number (0 before the first invalidation).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Settle timeout.
    pub fn decode_timeout(&self) -> Duration {
        self.decode_timeout
    }

    /// Mutable access to the backend, e.g. for export rendering.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
