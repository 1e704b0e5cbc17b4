use std::path::{Path, PathBuf};

use crate::assets::loader::{FsLoader, ImageLoader};
use crate::assets::slots::{ImageSlotStore, RasterSource};
use crate::compose::frame::FrameStyle;
use crate::editor::config::{EditorOpts, ProjectConfig};
use crate::export::compositor::{ExportRequest, export, save_png};
use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::grid::canvas_size_for_container;
use crate::overlay::stickers::{PointerId, Sticker, StickerId, StickerOverlay};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuBackend, CpuBackendOpts};
use crate::render::preview::PreviewRenderer;

/// Owned state of one editing session.
///
/// Every mutation goes through `&mut self`; the preview renderer, overlay and slot store are
/// never shared.
pub struct CollageEditor {
    opts: EditorOpts,
    store: ImageSlotStore,
    style: FrameStyle,
    background: Option<String>,
    overlay: StickerOverlay,
    overlay_bounds: Rect,
    canvas_size: u32,
    preview: PreviewRenderer<CpuBackend>,
    loader: Box<dyn ImageLoader>,
}

impl CollageEditor {
    /// Create an empty editor that fetches backgrounds through `loader`.
    pub fn new(opts: EditorOpts, loader: Box<dyn ImageLoader>) -> Self {
        let backend = CpuBackend::new(
            CpuBackendOpts::default().with_sticker_font(opts.sticker_font.clone()),
        );
        let preview = PreviewRenderer::new(backend, opts.decode_timeout);
        let sticker_size = Size::new(opts.sticker_size, opts.sticker_size);
        Self {
            store: ImageSlotStore::new(),
            style: FrameStyle::None,
            background: None,
            overlay: StickerOverlay::with_sticker_size(Size::ZERO, sticker_size),
            overlay_bounds: Rect::ZERO,
            canvas_size: 0,
            preview,
            loader,
            opts,
        }
    }

    /// Build a ready-to-export editor from a project file's contents.
    ///
    /// Slot paths, the sticker font and relative background paths resolve against `base_dir`.
    pub fn from_project(
        config: &ProjectConfig,
        base_dir: &Path,
        opts: EditorOpts,
    ) -> BoothResult<Self> {
        config.validate()?;
        let font = config.sticker_font.as_ref().map(|p| base_dir.join(p));
        let opts = opts.with_sticker_font(font);

        let mut store = ImageSlotStore::new();
        for (i, rel) in config.slots.iter().enumerate() {
            let path = base_dir.join(rel);
            let bytes = std::fs::read(&path).map_err(|e| {
                BoothError::acquisition(format!("failed to read slot {i} '{}': {e}", path.display()))
            })?;
            store.set(i, RasterSource::encoded(bytes))?;
        }

        let mut editor = Self::new(opts, Box::new(FsLoader::new(base_dir)));
        editor.style = config.frame;
        editor.background = config.background.clone();
        editor.open(store);
        editor.apply_layout(config.canvas_size, config.overlay_rect());

        let default_size = editor.opts.sticker_size;
        for s in &config.stickers {
            let size = Size::new(
                s.width.unwrap_or(default_size),
                s.height.unwrap_or(default_size),
            );
            editor
                .overlay
                .add_at(s.content.clone(), Point::new(s.x, s.y), size);
        }
        Ok(editor)
    }

    /// Enter the editor with the acquired photos. Empty slots get the placeholder square.
    pub fn open(&mut self, mut store: ImageSlotStore) {
        store.fill_placeholders();
        self.store = store;
        self.overlay.reset_all();
        if self.canvas_size > 0 {
            self.rerender();
        }
    }

    /// React to a container resize: the canvas follows the container width, the overlay follows
    /// the container rectangle.
    pub fn layout_invalidated(&mut self, container: Rect) {
        let canvas_size = canvas_size_for_container(container.width());
        self.apply_layout(canvas_size, container);
    }

    fn apply_layout(&mut self, canvas_size: u32, overlay_bounds: Rect) {
        self.canvas_size = canvas_size;
        self.overlay_bounds = overlay_bounds;
        self.overlay.resize(overlay_bounds.size());
        self.rerender();
    }

    fn rerender(&mut self) {
        self.preview
            .invalidate(self.store.resolved(), self.canvas_size, self.style);
    }

    /// Switch the frame style and re-render the preview.
    pub fn set_frame_style(&mut self, style: FrameStyle) {
        if self.style != style {
            self.style = style;
            self.rerender();
        }
    }

    /// Set or clear the background URL. Only the export reads it.
    pub fn set_background(&mut self, url: Option<String>) {
        self.background = url.filter(|u| !u.trim().is_empty());
    }

    /// Add a palette sticker centered in the overlay.
    pub fn add_sticker(&mut self, content: impl Into<String>) -> Sticker {
        self.overlay.add(content)
    }

    /// See [`StickerOverlay::start_drag`].
    pub fn start_drag(&mut self, id: StickerId, pointer: PointerId, pos: Point) -> bool {
        self.overlay.start_drag(id, pointer, pos)
    }

    /// See [`StickerOverlay::drag`].
    pub fn drag(&mut self, pointer: PointerId, pos: Point) -> Option<Point> {
        self.overlay.drag(pointer, pos)
    }

    /// See [`StickerOverlay::end_drag`].
    pub fn end_drag(&mut self, pointer: PointerId) {
        self.overlay.end_drag(pointer);
    }

    /// Remove a sticker (double activation).
    pub fn remove_sticker(&mut self, id: StickerId) -> bool {
        self.overlay.remove(id)
    }

    /// Clear every sticker. Photos, frame and background stay.
    pub fn reset_requested(&mut self) {
        self.overlay.reset_all();
    }

    /// Wait for the preview to settle, then flatten background, grid and stickers.
    pub fn export_frame(&mut self) -> BoothResult<FrameRGBA> {
        self.preview.settle()?;
        let grid = self.preview.canvas().clone();
        let req = ExportRequest {
            grid: &grid,
            stickers: self.overlay.stickers(),
            overlay_bounds: self.overlay_bounds,
            background: self.background.as_deref(),
        };
        export(&req, self.loader.as_ref(), self.preview.backend_mut())
    }

    /// Export and write `collage.png` into `dir`.
    pub fn download_requested(&mut self, dir: &Path) -> BoothResult<PathBuf> {
        let frame = self.export_frame()?;
        let path = save_png(&frame, dir)?;
        tracing::info!(path = %path.display(), "collage saved");
        Ok(path)
    }

    /// Leave the editor: photos and stickers are dropped.
    pub fn exit(&mut self) {
        self.store.clear();
        self.overlay.reset_all();
        self.preview.reset();
        self.canvas_size = 0;
        self.overlay_bounds = Rect::ZERO;
        self.overlay.resize(Size::ZERO);
    }

    /// Options this editor was created with.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// Photo slots (placeholders included once opened).
    pub fn slots(&self) -> &ImageSlotStore {
        &self.store
    }

    /// Current frame style.
    pub fn frame_style(&self) -> FrameStyle {
        self.style
    }

    /// Current background URL.
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Stickers in paint order.
    pub fn stickers(&self) -> &[Sticker] {
        self.overlay.stickers()
    }

    /// Overlay rectangle in screen coordinates.
    pub fn overlay_bounds(&self) -> Rect {
        self.overlay_bounds
    }

    /// Square canvas edge length in pixels.
    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    /// Live preview (possibly partial until settled).
    pub fn preview(&mut self) -> BoothResult<&FrameRGBA> {
        self.preview.pump()?;
        Ok(self.preview.canvas())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
