//! Photobooth is a four-photo collage compositing engine.
//!
//! Four source images of any size are cover-fit into a square 2x2 grid, optionally framed with
//! a white border or a circular mask, decorated with draggable stickers that live in a separate
//! overlay space, and flattened into a PNG. The public API is session-oriented:
//!
//! - Acquire photos through a [`CaptureSession`] or [`load_upload_batch`]
//! - Open them in a [`CollageEditor`] and react to layout, frame and sticker events
//! - Export the flattened raster with [`CollageEditor::export_frame`]
//!
//! The pure pieces ([`compute_layout`], [`compute_cover_crop`], [`overlay_to_export`]) are
//! exported separately so they can be tested and reused on their own.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod acquire;
mod assets;
mod foundation;

pub(crate) mod compose;
pub(crate) mod editor;
pub(crate) mod export;
pub(crate) mod layout;
pub(crate) mod overlay;
/// Draw lists, the CPU raster backend and the live preview.
pub mod render;

pub use crate::foundation::core::{Circle, PixelRect, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{BoothError, BoothResult};

pub use crate::acquire::camera::{CameraDevice, CaptureSession};
pub use crate::acquire::upload::{load_upload_batch, upload_into};
pub use crate::assets::decode::{DecodedImage, decode_image, rasterize_svg, solid_image};
pub use crate::assets::loader::{FsLoader, ImageLoader, MemoryLoader};
pub use crate::assets::slots::{
    ImageSlotStore, PLACEHOLDER_COLOR, PLACEHOLDER_SIZE, RasterSource, SLOT_COUNT,
};
pub use crate::compose::cover::{CoverCrop, compute_cover_crop};
pub use crate::compose::frame::{BORDER_COLOR, FrameStyle, border_width};
pub use crate::compose::grid::plan_grid;
pub use crate::editor::config::{
    ENV_DECODE_TIMEOUT_MS, ENV_STICKER_FONT, EditorOpts, OverlayConfig, ProjectConfig,
    StickerConfig,
};
pub use crate::editor::session::CollageEditor;
pub use crate::export::compositor::{
    Backdrop, EXPORT_FILE_NAME, ExportRequest, encode_png, export, load_backdrop, plan_export,
    save_png, write_png,
};
pub use crate::layout::grid::{GridLayout, canvas_size_for_container, compute_layout};
pub use crate::overlay::mapping::overlay_to_export;
pub use crate::overlay::stickers::{
    DEFAULT_PALETTE, DEFAULT_STICKER_SIZE, PointerId, Sticker, StickerId, StickerOverlay,
};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::plan::{DrawKind, DrawOp, RenderPlan};
pub use crate::render::preview::PreviewRenderer;
pub use crate::render::text::StickerFont;
