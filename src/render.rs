/// Rendering backend trait and surfaces.
pub mod backend;
/// CPU raster backend.
pub mod cpu;
/// Backend-agnostic draw lists.
pub mod plan;
/// Live preview with generation-tagged decodes.
pub mod preview;
pub(crate) mod text;
