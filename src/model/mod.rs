//! Model files: format dispatch, parsing, bounds, and background loading.
//!
//! | Format | Extension | Parser |
//! |--------|-----------|--------|
//! | STL | `.stl` | `stl_io` (binary and ASCII) |
//! | Wavefront OBJ | `.obj` | `tobj` (triangulated) |
//! | glTF | `.gltf` | `gltf` |
//! | glTF binary | `.glb` | `gltf` |
//!
//! Everything else is rejected before a load is attempted.

/// Axis-aligned bounding boxes.
pub mod bounds;
/// Supported formats and extension validation.
pub mod format;
/// Per-format parsers.
pub mod loader;
/// Load generation tickets.
pub mod request;
/// Background loader thread.
pub mod worker;

use glam::Vec3;

pub use bounds::BoundingBox;
pub use format::{ModelFormat, SUPPORTED_EXTENSIONS};
pub use loader::{ModelGeometry, ModelLoader, ModelSource};
pub use request::{LoadTicket, LoadTracker};
pub use worker::{LoadCompletion, LoadWorker};

use crate::error::VantageError;

/// Summary of a loaded model, as handed to the viewer.
///
/// The model is recentred on the origin before display, so `bounds` is
/// already translated by `center_offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    /// Format it was parsed from.
    pub format: ModelFormat,
    /// Bounds after centering.
    pub bounds: BoundingBox,
    /// Translation applied to center the model.
    pub center_offset: Vec3,
    /// Number of vertex positions read.
    pub vertex_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
}

impl LoadedModel {
    /// Summarize parsed geometry.
    #[must_use]
    pub fn from_geometry(geometry: &ModelGeometry) -> Self {
        let raw = geometry.bounds();
        let center_offset = raw.center_offset();
        Self {
            format: geometry.format,
            bounds: raw.translated(center_offset),
            center_offset,
            vertex_count: geometry.positions.len(),
            triangle_count: geometry.triangle_count,
        }
    }

    /// Parse `source` with the loader for `format`.
    ///
    /// # Errors
    ///
    /// [`VantageError::ModelLoad`] if the file is malformed or empty.
    pub fn load(source: &ModelSource, format: ModelFormat) -> Result<Self, VantageError> {
        let geometry = format.loader().load(source)?;
        let model = Self::from_geometry(&geometry);
        log::info!(
            "loaded {} ({}): {} vertices, {} triangles, size {:?}",
            source.name,
            format,
            model.vertex_count,
            model.triangle_count,
            model.bounds.size()
        );
        Ok(model)
    }
}
