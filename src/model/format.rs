use std::fmt;
use std::path::Path;

use crate::error::VantageError;
use crate::model::loader::{GlbLoader, GltfLoader, ModelLoader, ObjLoader, StlLoader};

/// Extensions accepted by the file input, in display order.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = [".stl", ".obj", ".gltf", ".glb"];

/// Supported model file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    /// STL (stereolithography), binary or ASCII.
    Stl,
    /// Wavefront OBJ.
    Obj,
    /// glTF JSON with external or embedded buffers.
    Gltf,
    /// glTF binary container.
    Glb,
}

impl ModelFormat {
    /// Every supported format.
    pub const ALL: [Self; 4] = [Self::Stl, Self::Obj, Self::Gltf, Self::Glb];

    /// Detect format from a file extension, with or without the leading
    /// dot, case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        match ext.to_ascii_lowercase().as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            "gltf" => Some(Self::Gltf),
            "glb" => Some(Self::Glb),
            _ => None,
        }
    }

    /// Detect format from a file path or name.
    ///
    /// # Errors
    ///
    /// [`VantageError::UnsupportedFormat`] for anything off the allow-list,
    /// including files without an extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, VantageError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext).ok_or_else(|| VantageError::UnsupportedFormat {
            extension: ext.to_ascii_lowercase(),
        })
    }

    /// Canonical extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
            Self::Gltf => "gltf",
            Self::Glb => "glb",
        }
    }

    /// The parser for this format.
    #[must_use]
    pub fn loader(self) -> &'static dyn ModelLoader {
        match self {
            Self::Stl => &StlLoader,
            Self::Obj => &ObjLoader,
            Self::Gltf => &GltfLoader,
            Self::Glb => &GlbLoader,
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}
