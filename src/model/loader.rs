//! One parser per supported format behind a common [`ModelLoader`] trait.
//!
//! Loaders only extract what the viewer needs to frame a model: world-space
//! vertex positions and a triangle count. Materials, normals and textures
//! are left to the renderer.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};

use crate::error::VantageError;
use crate::model::bounds::BoundingBox;
use crate::model::format::ModelFormat;

/// Raw model bytes plus where they came from.
#[derive(Debug, Clone)]
pub struct ModelSource {
    /// Display name, usually the file name.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
    /// On-disk location, used to resolve external glTF buffers.
    pub path: Option<PathBuf>,
}

impl ModelSource {
    /// Source held only in memory (drag-and-drop, tests).
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            path: None,
        }
    }

    /// Read a file from disk.
    ///
    /// # Errors
    ///
    /// [`VantageError::Io`] if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, VantageError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            name,
            bytes,
            path: Some(path.to_path_buf()),
        })
    }
}

/// Geometry extracted from a model file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelGeometry {
    /// Format the geometry was parsed from.
    pub format: ModelFormat,
    /// World-space vertex positions.
    pub positions: Vec<Vec3>,
    /// Number of triangles after fan/strip expansion.
    pub triangle_count: usize,
}

impl ModelGeometry {
    /// Axis-aligned bounds of all positions.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.positions.iter().copied())
    }
}

/// Parses one model format into [`ModelGeometry`].
pub trait ModelLoader: Send + Sync {
    /// Format handled by this loader.
    fn format(&self) -> ModelFormat;

    /// Parse `source`.
    ///
    /// # Errors
    ///
    /// [`VantageError::ModelLoad`] if the bytes are malformed or contain no
    /// vertices.
    fn load(&self, source: &ModelSource) -> Result<ModelGeometry, VantageError>;
}

fn non_empty(
    source: &ModelSource,
    geometry: ModelGeometry,
) -> Result<ModelGeometry, VantageError> {
    if geometry.positions.is_empty() {
        return Err(VantageError::model_load(
            &source.name,
            "file contains no vertices",
        ));
    }
    Ok(geometry)
}

/// STL loader (binary and ASCII) backed by `stl_io`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlLoader;

impl ModelLoader for StlLoader {
    fn format(&self) -> ModelFormat {
        ModelFormat::Stl
    }

    fn load(&self, source: &ModelSource) -> Result<ModelGeometry, VantageError> {
        let mut reader = Cursor::new(source.bytes.as_slice());
        let mesh = stl_io::read_stl(&mut reader)
            .map_err(|e| VantageError::model_load(&source.name, e))?;

        let positions = mesh
            .vertices
            .iter()
            .map(|v| Vec3::new(v[0], v[1], v[2]))
            .collect();
        non_empty(
            source,
            ModelGeometry {
                format: ModelFormat::Stl,
                positions,
                triangle_count: mesh.faces.len(),
            },
        )
    }
}

/// Wavefront OBJ loader backed by `tobj`. Polygons are triangulated;
/// materials are not resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader;

impl ModelLoader for ObjLoader {
    fn format(&self) -> ModelFormat {
        ModelFormat::Obj
    }

    fn load(&self, source: &ModelSource) -> Result<ModelGeometry, VantageError> {
        // Stray non-UTF-8 bytes (usually in comments) should not sink the file
        let text = String::from_utf8_lossy(&source.bytes);
        let mut reader = Cursor::new(text.as_bytes());
        let options = tobj::LoadOptions {
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..tobj::LoadOptions::default()
        };
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &options, |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| VantageError::model_load(&source.name, e))?;

        let positions = models
            .iter()
            .flat_map(|model| model.mesh.positions.chunks_exact(3))
            .map(Vec3::from_slice)
            .collect();
        let triangle_count = models.iter().map(|model| model.mesh.indices.len() / 3).sum();
        non_empty(
            source,
            ModelGeometry {
                format: ModelFormat::Obj,
                positions,
                triangle_count,
            },
        )
    }
}

/// glTF (JSON) loader backed by the `gltf` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfLoader;

impl ModelLoader for GltfLoader {
    fn format(&self) -> ModelFormat {
        ModelFormat::Gltf
    }

    fn load(&self, source: &ModelSource) -> Result<ModelGeometry, VantageError> {
        load_gltf(source, ModelFormat::Gltf)
    }
}

/// Binary glTF loader. Checks the container magic before parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlbLoader;

impl ModelLoader for GlbLoader {
    fn format(&self) -> ModelFormat {
        ModelFormat::Glb
    }

    fn load(&self, source: &ModelSource) -> Result<ModelGeometry, VantageError> {
        if !source.bytes.starts_with(b"glTF") {
            return Err(VantageError::model_load(
                &source.name,
                "missing binary glTF header",
            ));
        }
        load_gltf(source, ModelFormat::Glb)
    }
}

fn load_gltf(
    source: &ModelSource,
    format: ModelFormat,
) -> Result<ModelGeometry, VantageError> {
    let ::gltf::Gltf { document, blob } = ::gltf::Gltf::from_slice(&source.bytes)
        .map_err(|e| VantageError::model_load(&source.name, e))?;
    let base = source.path.as_deref().and_then(Path::parent);
    let buffers = ::gltf::import_buffers(&document, base, blob)
        .map_err(|e| VantageError::model_load(&source.name, e))?;

    let mut out = ModelGeometry {
        format,
        positions: Vec::new(),
        triangle_count: 0,
    };

    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                visit_node(&node, Mat4::IDENTITY, &buffers, &mut out);
            }
        }
        // No scene graph: take meshes as authored
        None => {
            for mesh in document.meshes() {
                read_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut out);
            }
        }
    }

    non_empty(source, out)
}

fn visit_node(
    node: &::gltf::Node<'_>,
    parent: Mat4,
    buffers: &[::gltf::buffer::Data],
    out: &mut ModelGeometry,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        read_mesh(&mesh, transform, buffers, out);
    }
    for child in node.children() {
        visit_node(&child, transform, buffers, out);
    }
}

fn read_mesh(
    mesh: &::gltf::Mesh<'_>,
    transform: Mat4,
    buffers: &[::gltf::buffer::Data],
    out: &mut ModelGeometry,
) {
    for primitive in mesh.primitives() {
        let reader =
            primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let before = out.positions.len();
        out.positions.extend(
            positions.map(|p| transform.transform_point3(Vec3::from_array(p))),
        );
        let vertex_count = out.positions.len() - before;

        let element_count = reader
            .read_indices()
            .map_or(vertex_count, |indices| indices.into_u32().count());
        out.triangle_count += match primitive.mode() {
            ::gltf::mesh::Mode::Triangles => element_count / 3,
            ::gltf::mesh::Mode::TriangleStrip | ::gltf::mesh::Mode::TriangleFan => {
                element_count.saturating_sub(2)
            }
            // Points and lines still contribute to the bounds
            _ => 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_STL: &str = "solid tri
facet normal 0 0 1
  outer loop
    vertex 0 0 0
    vertex 2 0 0
    vertex 0 3 0
  endloop
endfacet
facet normal 0 0 1
  outer loop
    vertex 0 0 0
    vertex 0 3 0
    vertex 0 0 -1
  endloop
endfacet
endsolid tri
";

    const OBJ: &str = "# quad
o quad
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.5
v -1.0 1.0 0.0
vn 0 0 1
f 1 2 3 4
";

    /// One triangle; the buffer is three f32 positions as a base64 data URI.
    const GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [ { "mesh": 0, "translation": [10.0, 0.0, 0.0] } ],
  "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
  "buffers": [ {
    "byteLength": 36,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
  } ],
  "bufferViews": [ { "buffer": 0, "byteOffset": 0, "byteLength": 36 } ],
  "accessors": [ {
    "bufferView": 0,
    "componentType": 5126,
    "count": 3,
    "type": "VEC3",
    "min": [0.0, 0.0, 0.0],
    "max": [1.0, 1.0, 0.0]
  } ]
}"#;

    fn source(name: &str, bytes: &[u8]) -> ModelSource {
        ModelSource::from_bytes(name, bytes.to_vec())
    }

    #[test]
    fn ascii_stl_bounds() {
        let geometry = StlLoader.load(&source("tri.stl", ASCII_STL.as_bytes())).unwrap();
        assert_eq!(geometry.triangle_count, 2);
        let bounds = geometry.bounds();
        assert_eq!(bounds.min, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn binary_stl_bounds() {
        let mut bytes = vec![0u8; 80];
        bytes.extend_from_slice(&1u32.to_le_bytes());
        let floats: [f32; 12] = [
            0.0, 0.0, 1.0, // normal
            -1.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 4.0, 0.0,
        ];
        for f in floats {
            bytes.extend_from_slice(&f.to_le_bytes());
        }
        bytes.extend_from_slice(&0u16.to_le_bytes());

        let geometry = StlLoader.load(&source("tri.stl", &bytes)).unwrap();
        assert_eq!(geometry.triangle_count, 1);
        assert_eq!(geometry.bounds().size(), Vec3::new(2.0, 4.0, 0.0));
    }

    #[test]
    fn garbage_stl_fails() {
        let err = StlLoader.load(&source("junk.stl", b"not an stl")).unwrap_err();
        assert!(matches!(err, VantageError::ModelLoad { .. }));
    }

    #[test]
    fn obj_reads_vertices_and_fans_faces() {
        let geometry = ObjLoader.load(&source("quad.obj", OBJ.as_bytes())).unwrap();
        assert_eq!(geometry.positions.len(), 4);
        assert_eq!(geometry.triangle_count, 2);
        assert_eq!(geometry.bounds().max, Vec3::new(1.0, 1.0, 0.5));
    }

    #[test]
    fn obj_with_bad_vertex_fails() {
        let err = ObjLoader
            .load(&source("bad.obj", b"v 1 2 3\nv 1 nope 3\nf 1 2 1\n"))
            .unwrap_err();
        assert!(matches!(err, VantageError::ModelLoad { ref file, .. } if file == "bad.obj"));
    }

    #[test]
    fn obj_tolerates_non_utf8_comment() {
        let mut bytes = b"# exported by \xff\xfe tool\n".to_vec();
        bytes.extend_from_slice(OBJ.as_bytes());
        let geometry = ObjLoader.load(&source("latin1.obj", &bytes)).unwrap();
        assert_eq!(geometry.triangle_count, 2);
        assert_eq!(geometry.bounds().min, Vec3::new(-1.0, -1.0, 0.0));
    }

    #[test]
    fn obj_without_vertices_is_a_load_failure() {
        let err = ObjLoader.load(&source("empty.obj", b"# nothing\n")).unwrap_err();
        assert!(matches!(err, VantageError::ModelLoad { .. }));
    }

    #[test]
    fn gltf_applies_node_transform() {
        let geometry = GltfLoader.load(&source("tri.gltf", GLTF.as_bytes())).unwrap();
        assert_eq!(geometry.positions.len(), 3);
        assert_eq!(geometry.triangle_count, 1);
        let bounds = geometry.bounds();
        assert_eq!(bounds.min, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 1.0, 0.0));
    }

    #[test]
    fn glb_requires_binary_magic() {
        let err = GlbLoader.load(&source("tri.glb", GLTF.as_bytes())).unwrap_err();
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn dispatch_picks_matching_loader() {
        for format in ModelFormat::ALL {
            assert_eq!(format.loader().format(), format);
        }
    }
}
