//! Asset container and Wavefront OBJ export.
//!
//! An [`Asset`] wraps interchange meshes for writing to disk. The exporter
//! validates the destination's file extension before anything touches the
//! filesystem, and overwrites an existing file when asked to export to the
//! same path twice.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::mesh::{GeometryKind, Mesh};

/// File extensions the exporter understands.
const SUPPORTED_EXTENSIONS: &[&str] = &["obj"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot export '.{0}': unsupported file extension")]
    UnsupportedExtension(String),
    #[error("export path {} has no file extension", .0.display())]
    MissingExtension(PathBuf),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Container for meshes awaiting export.
#[derive(Debug, Clone, Default)]
pub struct Asset {
    meshes: Vec<Mesh>,
}

impl Asset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Whether `extension` names a format the exporter can write.
    pub fn can_export_extension(extension: &str) -> bool {
        SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(extension))
    }

    /// Writes every contained mesh to `path`, overwriting any existing file.
    pub fn export(&self, path: &Path) -> Result<(), ExportError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .ok_or_else(|| ExportError::MissingExtension(path.to_path_buf()))?;
        if !Self::can_export_extension(extension) {
            return Err(ExportError::UnsupportedExtension(extension.to_string()));
        }

        fs::write(path, self.to_obj()).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            meshes = self.meshes.len(),
            "exported asset"
        );
        Ok(())
    }

    /// Serialises the contained meshes as Wavefront OBJ text. Vertex numbering
    /// is one-based and global across meshes, as the format requires.
    fn to_obj(&self) -> String {
        let mut out = String::new();
        let mut base = 1usize;
        for mesh in &self.meshes {
            let _ = writeln!(out, "o {}", mesh.name());
            for position in mesh.positions() {
                let _ = writeln!(out, "v {} {} {}", position[0], position[1], position[2]);
            }
            for normal in mesh.normals() {
                let _ = writeln!(out, "vn {} {} {}", normal[0], normal[1], normal[2]);
            }
            for submesh in mesh.submeshes() {
                match submesh.geometry() {
                    GeometryKind::Triangles => {
                        for face in submesh.indices().chunks_exact(3) {
                            let a = base + face[0] as usize;
                            let b = base + face[1] as usize;
                            let c = base + face[2] as usize;
                            let _ = writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}");
                        }
                    }
                }
            }
            base += mesh.vertex_count();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cone_asset() -> Asset {
        let mut asset = Asset::new();
        asset.add(
            Mesh::cone([1.0, 1.0, 1.0], [10, 10], false, true, GeometryKind::Triangles).unwrap(),
        );
        asset
    }

    #[test]
    fn obj_extension_is_supported() {
        assert!(Asset::can_export_extension("obj"));
        assert!(Asset::can_export_extension("OBJ"));
        assert!(!Asset::can_export_extension("zzz"));
    }

    #[test]
    fn export_writes_a_non_empty_obj_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("primitive.obj");

        cone_asset().export(&path).expect("export");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.is_empty());
        assert!(contents.starts_with("o cone"));
        assert!(contents.lines().any(|line| line.starts_with("v ")));
        assert!(contents.lines().any(|line| line.starts_with("vn ")));
        assert!(contents.lines().any(|line| line.starts_with("f ")));
    }

    #[test]
    fn unsupported_extension_fails_before_any_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("primitive.zzz");

        let error = cone_asset().export(&path).unwrap_err();
        assert!(matches!(error, ExportError::UnsupportedExtension(ref ext) if ext == "zzz"));
        assert!(!path.exists());
    }

    #[test]
    fn extensionless_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("primitive");

        let error = cone_asset().export(&path).unwrap_err();
        assert!(matches!(error, ExportError::MissingExtension(_)));
        assert!(!path.exists());
    }

    #[test]
    fn export_twice_overwrites_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("primitive.obj");
        let asset = cone_asset();

        asset.export(&path).expect("first export");
        let first = fs::read_to_string(&path).unwrap();
        asset.export(&path).expect("second export");
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn face_indices_are_one_based() {
        let obj = cone_asset().to_obj();
        for line in obj.lines().filter(|line| line.starts_with("f ")) {
            for reference in line.split_whitespace().skip(1) {
                let index: usize = reference.split("//").next().unwrap().parse().unwrap();
                assert!(index >= 1);
            }
        }
    }
}
