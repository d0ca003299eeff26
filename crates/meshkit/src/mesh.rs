//! Framework-agnostic geometry containers.
//!
//! A [`Mesh`] keeps separate position and normal arrays for export, and packs
//! them into one interleaved buffer (described by [`VertexLayout`]) when a GPU
//! upload needs the data. The layout is the contract between the generated
//! vertices and the render pipeline's vertex stage: offsets and formats must
//! match exactly or pipeline creation fails downstream.

use bytemuck::{Pod, Zeroable};

/// Topology of the indices in a [`Submesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Triangles,
}

/// Meaning of one vertex attribute within the interleaved layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSemantic {
    Position,
    Normal,
}

/// Scalar format of one vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeFormat {
    Float32x3,
}

impl AttributeFormat {
    /// Size of one attribute value in bytes.
    pub fn size(self) -> u64 {
        match self {
            AttributeFormat::Float32x3 => 12,
        }
    }
}

/// One attribute slot inside a [`VertexLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub semantic: AttributeSemantic,
    pub format: AttributeFormat,
    /// Byte offset of the attribute within one packed vertex.
    pub offset: u64,
}

/// Describes how packed vertices are laid out in the upload buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u64,
}

impl VertexLayout {
    fn new(attributes: Vec<VertexAttribute>, stride: u64) -> Self {
        Self { attributes, stride }
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Distance in bytes between consecutive packed vertices.
    pub fn stride(&self) -> u64 {
        self.stride
    }
}

/// One packed vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct PackedVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// An indexed primitive group within a mesh.
#[derive(Debug, Clone)]
pub struct Submesh {
    indices: Vec<u32>,
    geometry: GeometryKind,
}

impl Submesh {
    pub(crate) fn new(indices: Vec<u32>, geometry: GeometryKind) -> Self {
        Self { indices, geometry }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn geometry(&self) -> GeometryKind {
        self.geometry
    }
}

/// CPU-side interchange mesh: vertex attributes grouped with indexed
/// submeshes, immutable once a primitive generator has produced it.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    submeshes: Vec<Submesh>,
}

impl Mesh {
    pub(crate) fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positions: Vec::new(),
            normals: Vec::new(),
            submeshes: Vec::new(),
        }
    }

    pub(crate) fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) {
        self.positions.push(position);
        self.normals.push(normal);
    }

    pub(crate) fn push_submesh(&mut self, submesh: Submesh) {
        self.submeshes.push(submesh);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    /// Layout of the buffer produced by [`Mesh::pack_vertices`].
    pub fn vertex_layout(&self) -> VertexLayout {
        let position = AttributeFormat::Float32x3;
        let normal = AttributeFormat::Float32x3;
        VertexLayout::new(
            vec![
                VertexAttribute {
                    semantic: AttributeSemantic::Position,
                    format: position,
                    offset: 0,
                },
                VertexAttribute {
                    semantic: AttributeSemantic::Normal,
                    format: normal,
                    offset: position.size(),
                },
            ],
            position.size() + normal.size(),
        )
    }

    /// Interleaves the attribute arrays into the byte buffer described by
    /// [`Mesh::vertex_layout`].
    pub fn pack_vertices(&self) -> Vec<u8> {
        let packed: Vec<PackedVertex> = self
            .positions
            .iter()
            .zip(&self.normals)
            .map(|(&position, &normal)| PackedVertex { position, normal })
            .collect();
        bytemuck::cast_slice(&packed).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_vertex_mesh() -> Mesh {
        let mut mesh = Mesh::empty("test");
        mesh.push_vertex([0.0, 1.0, 2.0], [0.0, 1.0, 0.0]);
        mesh.push_vertex([3.0, 4.0, 5.0], [1.0, 0.0, 0.0]);
        mesh.push_submesh(Submesh::new(vec![0, 1, 0], GeometryKind::Triangles));
        mesh
    }

    #[test]
    fn packed_buffer_matches_layout_stride() {
        let mesh = two_vertex_mesh();
        let layout = mesh.vertex_layout();
        let packed = mesh.pack_vertices();
        assert_eq!(packed.len() as u64, layout.stride() * mesh.vertex_count() as u64);
    }

    #[test]
    fn layout_interleaves_position_then_normal() {
        let layout = two_vertex_mesh().vertex_layout();
        let attributes = layout.attributes();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].semantic, AttributeSemantic::Position);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[1].semantic, AttributeSemantic::Normal);
        assert_eq!(attributes[1].offset, 12);
        assert_eq!(layout.stride(), 24);
    }

    #[test]
    fn packed_bytes_start_with_first_position() {
        let mesh = two_vertex_mesh();
        let packed = mesh.pack_vertices();
        let floats: &[f32] = bytemuck::cast_slice(&packed);
        assert_eq!(&floats[0..3], &[0.0, 1.0, 2.0]);
        assert_eq!(&floats[3..6], &[0.0, 1.0, 0.0]);
    }
}
