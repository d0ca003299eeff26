//! Interchange mesh toolkit for wirecone.
//!
//! `meshkit` is the CPU side of the pipeline: it synthesizes parametric
//! primitives into a framework-agnostic representation (positions, normals,
//! and indexed submeshes plus a vertex layout descriptor) and writes them out
//! as Wavefront OBJ. The `renderer` crate converts these meshes into
//! device-resident buffers; nothing in here touches the GPU.

pub mod export;
pub mod mesh;
pub mod primitive;

pub use export::{Asset, ExportError};
pub use mesh::{
    AttributeFormat, AttributeSemantic, GeometryKind, Mesh, Submesh, VertexAttribute, VertexLayout,
};
pub use primitive::PrimitiveError;
