use anyhow::{bail, Result};
use wgpu::util::DeviceExt;

use meshkit::mesh::{AttributeFormat, Mesh, VertexLayout};

/// Device-resident copy of one indexed primitive group.
pub(crate) struct GpuSubmesh {
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

/// Device-resident mesh: packed vertex buffer, the attribute layout the
/// pipeline binds against, and one index buffer per submesh.
pub(crate) struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub submeshes: Vec<GpuSubmesh>,
    attributes: Vec<wgpu::VertexAttribute>,
    stride: wgpu::BufferAddress,
}

impl GpuMesh {
    /// Converts an interchange mesh into device buffers. Fails on meshes that
    /// cannot be drawn (no vertices or no submeshes).
    pub(crate) fn new(device: &wgpu::Device, mesh: &Mesh) -> Result<Self> {
        if mesh.vertex_count() == 0 {
            bail!("cannot upload mesh '{}': it has no vertices", mesh.name());
        }
        if mesh.submeshes().is_empty() {
            bail!("cannot upload mesh '{}': it has no submeshes", mesh.name());
        }

        let layout = mesh.vertex_layout();
        let attributes = vertex_attributes(&layout);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh vertex buffer"),
            contents: &mesh.pack_vertices(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let submeshes = mesh
            .submeshes()
            .iter()
            .map(|submesh| {
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("submesh index buffer"),
                    contents: bytemuck::cast_slice(submesh.indices()),
                    usage: wgpu::BufferUsages::INDEX,
                });
                GpuSubmesh {
                    index_buffer,
                    index_count: submesh.index_count() as u32,
                    index_format: wgpu::IndexFormat::Uint32,
                }
            })
            .collect();

        tracing::debug!(
            mesh = mesh.name(),
            vertices = mesh.vertex_count(),
            submeshes = mesh.submeshes().len(),
            "uploaded mesh"
        );

        Ok(Self {
            vertex_buffer,
            submeshes,
            attributes,
            stride: layout.stride(),
        })
    }

    /// Vertex buffer layout for pipeline creation; derived from the
    /// interchange mesh's vertex descriptor so the two cannot drift apart.
    pub(crate) fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

/// Maps the interchange layout to wgpu attributes, assigning shader locations
/// in declaration order.
fn vertex_attributes(layout: &VertexLayout) -> Vec<wgpu::VertexAttribute> {
    layout
        .attributes()
        .iter()
        .enumerate()
        .map(|(location, attribute)| wgpu::VertexAttribute {
            format: map_format(attribute.format),
            offset: attribute.offset,
            shader_location: location as u32,
        })
        .collect()
}

fn map_format(format: AttributeFormat) -> wgpu::VertexFormat {
    match format {
        AttributeFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshkit::mesh::GeometryKind;

    #[test]
    fn attributes_follow_the_interchange_layout() {
        let mesh =
            Mesh::cone([1.0, 1.0, 1.0], [4, 1], false, false, GeometryKind::Triangles).unwrap();
        let layout = mesh.vertex_layout();
        let attributes = vertex_attributes(&layout);

        assert_eq!(attributes.len(), layout.attributes().len());
        assert_eq!(attributes[0].shader_location, 0);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attributes[1].shader_location, 1);
        assert_eq!(attributes[1].offset, 12);
    }
}
