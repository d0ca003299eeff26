use anyhow::{Context, Result};

use super::context::GpuContext;
use super::mesh::GpuMesh;
use super::pipeline::ShaderPipeline;

/// Records, submits, and presents one wireframe frame.
///
/// One command buffer, one render pass, one indexed draw. The pass is closed
/// when it goes out of scope, which is required before the encoder can finish;
/// submission does not wait for GPU completion.
pub(crate) fn render_frame(
    gpu: &GpuContext,
    pipeline: &ShaderPipeline,
    mesh: &GpuMesh,
    clear_color: wgpu::Color,
) -> Result<()> {
    let frame = gpu
        .surface
        .get_current_texture()
        .context("failed to acquire drawable from the surface")?;
    let view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let submesh = mesh
        .submeshes
        .first()
        .context("mesh has no submesh to draw")?;

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame encoder"),
        });

    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("wireframe pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        render_pass.set_pipeline(&pipeline.pipeline);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(submesh.index_buffer.slice(..), submesh.index_format);
        render_pass.draw_indexed(0..submesh.index_count, 0, 0..1);
    }

    gpu.queue.submit(std::iter::once(encoder.finish()));
    frame.present();
    tracing::trace!(
        indices = submesh.index_count,
        width = gpu.size.width,
        height = gpu.size.height,
        "presented frame"
    );
    Ok(())
}
