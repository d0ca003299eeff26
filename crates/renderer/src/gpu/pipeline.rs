use std::borrow::Cow;

use anyhow::{anyhow, bail, Result};
use wgpu::naga;

use super::mesh::GpuMesh;

/// The whole shader program: a position passthrough and a constant red
/// fragment, mirroring the tutorial shaders this viewer exists to run.
pub(crate) const SHADER_SOURCE: &str = r#"
struct VertexIn {
    @location(0) position: vec3<f32>,
};

@vertex
fn vertex_main(in: VertexIn) -> @builtin(position) vec4<f32> {
    return vec4<f32>(in.position, 1.0);
}

@fragment
fn fragment_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

pub(crate) const VERTEX_ENTRY: &str = "vertex_main";
pub(crate) const FRAGMENT_ENTRY: &str = "fragment_main";

/// Parses the WGSL source and confirms both named entry points exist with the
/// expected stages. Without this check a missing entry point only surfaces as
/// an opaque pipeline validation failure.
pub(crate) fn verify_entry_points(source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|err| anyhow!("failed to parse shader source: {}", err.emit_to_string(source)))?;
    ensure_entry_point(&module, VERTEX_ENTRY, naga::ShaderStage::Vertex)?;
    ensure_entry_point(&module, FRAGMENT_ENTRY, naga::ShaderStage::Fragment)?;
    Ok(())
}

fn ensure_entry_point(module: &naga::Module, name: &str, stage: naga::ShaderStage) -> Result<()> {
    let present = module
        .entry_points
        .iter()
        .any(|entry| entry.name == name && entry.stage == stage);
    if !present {
        bail!("shader is missing {stage:?} entry point `{name}`");
    }
    Ok(())
}

/// Immutable pipeline state binding the two shader stages, the mesh-derived
/// vertex layout, and the surface's output format.
pub(crate) struct ShaderPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl ShaderPipeline {
    pub(crate) fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        mesh: &GpuMesh,
    ) -> Result<Self> {
        verify_entry_points(SHADER_SOURCE)?;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("primitive shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SOURCE)),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("primitive pipeline layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        // Validation failures (for example a vertex layout that does not match
        // the vertex stage's inputs) are collected through an error scope so
        // the caller gets a Result instead of an uncaught device error.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("primitive pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[mesh.buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                // Triangle-generated indices drawn as a line list: the
                // tutorial's wireframe-by-reinterpretation, kept on purpose.
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            bail!("failed to create render pipeline: {error}");
        }

        Ok(Self { pipeline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_shader_has_both_entry_points() {
        verify_entry_points(SHADER_SOURCE).expect("builtin shader must verify");
    }

    #[test]
    fn missing_fragment_entry_point_is_reported() {
        let source = r#"
            @vertex
            fn vertex_main() -> @builtin(position) vec4<f32> {
                return vec4<f32>(0.0, 0.0, 0.0, 1.0);
            }
        "#;
        let error = verify_entry_points(source).unwrap_err();
        assert!(error.to_string().contains("fragment_main"));
    }

    #[test]
    fn wrong_stage_does_not_satisfy_the_lookup() {
        // Both names exist, but vertex_main is compiled as a fragment stage.
        let source = r#"
            @fragment
            fn vertex_main() -> @location(0) vec4<f32> {
                return vec4<f32>(0.0, 0.0, 0.0, 1.0);
            }

            @fragment
            fn fragment_main() -> @location(0) vec4<f32> {
                return vec4<f32>(1.0, 0.0, 0.0, 1.0);
            }
        "#;
        let error = verify_entry_points(source).unwrap_err();
        assert!(error.to_string().contains("vertex_main"));
    }

    #[test]
    fn invalid_source_is_a_parse_error() {
        let error = verify_entry_points("not wgsl at all").unwrap_err();
        assert!(error.to_string().contains("failed to parse shader source"));
    }
}
