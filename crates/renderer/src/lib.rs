//! Renderer crate for wirecone.
//!
//! Glues the preview window, the `wgpu` pipeline, and the interchange mesh
//! from `meshkit` together. The overall flow is strictly linear:
//!
//! ```text
//!   wirecone binary
//!          │ ViewerConfig + Mesh
//!          ▼
//!   Viewer::run ──▶ GpuContext ──▶ GpuMesh ──▶ ShaderPipeline
//!          │                                        │
//!          │                                        ▼
//!          │                              render_frame() (one draw)
//!          │                                        │
//!          │                              Asset::export (OBJ)
//!          ▼
//!   winit event loop (window stays up as the live preview)
//! ```
//!
//! Every setup stage returns a `Result`; the binary's `main` is the only
//! place that decides to abort, so any failure halts the run with the full
//! error chain instead of a bare process exit.

mod gpu;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use meshkit::export::Asset;
use meshkit::mesh::Mesh;

use gpu::context::GpuContext;
use gpu::frame::render_frame;
use gpu::mesh::GpuMesh;
use gpu::pipeline::ShaderPipeline;

/// Immutable configuration handed to the viewer at start-up. All values come
/// from the binary's defaults module; there is no runtime configurability.
#[derive(Clone)]
pub struct ViewerConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// RGBA clear color behind the wireframe.
    pub clear_color: [f64; 4],
    pub window_title: String,
    /// Destination the interchange mesh is exported to after the first frame.
    pub export_path: PathBuf,
}

/// One-shot viewer: runs the setup sequence once, then parks in the event
/// loop with the rendered frame on screen.
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Runs the linear sequence — device, upload, pipeline, one frame, export
    /// — and then keeps the window alive as the live preview surface until it
    /// is closed.
    pub fn run(&self, mesh: Mesh) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to initialize event loop")?;
        let window_size = PhysicalSize::new(self.config.surface_size.0, self.config.surface_size.1);
        let window = WindowBuilder::new()
            .with_title(&self.config.window_title)
            .with_inner_size(window_size)
            .build(&event_loop)
            .context("failed to create preview window")?;
        let window = Arc::new(window);

        let mut state = ViewState::new(window, &self.config, &mesh)?;

        // The one mandated frame, then the export, before the window takes
        // over. A failure in either is fatal to the whole run.
        state.render_frame()?;
        export_mesh(&mesh, &self.config.export_path)?;

        event_loop
            .run(move |event, elwt| {
                elwt.set_control_flow(ControlFlow::Wait);

                if let Event::WindowEvent { window_id, event } = event {
                    if window_id != state.window().id() {
                        return;
                    }
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            elwt.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(new_size);
                        }
                        WindowEvent::RedrawRequested => {
                            // Re-present the same single-draw frame whenever
                            // the platform invalidates the window contents.
                            if let Err(err) = state.render_frame() {
                                tracing::warn!(error = %err, "failed to re-present frame");
                                state.resize(state.size());
                            }
                        }
                        _ => {}
                    }
                }
            })
            .map_err(|err| anyhow!("event loop error: {err}"))
    }
}

/// Aggregates every GPU resource needed to present the frame: surface, device
/// and queue, the device-resident mesh, and the compiled pipeline state.
struct ViewState {
    window: Arc<Window>,
    gpu: GpuContext,
    mesh: GpuMesh,
    pipeline: ShaderPipeline,
    clear_color: wgpu::Color,
}

impl ViewState {
    fn new(window: Arc<Window>, config: &ViewerConfig, mesh: &Mesh) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuContext::new(window.as_ref(), size)?;
        let gpu_mesh = GpuMesh::new(&gpu.device, mesh)
            .context("failed to convert interchange mesh for the device")?;
        let pipeline = ShaderPipeline::new(&gpu.device, gpu.surface_format, &gpu_mesh)?;

        let [r, g, b, a] = config.clear_color;
        Ok(Self {
            window,
            gpu,
            mesh: gpu_mesh,
            pipeline,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    fn window(&self) -> &Window {
        self.window.as_ref()
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    fn render_frame(&mut self) -> Result<()> {
        render_frame(&self.gpu, &self.pipeline, &self.mesh, self.clear_color)
    }
}

/// Wraps the interchange mesh in an export container and writes it out.
fn export_mesh(mesh: &Mesh, path: &Path) -> Result<()> {
    let mut asset = Asset::new();
    asset.add(mesh.clone());
    asset
        .export(path)
        .with_context(|| format!("failed to export mesh to {}", path.display()))?;
    Ok(())
}
