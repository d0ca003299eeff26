//! Drives the one-shot sequence: shared-path discovery, cone generation,
//! and the viewer launch that renders one frame and exports the mesh.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use meshkit::export::Asset;
use meshkit::mesh::{GeometryKind, Mesh};
use renderer::{Viewer, ViewerConfig};

use crate::defaults;
use crate::paths::SharedPaths;

pub fn initialise_tracing() {
    let default_filter =
        "warn,wirecone=info,renderer=info,meshkit=info,naga=error,wgpu=error,wgpu_core=error,wgpu_hal=error,winit=error";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run() -> Result<()> {
    let paths = SharedPaths::discover()?;

    // The export format is fixed; check it up-front so an unsupported
    // extension fails before any GPU work happens.
    if !Asset::can_export_extension(defaults::EXPORT_EXTENSION) {
        anyhow::bail!(
            "cannot export a .{} file: unsupported extension",
            defaults::EXPORT_EXTENSION
        );
    }
    let export_path = paths.export_file(defaults::EXPORT_BASE_NAME, defaults::EXPORT_EXTENSION);
    tracing::debug!(
        data = %paths.data_dir().display(),
        export = %export_path.display(),
        "resolved shared paths"
    );

    let mesh = Mesh::cone(
        defaults::CONE_EXTENT,
        defaults::CONE_SEGMENTS,
        defaults::INWARD_NORMALS,
        defaults::CONE_CAP,
        GeometryKind::Triangles,
    )?;
    tracing::info!(
        vertices = mesh.vertex_count(),
        submeshes = mesh.submeshes().len(),
        "generated cone mesh"
    );

    let viewer = Viewer::new(ViewerConfig {
        surface_size: defaults::SURFACE_SIZE,
        clear_color: defaults::CLEAR_COLOR,
        window_title: defaults::WINDOW_TITLE.to_string(),
        export_path,
    });
    viewer.run(mesh)
}
