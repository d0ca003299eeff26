//! Hard-coded parameters for the one-shot run. Everything is a literal; there
//! are no CLI flags and no configuration file.

/// Box the cone fills, in model units.
pub const CONE_EXTENT: [f32; 3] = [1.0, 1.0, 1.0];

/// Radial and vertical subdivision counts.
pub const CONE_SEGMENTS: [u32; 2] = [10, 10];

/// Whether the base disc is generated.
pub const CONE_CAP: bool = true;

/// Normals face outward.
pub const INWARD_NORMALS: bool = false;

/// Window size in physical pixels.
pub const SURFACE_SIZE: (u32, u32) = (600, 600);

/// Pale-yellow clear color behind the red wireframe.
pub const CLEAR_COLOR: [f64; 4] = [1.0, 1.0, 0.8, 1.0];

pub const WINDOW_TITLE: &str = "wirecone";

/// Base name of the exported asset; the extension below is appended.
pub const EXPORT_BASE_NAME: &str = "primitive";

pub const EXPORT_EXTENSION: &str = "obj";
