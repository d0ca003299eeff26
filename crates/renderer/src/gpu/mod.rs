//! GPU-facing half of the crate: device acquisition, mesh upload, pipeline
//! construction, and single-frame recording.

pub(crate) mod context;
pub(crate) mod frame;
pub(crate) mod mesh;
pub(crate) mod pipeline;
