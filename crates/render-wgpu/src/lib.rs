//! wgpu render backend for the hello triangle.
//!
//! Uploads the quad into a vertex buffer (plus an index buffer in indexed
//! mode), builds the shader pipeline, and draws one frame per call.
//!
//! # Invariants
//! - Shader and pipeline failures are logged; the frame is still cleared.
//! - Wireframe falls back to fill when the device lacks line polygon mode.

mod gpu;
mod shaders;

pub use gpu::{WgpuRenderer, effective_polygon_mode, wireframe_features};
