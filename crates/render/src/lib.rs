//! Rendering Adapter: renderer-agnostic description of the hello triangle.
//!
//! # Invariants
//! - Renderers read a [`TriangleScene`]; they never own camera or input state.
//! - Shader failures are reported and rendering continues.
//!
//! The wgpu backend draws a [`TriangleScene`] on the GPU;
//! [`DebugTextRenderer`] implements [`Renderer`] by describing the same frame
//! as text for headless use.

pub mod geometry;
mod renderer;
pub mod shader;

pub use geometry::{BufferMode, QUAD_INDICES, QUAD_VERTICES};
pub use renderer::{ClearColor, DebugTextRenderer, PolygonMode, Renderer, TriangleScene};
pub use shader::{ShaderError, ShaderStage, check_and_log};

pub fn crate_info() -> &'static str {
    concat!("learngl-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
