use std::fmt::Write;

use glam::Mat4;

use crate::geometry::{BufferMode, QUAD_INDICES, QUAD_VERTICES};

/// Rasterization mode for the triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonMode {
    #[default]
    Fill,
    /// Wireframe: only triangle edges are drawn.
    Line,
}

impl PolygonMode {
    pub fn toggled(self) -> Self {
        match self {
            PolygonMode::Fill => PolygonMode::Line,
            PolygonMode::Line => PolygonMode::Fill,
        }
    }
}

/// RGBA clear colour, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for ClearColor {
    fn default() -> Self {
        Self {
            r: 0.2,
            g: 0.3,
            b: 0.3,
            a: 1.0,
        }
    }
}

/// Everything a renderer needs to draw one frame of the hello triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleScene {
    pub buffer_mode: BufferMode,
    pub polygon_mode: PolygonMode,
    pub clear_color: ClearColor,
    /// Applied to every vertex. Identity draws in normalized device coordinates.
    pub transform: Mat4,
}

impl TriangleScene {
    pub fn new(buffer_mode: BufferMode, polygon_mode: PolygonMode) -> Self {
        Self {
            buffer_mode,
            polygon_mode,
            clear_color: ClearColor::default(),
            transform: Mat4::IDENTITY,
        }
    }
}

impl Default for TriangleScene {
    fn default() -> Self {
        Self::new(BufferMode::default(), PolygonMode::default())
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene.
    fn render(&self, scene: &TriangleScene) -> Self::Output;
}

/// Describes the frame a GPU renderer would draw.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &TriangleScene) -> String {
        let mode = scene.buffer_mode;
        let c = scene.clear_color;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame (buffer={}, polygon={:?}) ===",
            mode.label(),
            scene.polygon_mode
        );
        let _ = writeln!(
            out,
            "Clear: ({:.2}, {:.2}, {:.2}, {:.2})",
            c.r, c.g, c.b, c.a
        );

        let projected: Vec<_> = QUAD_VERTICES
            .iter()
            .map(|&v| scene.transform.project_point3(v.into()))
            .collect();
        for (i, p) in projected.iter().enumerate() {
            let _ = writeln!(out, "  v{i} = ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
        }

        if mode.uses_index_buffer() {
            let _ = writeln!(
                out,
                "draw_indexed count={} indices={:?}",
                mode.draw_count(),
                QUAD_INDICES
            );
        } else {
            let _ = writeln!(out, "draw count={}", mode.draw_count());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn default_scene() {
        let scene = TriangleScene::default();
        assert_eq!(scene.buffer_mode, BufferMode::Vertex);
        assert_eq!(scene.polygon_mode, PolygonMode::Fill);
        assert_eq!(scene.transform, Mat4::IDENTITY);
        assert_eq!(scene.clear_color, ClearColor { r: 0.2, g: 0.3, b: 0.3, a: 1.0 });
    }

    #[test]
    fn polygon_mode_toggles() {
        assert_eq!(PolygonMode::Fill.toggled(), PolygonMode::Line);
        assert_eq!(PolygonMode::Line.toggled().toggled(), PolygonMode::Line);
    }

    #[test]
    fn debug_renderer_vertex_mode() {
        let output = DebugTextRenderer::new().render(&TriangleScene::default());
        assert!(output.contains("buffer=vertex"));
        assert!(output.contains("draw count=3"));
        assert!(output.contains("v0 = (0.500, 0.500, 0.000)"));
    }

    #[test]
    fn debug_renderer_indexed_line_mode() {
        let scene = TriangleScene::new(BufferMode::Indexed, PolygonMode::Line);
        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("polygon=Line"));
        assert!(output.contains("draw_indexed count=6"));
    }

    #[test]
    fn debug_renderer_applies_transform() {
        let scene = TriangleScene {
            transform: Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
            ..TriangleScene::default()
        };
        let output = DebugTextRenderer::new().render(&scene);
        assert!(output.contains("v0 = (1.500, 0.500, 0.000)"));
    }
}
