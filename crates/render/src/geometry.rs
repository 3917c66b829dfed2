//! Vertex data for the hello triangle.

/// Quad corners in normalized device coordinates.
#[rustfmt::skip]
pub const QUAD_VERTICES: [[f32; 3]; 4] = [
    [ 0.5,  0.5, 0.0], // top right
    [ 0.5, -0.5, 0.0], // bottom right
    [-0.5, -0.5, 0.0], // bottom left
    [-0.5,  0.5, 0.0], // top left
];

/// Two triangles sharing the bottom-right/top-left diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// How vertices are fed to the draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferMode {
    /// Vertex buffer only: draws the first three vertices as one triangle.
    #[default]
    Vertex,
    /// Vertex + index buffer: draws the whole quad from six indices.
    Indexed,
}

impl BufferMode {
    pub fn uses_index_buffer(self) -> bool {
        matches!(self, BufferMode::Indexed)
    }

    /// Number of vertices (or indices) submitted per frame.
    pub fn draw_count(self) -> u32 {
        match self {
            BufferMode::Vertex => 3,
            BufferMode::Indexed => QUAD_INDICES.len() as u32,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BufferMode::Vertex => "vertex",
            BufferMode::Indexed => "indexed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_in_bounds() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn quad_lies_in_z_plane() {
        assert!(QUAD_VERTICES.iter().all(|v| v[2] == 0.0));
    }

    #[test]
    fn draw_counts() {
        assert_eq!(BufferMode::Vertex.draw_count(), 3);
        assert_eq!(BufferMode::Indexed.draw_count(), 6);
        assert!(!BufferMode::Vertex.uses_index_buffer());
        assert!(BufferMode::Indexed.uses_index_buffer());
    }

    #[test]
    fn index_triangles_share_diagonal() {
        let (a, b) = QUAD_INDICES.split_at(3);
        let shared: Vec<_> = a.iter().filter(|i| b.contains(i)).collect();
        assert_eq!(shared, vec![&1, &3]);
    }
}
