use glam::Vec2;

/// Turns absolute cursor positions into look offsets.
///
/// The first sample only records the position, so the camera does not jump
/// when the cursor first enters the window.
#[derive(Debug, Clone, Default)]
pub struct CursorTracker {
    last: Option<Vec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor position and return `(dx, dy)` since the previous one.
    ///
    /// `dy` is flipped because window y grows downward.
    pub fn offset(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let current = Vec2::new(x, y);
        let offset = self
            .last
            .map(|last| (current.x - last.x, last.y - current.y));
        self.last = Some(current);
        offset
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
