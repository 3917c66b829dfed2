use std::collections::HashSet;

use learngl_camera::{Camera, CameraMovement};

/// Movement keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<CameraMovement>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, direction: CameraMovement, pressed: bool) {
        tracing::trace!("{direction:?} held={pressed}");
        if pressed {
            self.held.insert(direction);
        } else {
            self.held.remove(&direction);
        }
    }

    pub fn is_held(&self, direction: CameraMovement) -> bool {
        self.held.contains(&direction)
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Move the camera once for every held direction.
    pub fn update(&self, camera: &mut Camera, dt: f32) {
        for direction in CameraMovement::ALL {
            if self.is_held(direction) {
                camera.process_movement(direction, dt);
            }
        }
    }
}
