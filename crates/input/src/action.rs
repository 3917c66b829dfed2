use learngl_camera::{Camera, CameraMovement};

/// A high-level action produced from raw window input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Start moving in a direction (applied per frame while held).
    Move(CameraMovement),
    /// Mouse look by a cursor offset. Positive `dy` looks up.
    Look { dx: f32, dy: f32 },
    /// Scroll wheel offset. Positive zooms in.
    Zoom(f32),
    /// Switch between filled and wireframe polygons.
    ToggleWireframe,
    /// Close the program.
    Quit,
    /// Input that has no binding.
    Noop,
}

/// Apply a look or zoom action to the camera.
///
/// Returns `true` when the camera consumed the action. Movement needs the
/// frame time, so it goes through [`crate::InputState`] instead.
pub fn apply_action(camera: &mut Camera, action: &Action) -> bool {
    match *action {
        Action::Look { dx, dy } => {
            camera.process_look(dx, dy, true);
            true
        }
        Action::Zoom(offset) => {
            camera.process_zoom(offset);
            true
        }
        Action::Move(_) | Action::ToggleWireframe | Action::Quit | Action::Noop => false,
    }
}
