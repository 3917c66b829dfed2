use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;

/// Initial yaw in degrees. -90 faces down the -Z axis.
pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
/// World units per second.
pub const DEFAULT_SPEED: f32 = 2.5;
/// Degrees per unit of mouse offset.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch is kept strictly inside +-90 degrees so `front` never lines up with world up.
pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// Movement directions, abstracted away from any keyboard API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

impl CameraMovement {
    /// All directions, in the order held keys are applied each frame.
    pub const ALL: [CameraMovement; 4] = [
        CameraMovement::Forward,
        CameraMovement::Backward,
        CameraMovement::Left,
        CameraMovement::Right,
    ];
}

/// Euler-angle fly camera.
///
/// Yaw and pitch are in degrees. The derived basis (`front`, `right`, `up`)
/// is recomputed every time the angles change, so it can always be read
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y)
    }
}

impl Camera {
    /// Camera at `position` with the default yaw and pitch.
    pub fn new(position: Vec3, world_up: Vec3) -> Self {
        Self::with_orientation(position, world_up, DEFAULT_YAW, DEFAULT_PITCH)
    }

    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::ZERO,
            right: Vec3::ZERO,
            world_up,
            yaw,
            pitch,
            zoom: DEFAULT_ZOOM,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
        };
        camera.update_vectors();
        camera
    }

    /// Scalar form of [`Camera::with_orientation`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_scalars(
        pos_x: f32,
        pos_y: f32,
        pos_z: f32,
        up_x: f32,
        up_y: f32,
        up_z: f32,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        Self::with_orientation(
            Vec3::new(pos_x, pos_y, pos_z),
            Vec3::new(up_x, up_y, up_z),
            yaw,
            pitch,
        )
    }

    /// Build a camera from loaded settings. Zoom is clamped into range.
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera =
            Self::with_orientation(config.position, config.world_up, config.yaw, config.pitch);
        camera.movement_speed = config.movement_speed;
        camera.mouse_sensitivity = config.mouse_sensitivity;
        camera.set_zoom(config.zoom);
        tracing::debug!(
            "camera at ({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} zoom={:.1}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.yaw,
            camera.pitch,
            camera.zoom
        );
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Replace yaw and pitch and recompute the basis. Pitch is not clamped.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_vectors();
    }

    /// Look-at matrix from the position towards `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection using the zoom as vertical field of view.
    ///
    /// Depth maps to [0, 1], the range wgpu expects.
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, near, far)
    }

    pub fn view_projection(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        self.projection_matrix(aspect, near, far) * self.view_matrix()
    }

    /// Translate along `front` or `right` by `movement_speed * delta_time`.
    pub fn process_movement(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Apply mouse offsets to yaw and pitch.
    ///
    /// With `constrain_pitch` the pitch is clamped to +-[`PITCH_LIMIT`] so the
    /// view does not flip over the poles.
    pub fn process_look(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Scroll narrows (positive offset) or widens the field of view.
    pub fn process_zoom(&mut self, y_offset: f32) {
        self.set_zoom(self.zoom - y_offset);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        // Normalized so strafing speed does not shrink as pitch approaches the poles.
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    /// Look-at built by hand, column by column.
    fn reference_look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
        let f = (center - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);
        Mat4::from_cols_array(&[
            s.x,
            u.x,
            -f.x,
            0.0,
            s.y,
            u.y,
            -f.y,
            0.0,
            s.z,
            u.z,
            -f.z,
            0.0,
            -s.dot(eye),
            -u.dot(eye),
            f.dot(eye),
            1.0,
        ])
    }

    fn assert_orthonormal(cam: &Camera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
        // right-handed: right x up == -front
        assert!(approx_vec(r.cross(u), -f));
    }

    #[test]
    fn default_faces_negative_z() {
        let cam = Camera::default();
        assert!(approx_vec(cam.front(), Vec3::NEG_Z));
        assert!(approx_vec(cam.right(), Vec3::X));
        assert!(approx_vec(cam.up(), Vec3::Y));
        assert_eq!(cam.yaw(), DEFAULT_YAW);
        assert_eq!(cam.pitch(), DEFAULT_PITCH);
        assert_eq!(cam.zoom(), DEFAULT_ZOOM);
        assert_eq!(cam.movement_speed, DEFAULT_SPEED);
        assert_eq!(cam.mouse_sensitivity, DEFAULT_SENSITIVITY);
    }

    #[test]
    fn scalar_constructor_matches_vector_constructor() {
        let a = Camera::from_scalars(1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 30.0, 10.0);
        let b = Camera::with_orientation(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 30.0, 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn basis_is_orthonormal_across_angles() {
        let mut yaw = -720.0;
        while yaw <= 720.0 {
            let mut pitch = -89.0;
            while pitch <= 89.0 {
                let cam = Camera::with_orientation(Vec3::ZERO, Vec3::Y, yaw, pitch);
                assert_orthonormal(&cam);
                pitch += 8.9;
            }
            yaw += 37.5;
        }
    }

    #[test]
    fn basis_is_orthonormal_with_tilted_world_up() {
        let up = Vec3::new(0.2, 1.0, 0.1).normalize();
        let cam = Camera::with_orientation(Vec3::ONE, up, 15.0, -40.0);
        assert_orthonormal(&cam);
    }

    #[test]
    fn constrained_look_clamps_pitch() {
        let mut cam = Camera::default();
        cam.process_look(0.0, 1.0e6, true);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        cam.process_look(0.0, -5.0e6, true);
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
        assert_orthonormal(&cam);
    }

    #[test]
    fn unconstrained_look_leaves_pitch_alone() {
        let mut cam = Camera::default();
        cam.process_look(0.0, 1000.0, false);
        assert!((cam.pitch() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn look_scales_by_sensitivity() {
        let mut cam = Camera::default();
        cam.mouse_sensitivity = 0.5;
        cam.process_look(20.0, -10.0, true);
        assert!((cam.yaw() - (DEFAULT_YAW + 10.0)).abs() < EPS);
        assert!((cam.pitch() + 5.0).abs() < EPS);
    }

    #[test]
    fn look_recomputes_front() {
        let mut cam = Camera::default();
        // 900 * 0.1 = 90 degrees of yaw: -90 -> 0, facing +X
        cam.process_look(900.0, 0.0, true);
        assert!(approx_vec(cam.front(), Vec3::X));
        assert!(approx_vec(cam.right(), Vec3::Z));
    }

    #[test]
    fn zoom_stays_in_range() {
        let mut cam = Camera::default();
        cam.process_zoom(10.0);
        assert_eq!(cam.zoom(), 35.0);
        cam.process_zoom(1000.0);
        assert_eq!(cam.zoom(), MIN_ZOOM);
        cam.process_zoom(-1000.0);
        assert_eq!(cam.zoom(), MAX_ZOOM);
        for step in [-3.5, 7.25, 0.0, 60.0, -0.5] {
            cam.process_zoom(step);
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&cam.zoom()));
        }
    }

    #[test]
    fn zoom_does_not_move_camera() {
        let mut cam = Camera::with_orientation(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 10.0, 20.0);
        let before = cam.clone();
        cam.process_zoom(5.0);
        assert_eq!(cam.position(), before.position());
        assert_eq!(cam.front(), before.front());
        assert_eq!(cam.view_matrix(), before.view_matrix());
    }

    #[test]
    fn forward_then_backward_round_trips() {
        let mut cam = Camera::with_orientation(Vec3::new(4.0, -1.0, 2.0), Vec3::Y, 33.0, 12.0);
        let start = cam.position();
        cam.process_movement(CameraMovement::Forward, 0.016);
        assert!(!approx_vec(cam.position(), start));
        cam.process_movement(CameraMovement::Backward, 0.016);
        assert!(approx_vec(cam.position(), start));
    }

    #[test]
    fn movement_follows_basis() {
        let mut cam = Camera::default();
        cam.process_movement(CameraMovement::Forward, 2.0);
        assert!(approx_vec(cam.position(), Vec3::new(0.0, 0.0, -5.0)));
        cam.process_movement(CameraMovement::Right, 1.0);
        assert!(approx_vec(cam.position(), Vec3::new(2.5, 0.0, -5.0)));
        cam.process_movement(CameraMovement::Left, 2.0);
        assert!(approx_vec(cam.position(), Vec3::new(-2.5, 0.0, -5.0)));
    }

    #[test]
    fn strafe_speed_is_constant_near_poles() {
        let mut cam = Camera::with_orientation(Vec3::ZERO, Vec3::Y, 0.0, 88.0);
        cam.process_movement(CameraMovement::Right, 1.0);
        assert!((cam.position().length() - DEFAULT_SPEED).abs() < 1e-4);
    }

    #[test]
    fn view_matrix_matches_reference() {
        let configs = [
            (Vec3::ZERO, DEFAULT_YAW, DEFAULT_PITCH),
            (Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0),
            (Vec3::new(1.5, -2.0, 7.0), 45.0, 30.0),
            (Vec3::new(-10.0, 4.0, 0.25), 200.0, -60.0),
        ];
        for (pos, yaw, pitch) in configs {
            let cam = Camera::with_orientation(pos, Vec3::Y, yaw, pitch);
            let expected =
                reference_look_at(cam.position(), cam.position() + cam.front(), cam.up());
            assert!(
                cam.view_matrix().abs_diff_eq(expected, 1e-5),
                "mismatch at {pos} yaw={yaw} pitch={pitch}"
            );
        }
    }

    #[test]
    fn view_matrix_maps_position_to_origin() {
        let cam = Camera::with_orientation(Vec3::new(3.0, 1.0, -2.0), Vec3::Y, 10.0, 5.0);
        let eye = cam.view_matrix().transform_point3(cam.position());
        assert!(approx_vec(eye, Vec3::ZERO));
        let ahead = cam
            .view_matrix()
            .transform_point3(cam.position() + cam.front());
        assert!(approx_vec(ahead, Vec3::NEG_Z));
    }

    #[test]
    fn set_orientation_recomputes_basis() {
        let mut cam = Camera::default();
        cam.set_orientation(0.0, 0.0);
        assert!(approx_vec(cam.front(), Vec3::X));
        assert_orthonormal(&cam);
    }

    #[test]
    fn projection_uses_zoom() {
        let mut cam = Camera::default();
        let wide = cam.projection_matrix(1.0, 0.1, 100.0);
        cam.process_zoom(20.0);
        let narrow = cam.projection_matrix(1.0, 0.1, 100.0);
        // y scale is 1 / tan(fov / 2); narrower fov scales more
        assert!(narrow.y_axis.y > wide.y_axis.y);
        let vp = cam.view_projection(1.0, 0.1, 100.0);
        assert_eq!(vp, narrow * cam.view_matrix());
    }
}
