//! Free-fly camera helper.
//!
//! Converts abstract input (movement direction + frame time, mouse deltas,
//! scroll deltas) into an updated viewpoint and a view matrix. It knows
//! nothing about windows or input devices.
//!
//! # Invariants
//! - `front`, `right` and `up` form a right-handed orthonormal basis that
//!   matches the current yaw, pitch and world up.
//! - Yaw and pitch only change through methods that recompute that basis.
//! - Zoom stays within [`MIN_ZOOM`, `MAX_ZOOM`].

pub mod camera;
pub mod config;

pub use camera::{
    Camera, CameraMovement, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW,
    DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, PITCH_LIMIT,
};
pub use config::{CameraConfig, ConfigError};
