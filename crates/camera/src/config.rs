use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{
    DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW, DEFAULT_ZOOM,
};

/// Errors from loading camera settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Camera settings as stored on disk. Missing fields take the defaults.
///
/// ```yaml
/// position: [0.0, 0.0, 3.0]
/// movement_speed: 5.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl CameraConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!("loaded camera config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Camera;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CameraConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, CameraConfig::default());
        assert_eq!(Camera::from_config(&config), Camera::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config =
            CameraConfig::from_yaml_str("position: [0.0, 0.0, 3.0]\nmovement_speed: 5.0\n")
                .unwrap();
        assert_eq!(config.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(config.movement_speed, 5.0);
        assert_eq!(config.yaw, DEFAULT_YAW);
        assert_eq!(config.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn camera_clamps_configured_zoom() {
        let config = CameraConfig {
            zoom: 90.0,
            ..CameraConfig::default()
        };
        assert_eq!(Camera::from_config(&config).zoom(), 45.0);
    }

    #[test]
    fn camera_takes_tuning_from_config() {
        let config = CameraConfig {
            movement_speed: 7.0,
            mouse_sensitivity: 0.25,
            yaw: 0.0,
            ..CameraConfig::default()
        };
        let cam = Camera::from_config(&config);
        assert_eq!(cam.movement_speed, 7.0);
        assert_eq!(cam.mouse_sensitivity, 0.25);
        assert!((cam.front() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "yaw: -45.0\npitch: 10.0\nzoom: 30.0").unwrap();
        let config = CameraConfig::load(file.path()).unwrap();
        assert_eq!(config.yaw, -45.0);
        assert_eq!(config.pitch, 10.0);
        assert_eq!(config.zoom, 30.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CameraConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_document_is_yaml_error() {
        let err = CameraConfig::from_yaml_str("yaw: [not, a, number]").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
