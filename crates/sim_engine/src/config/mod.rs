//! Configuration system
//!
//! Settings load from TOML or RON files through the [`Config`] trait and
//! fall back to defaults when no file is present. Every numeric setting
//! is validated once at simulation construction, not per tick.

use crate::foundation::math::Vec3;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Load configuration from file, falling back to defaults
    fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("could not load '{path}' ({err}), using defaults");
                Self::default()
            }
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A setting failed validation
    #[error("invalid value: {0}")]
    Invalid(String),
}

/// Viewport dimensions in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewportConfig {
    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Camera placement and projection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: Vec3,
    /// Look-at point in world space
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Distance to the near clipping plane
    pub near: f32,
    /// Distance to the far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 3.0),
            target: Vec3::zeros(),
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Settings for the keyboard-driven debug motion triggers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOpsConfig {
    /// Heading assigned to selected entities by the nudge trigger
    pub nudge_heading: Vec3,
    /// Destination target of the move trigger
    pub move_target: Vec3,
    /// Arrival threshold of the move trigger
    pub move_threshold: f32,
    /// Whether the move trigger snaps onto the target on arrival
    pub move_snap: bool,
    /// Travel time in seconds; speed is distance over this duration
    pub move_duration: f32,
}

impl Default for DebugOpsConfig {
    fn default() -> Self {
        Self {
            nudge_heading: Vec3::new(1.0, 0.0, 0.0),
            move_target: Vec3::new(4.0, 0.0, 4.0),
            move_threshold: 0.1,
            move_snap: true,
            move_duration: 2.0,
        }
    }
}

/// Top-level simulation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Viewport dimensions
    pub viewport: ViewportConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Debug motion triggers
    pub ops: DebugOpsConfig,
}

impl Config for SimConfig {}

impl SimConfig {
    /// Check every setting the simulation depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if self.camera.near <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera near plane must be positive, got {}",
                self.camera.near
            )));
        }
        if self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid(format!(
                "camera far plane must exceed near, got near {} far {}",
                self.camera.near, self.camera.far
            )));
        }
        if self.camera.fov_degrees <= 0.0 || self.camera.fov_degrees >= 180.0 {
            return Err(ConfigError::Invalid(format!(
                "camera fov must be in (0, 180) degrees, got {}",
                self.camera.fov_degrees
            )));
        }
        if self.ops.move_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "move threshold must be non-negative, got {}",
                self.ops.move_threshold
            )));
        }
        if self.ops.move_duration <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "move duration must be positive, got {}",
                self.ops.move_duration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut config = SimConfig::default();
        config.viewport.width = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.camera.far = config.camera.near;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.ops.move_duration = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = SimConfig::default();
        config.viewport.width = 800.0;
        config.ops.move_target = Vec3::new(1.0, 2.0, 3.0);

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SimConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.viewport.width, 800.0);
        assert_eq!(parsed.ops.move_target, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(parsed.camera.fov_degrees, 45.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: SimConfig = toml::from_str("[viewport]\nwidth = 640.0\n").unwrap();
        assert_eq!(parsed.viewport.width, 640.0);
        assert_eq!(parsed.viewport.height, 720.0);
        assert_eq!(parsed.ops.move_duration, 2.0);
    }
}
