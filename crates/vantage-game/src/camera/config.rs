//! Camera configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::CameraStateTable;
use crate::error::CameraConfigError;

/// Crosshair overlay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairConfig {
    /// Texture drawn by the renderer; the overlay is only produced when one is assigned
    pub texture: Option<String>,
    /// On-screen size in pixels
    pub size: f32,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            texture: None,
            size: 32.0,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Look sensitivity (degrees per pixel of look delta)
    pub sensitivity: f32,
    /// Minimum vertical look angle in degrees
    pub pitch_min: f32,
    /// Maximum vertical look angle in degrees
    pub pitch_max: f32,
    /// Pose catch-up rate per second
    pub blend_rate: f32,
    /// Seconds for the pivot blend to recover after a snap transition
    pub pivot_recovery_time: f32,
    /// Radius of the line-of-sight sphere cast
    pub obstacle_radius: f32,
    /// Catch-up rate per second of the obstacle correction
    pub obstacle_fix_rate: f32,
    /// Catch-up rate per second of the scope head height
    pub scope_height_rate: f32,
    /// FOV blend multiplier while scoped and on the scope exit frame
    pub scope_fov_multiplier: f32,
    /// Reach of the scope parallax ray
    pub scope_ray_distance: f32,
    /// Distance of the ideal aim point in front of the camera
    pub aim_distance: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Crosshair overlay
    pub crosshair: CrosshairConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.15,
            pitch_min: -45.0,
            pitch_max: 70.0,
            blend_rate: 6.0,
            pivot_recovery_time: 0.2,
            obstacle_radius: 0.1,
            obstacle_fix_rate: 30.0,
            scope_height_rate: 6.0,
            scope_fov_multiplier: 3.0,
            scope_ray_distance: 100.0,
            aim_distance: 50.0,
            near: 0.05,
            far: 1000.0,
            crosshair: CrosshairConfig::default(),
        }
    }
}

impl CameraConfig {
    /// Check ranges and rates
    pub fn validate(&self) -> Result<(), CameraConfigError> {
        if self.pitch_min > self.pitch_max {
            return Err(CameraConfigError::InvertedPitchRange {
                min: self.pitch_min,
                max: self.pitch_max,
            });
        }
        let positive = [
            ("blend_rate", self.blend_rate),
            ("pivot_recovery_time", self.pivot_recovery_time),
            ("obstacle_radius", self.obstacle_radius),
            ("obstacle_fix_rate", self.obstacle_fix_rate),
            ("scope_height_rate", self.scope_height_rate),
            ("scope_fov_multiplier", self.scope_fov_multiplier),
            ("scope_ray_distance", self.scope_ray_distance),
            ("aim_distance", self.aim_distance),
            ("near", self.near),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(CameraConfigError::NonPositive { name, value });
            }
        }
        if !(self.far > self.near) {
            return Err(CameraConfigError::NonPositive {
                name: "far - near",
                value: self.far - self.near,
            });
        }
        Ok(())
    }

    /// Clamp a vertical look angle into the configured range
    pub fn clamp_pitch(&self, degrees: f32) -> f32 {
        if degrees.is_nan() {
            return 0.0_f32.clamp(self.pitch_min, self.pitch_max);
        }
        degrees.clamp(self.pitch_min, self.pitch_max)
    }
}

/// A complete authored camera setup: tuning plus the state table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraProfile {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub states: CameraStateTable,
}

impl CameraProfile {
    /// Parse and validate a profile from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, CameraConfigError> {
        let profile: CameraProfile = toml::from_str(content)?;
        profile.camera.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile from a TOML file
    pub fn load(path: &Path) -> Result<Self, CameraConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| CameraConfigError::Io(path.to_path_buf(), e))?;
        let profile = Self::from_toml_str(&content)?;
        info!(
            "Loaded camera profile from {:?} ({} states)",
            path,
            profile.states.len()
        );
        Ok(profile)
    }

    /// Serialize the profile as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraStateId;

    #[test]
    fn test_default_config_is_valid() {
        let config = CameraConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pitch_min, -45.0);
        assert_eq!(config.pitch_max, 70.0);
    }

    #[test]
    fn test_pitch_clamping() {
        let config = CameraConfig::default();
        assert_eq!(config.clamp_pitch(-1000.0), -45.0);
        assert_eq!(config.clamp_pitch(0.0), 0.0);
        assert_eq!(config.clamp_pitch(1000.0), 70.0);
        assert_eq!(config.clamp_pitch(f32::NAN), 0.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = CameraConfig {
            pitch_min: 10.0,
            pitch_max: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CameraConfigError::InvertedPitchRange { .. })
        ));

        let config = CameraConfig {
            blend_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CameraConfigError::NonPositive { name: "blend_rate", .. })
        ));
    }

    #[test]
    fn test_profile_toml_round_trip() {
        let profile = CameraProfile::default();
        let text = profile.to_toml_string().unwrap();
        let parsed = CameraProfile::from_toml_str(&text).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn test_profile_partial_toml_uses_defaults() {
        let text = r#"
            [camera]
            blend_rate = 8.0

            [states.Default]
            pivot = [0.0, 1.5, 0.0]
            offset = [0.5, 0.0, 2.5]
            orientation = [0.0, 0.0, 0.0]
            fov = 65.0
        "#;
        let profile = CameraProfile::from_toml_str(text).unwrap();
        assert_eq!(profile.camera.blend_rate, 8.0);
        assert_eq!(profile.camera.pitch_max, 70.0);
        assert_eq!(profile.states.len(), 1);
        assert_eq!(profile.states.get(CameraStateId::Aim).fov, 65.0);
    }

    #[test]
    fn test_profile_without_default_state_is_rejected() {
        let text = r#"
            [states.Aim]
            pivot = [0.0, 1.5, 0.0]
            offset = [0.5, 0.0, 2.5]
            orientation = [0.0, 0.0, 0.0]
            fov = 50.0
        "#;
        let error = CameraProfile::from_toml_str(text).unwrap_err();
        assert!(error.to_string().contains("Default"));
    }

    #[test]
    fn test_profile_with_unknown_state_is_rejected() {
        let text = r#"
            [states.Sprint]
            pivot = [0.0, 1.5, 0.0]
            offset = [0.5, 0.0, 2.5]
            orientation = [0.0, 0.0, 0.0]
            fov = 50.0
        "#;
        assert!(CameraProfile::from_toml_str(text).is_err());
    }
}
