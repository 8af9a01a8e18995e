//! Demo settings with persistence
//!
//! Settings are read from `~/.config/vantage/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vantage_game::CameraProfile;

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub video: VideoSettings,
    pub simulation: SimulationSettings,
    /// Camera profile to load instead of the built-in one
    pub camera_profile: Option<PathBuf>,
}

impl DemoSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vantage"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    Self::sanitized(settings)
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Replace a simulation section that would stall the frame loop with defaults
    fn sanitized(mut settings: Self) -> Self {
        if !settings.simulation.is_valid() {
            warn!(
                "Invalid simulation settings (tick_rate {}, time_scale {}), using defaults",
                settings.simulation.tick_rate, settings.simulation.time_scale
            );
            settings.simulation = SimulationSettings::default();
        }
        settings
    }

    /// Camera profile named by the settings, falling back to the built-in one
    pub fn camera_profile(&self) -> CameraProfile {
        let Some(path) = &self.camera_profile else {
            return CameraProfile::default();
        };
        match CameraProfile::load(path) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Failed to load camera profile: {}, using defaults", e);
                CameraProfile::default()
            }
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl VideoSettings {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Fixed-step simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Frames per simulated second
    pub tick_rate: u32,
    /// Time scale multiplier
    pub time_scale: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            time_scale: 1.0,
        }
    }
}

impl SimulationSettings {
    /// Both the tick rate and the time scale must be positive
    pub fn is_valid(&self) -> bool {
        self.tick_rate > 0 && self.time_scale.is_finite() && self.time_scale > 0.0
    }

    /// Seconds advanced per frame
    pub fn frame_delta(&self) -> f32 {
        self.time_scale / self.tick_rate.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: DemoSettings = toml::from_str("[video]\nwidth = 1280\n").unwrap();
        assert_eq!(settings.video.width, 1280);
        assert_eq!(settings.video.height, 1080);
        assert_eq!(settings.simulation.tick_rate, 60);
        assert!(settings.camera_profile.is_none());
    }

    #[test]
    fn test_frame_delta() {
        let simulation = SimulationSettings {
            tick_rate: 50,
            time_scale: 0.5,
        };
        assert!((simulation.frame_delta() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_stalled_simulation_falls_back_to_defaults() {
        for (tick_rate, time_scale) in [(60, 0.0), (60, -1.0), (0, 1.0), (60, f32::NAN)] {
            let settings = DemoSettings {
                simulation: SimulationSettings {
                    tick_rate,
                    time_scale,
                },
                ..Default::default()
            };
            let settings = DemoSettings::sanitized(settings);
            assert_eq!(settings.simulation.tick_rate, 60);
            assert_eq!(settings.simulation.time_scale, 1.0);
            assert!(settings.simulation.frame_delta() > 0.0);
        }
    }

    #[test]
    fn test_valid_simulation_is_kept() {
        let settings: DemoSettings =
            toml::from_str("[simulation]\ntick_rate = 30\ntime_scale = 0.5\n").unwrap();
        let settings = DemoSettings::sanitized(settings);
        assert_eq!(settings.simulation.tick_rate, 30);
        assert_eq!(settings.simulation.time_scale, 0.5);
    }

    #[test]
    fn test_missing_profile_falls_back() {
        let settings = DemoSettings {
            camera_profile: Some(PathBuf::from("/nonexistent/vantage/camera.toml")),
            ..Default::default()
        };
        assert_eq!(settings.camera_profile(), CameraProfile::default());
    }
}
