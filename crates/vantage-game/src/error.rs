use std::path::PathBuf;

/// Errors that can occur while loading or validating camera configuration.
#[derive(Debug, thiserror::Error)]
pub enum CameraConfigError {
    #[error("camera state table has no 'Default' entry")]
    MissingDefaultState,

    #[error("unknown camera state '{0}'")]
    UnknownState(String),

    #[error("camera state '{state}' has invalid field of view {fov}")]
    InvalidFov { state: String, fov: f32 },

    #[error("pitch range is inverted: min {min} > max {max}")]
    InvertedPitchRange { min: f32, max: f32 },

    #[error("'{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("failed to parse camera profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error reading camera profile '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),
}
