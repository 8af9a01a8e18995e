//! Vantage Game - Third-person camera driven by character state
//!
//! Provides the tracked character view, the camera state classifier, pose smoothing,
//! obstacle avoidance, scope mode, and the crosshair overlay.

pub mod camera;
pub mod character;
pub mod error;

pub use camera::{
    classify, CameraConfig, CameraController, CameraFrame, CameraInput, CameraProfile,
    CameraRuntimeState, CameraState, CameraStateId, CameraStateTable, Classification,
    CrosshairConfig, CrosshairOverlay, FadeTarget,
};
pub use character::{CharacterFlags, CharacterSnapshot, CoverKind, TrackedCharacterView, WeaponView};
pub use error::CameraConfigError;
