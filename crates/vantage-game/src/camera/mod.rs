//! Camera system module
//!
//! Third-person shoulder camera whose pose is chosen by classifying the tracked character's
//! state each frame, then smoothed, kept clear of geometry, and optionally replaced by a
//! head-anchored scope view.

pub mod avoidance;
pub mod classifier;
mod config;
mod controller;
pub mod crosshair;
pub mod pose;
pub mod scope;
mod state;

pub use classifier::{classify, Classification};
pub use config::{CameraConfig, CameraProfile, CrosshairConfig};
pub use controller::{CameraController, CameraFrame, CameraInput, FadeTarget};
pub use crosshair::CrosshairOverlay;
pub use pose::CameraRuntimeState;
pub use state::{CameraState, CameraStateId, CameraStateTable};
