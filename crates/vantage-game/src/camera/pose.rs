//! Pose interpolation
//!
//! Blends the runtime pivot, offset, orientation, and FOV toward the active state's
//! setpoints each frame.

use glam::{Quat, Vec3};
use vantage_core::smoothing::{approach, approach_vec3, lerp_rate};

use super::{CameraConfig, CameraState, CameraStateId};

/// Smallest field of view a zoom offset can produce
pub const MIN_FOV: f32 = 1.0;

/// Mutable camera state owned by one controller
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRuntimeState {
    pub pivot: Vec3,
    pub offset: Vec3,
    /// (pitch, yaw, roll) in degrees
    pub orientation: Vec3,
    pub fov: f32,
    pub crosshair_alpha: f32,
    pub alpha_target: f32,
    /// Smoothed obstacle correction, pulling the camera toward the character
    pub obstacle_fix: f32,
    /// Distance from the camera to the top of the character last frame
    pub target_distance: f32,
    pub scoped: bool,
    /// Parallax correction captured on scope entry
    pub scope_offset: Quat,
    /// Scope camera height above the character pivot
    pub scope_height: f32,
    /// Multiplier on the pivot blend, 0 right after a snap transition
    pub pivot_speed: f32,
    pub was_in_cover: bool,
    pub was_corner: bool,
    pub state: CameraStateId,
    /// Horizontal look angle in degrees, unconstrained
    pub horizontal: f32,
    /// Vertical look angle in degrees, clamped by the config
    pub vertical: f32,
}

impl CameraRuntimeState {
    /// Start settled on `state`
    pub fn settled(id: CameraStateId, state: &CameraState) -> Self {
        Self {
            pivot: state.pivot,
            offset: state.offset,
            orientation: state.orientation,
            fov: state.fov,
            crosshair_alpha: 0.0,
            alpha_target: 0.0,
            obstacle_fix: 0.0,
            target_distance: 0.0,
            scoped: false,
            scope_offset: Quat::IDENTITY,
            scope_height: 0.0,
            pivot_speed: 1.0,
            was_in_cover: false,
            was_corner: false,
            state: id,
            horizontal: 0.0,
            vertical: 0.0,
        }
    }

    /// Jump the pose to `state` without blending
    pub fn settle_on(&mut self, state: &CameraState) {
        self.pivot = state.pivot;
        self.offset = state.offset;
        self.orientation = state.orientation;
        self.fov = state.fov;
        self.obstacle_fix = 0.0;
        self.pivot_speed = 1.0;
    }
}

/// Targets for one blend step
#[derive(Debug, Clone, Copy)]
pub struct PoseTarget<'a> {
    pub state: &'a CameraState,
    /// State FOV after the weapon zoom offset
    pub fov: f32,
    /// Freeze the pivot this frame
    pub snap: bool,
    /// Blend FOV at `scope_fov_multiplier` times the normal rate
    pub fast_fov: bool,
}

/// Advance the pose one frame. Returns the frame's lerp rate.
pub fn blend(
    runtime: &mut CameraRuntimeState,
    target: PoseTarget<'_>,
    config: &CameraConfig,
    dt: f32,
) -> f32 {
    let lerp = lerp_rate(dt, config.blend_rate);

    if target.snap {
        runtime.pivot_speed = 0.0;
    } else {
        let recovery = lerp_rate(dt, 1.0 / config.pivot_recovery_time);
        runtime.pivot_speed = (runtime.pivot_speed + recovery).min(1.0);
    }

    runtime.pivot = approach_vec3(runtime.pivot, target.state.pivot, lerp * runtime.pivot_speed);
    runtime.offset = approach_vec3(runtime.offset, target.state.offset, lerp);
    runtime.orientation = approach_vec3(runtime.orientation, target.state.orientation, lerp);

    let fov_rate = if target.fast_fov {
        (lerp * config.scope_fov_multiplier).min(1.0)
    } else {
        lerp
    };
    runtime.fov = approach(runtime.fov, target.fov, fov_rate);

    lerp
}

/// FOV target for a state, narrowed by the weapon's zoom offset while zooming
pub fn target_fov(state: &CameraState, zoom_offset: Option<f32>, zooming: bool) -> f32 {
    let fov = match zoom_offset {
        Some(offset) if zooming => state.fov - offset,
        _ => state.fov,
    };
    fov.max(MIN_FOV)
}
