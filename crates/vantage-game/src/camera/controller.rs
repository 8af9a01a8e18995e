//! Camera controller
//!
//! Runs once per frame: classify the character, blend the pose, keep line of sight, apply
//! the scope override, and report the final transform together with the overlay and fade
//! events for the renderer.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::Serialize;
use tracing::debug;
use vantage_core::smoothing::{approach, lerp_rate};
use vantage_core::{EntityId, GeometryQuery, Transform};

use crate::character::{CharacterFlags, TrackedCharacterView};

use super::avoidance::{self, ObstacleAvoidance};
use super::crosshair::{self, CrosshairOverlay, GunAim, OverlayView};
use super::pose::{self, CameraRuntimeState, PoseTarget};
use super::scope::{self, ScopeEntry};
use super::{classify, CameraConfig, CameraProfile, CameraStateId, CameraStateTable};

/// Per-frame input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraInput {
    /// Look delta in pixels (x right, y down)
    pub look_delta: Vec2,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

/// World point the renderer should keep visible by fading geometry in front of it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FadeTarget {
    pub target: EntityId,
    pub point: Vec3,
}

/// Everything the camera produces in one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraFrame {
    pub transform: Transform,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub state: CameraStateId,
    pub crosshair: Option<CrosshairOverlay>,
    pub fade: FadeTarget,
    /// Where the scoped weapon should fire from
    pub fire_origin: Option<Vec3>,
    /// Distance from the camera to the top of the character
    pub target_distance: f32,
}

/// Camera controller
pub struct CameraController {
    /// Configuration
    pub config: CameraConfig,
    states: Arc<CameraStateTable>,
    runtime: CameraRuntimeState,
    avoidance: ObstacleAvoidance,
    transform: Transform,
}

impl CameraController {
    /// Create a camera controller with the built-in profile
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default(), Arc::new(CameraStateTable::default()))
    }

    /// Create a camera controller with custom config and a shared state table
    pub fn with_config(config: CameraConfig, states: Arc<CameraStateTable>) -> Self {
        let runtime = CameraRuntimeState::settled(CameraStateId::Default, states.default_state());
        Self {
            config,
            states,
            runtime,
            avoidance: ObstacleAvoidance::new(),
            transform: Transform::default(),
        }
    }

    /// Create a camera controller from a loaded profile
    pub fn from_profile(profile: CameraProfile) -> Self {
        Self::with_config(profile.camera, Arc::new(profile.states))
    }

    pub fn runtime(&self) -> &CameraRuntimeState {
        &self.runtime
    }

    /// State selected on the last update
    pub fn state(&self) -> CameraStateId {
        self.runtime.state
    }

    pub fn states(&self) -> &Arc<CameraStateTable> {
        &self.states
    }

    /// Transform produced by the last update
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn fov(&self) -> f32 {
        self.runtime.fov
    }

    /// Horizontal look angle in degrees
    pub fn horizontal(&self) -> f32 {
        self.runtime.horizontal
    }

    /// Vertical look angle in degrees
    pub fn vertical(&self) -> f32 {
        self.runtime.vertical
    }

    pub fn set_horizontal(&mut self, degrees: f32) {
        if degrees.is_finite() {
            self.runtime.horizontal = degrees;
        }
    }

    /// Set the vertical look angle, clamped into the configured pitch range
    pub fn set_vertical(&mut self, degrees: f32) {
        self.runtime.vertical = self.config.clamp_pitch(degrees);
    }

    /// Apply a look delta in pixels
    pub fn handle_look(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.runtime.horizontal += delta.x * self.config.sensitivity;
            self.runtime.vertical -= delta.y * self.config.sensitivity;
        }
        self.runtime.vertical = self.config.clamp_pitch(self.runtime.vertical);
    }

    /// Get the view matrix of the last frame
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.view_matrix()
    }

    /// Get a projection matrix using the current field of view
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.runtime.fov.to_radians(),
            aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }

    /// Turn the camera to the character's facing and settle the pose without blending
    pub fn snap_behind(&mut self, character: &dyn TrackedCharacterView) {
        let forward = character.pivot_rotation() * Vec3::NEG_Z;
        if forward.x.abs() > f32::EPSILON || forward.z.abs() > f32::EPSILON {
            self.runtime.horizontal = forward.x.atan2(-forward.z).to_degrees();
        }

        let flags = CharacterFlags::capture(character);
        let classification = classify(&flags);
        let state = *self.states.get(classification.state);
        self.runtime.settle_on(&state);
        self.runtime.state = classification.state;
        self.runtime.was_in_cover = flags.in_cover();
        self.runtime.was_corner = classification.state.is_corner();
        self.runtime.alpha_target = classification.alpha_target;
        self.runtime.crosshair_alpha = classification.alpha_target;
        self.runtime.scoped = false;
        self.runtime.scope_offset = Quat::IDENTITY;
    }

    /// Advance the camera one frame.
    ///
    /// Returns `None` and leaves every field untouched when there is no character.
    pub fn update(
        &mut self,
        character: Option<&dyn TrackedCharacterView>,
        queries: &dyn GeometryQuery,
        input: &CameraInput,
        dt: f32,
    ) -> Option<CameraFrame> {
        let character = character?;
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.handle_look(input.look_delta);

        let flags = CharacterFlags::capture(character);
        let weapon = character.weapon();
        let classification = classify(&flags);
        let state_id = classification.state;
        let target_state = *self.states.get(state_id);
        let config = &self.config;
        let runtime = &mut self.runtime;

        if state_id != runtime.state {
            debug!(from = %runtime.state, to = %state_id, "Camera state changed");
        }

        let in_cover = flags.in_cover();
        let corner = state_id.is_corner();
        let snap = in_cover != runtime.was_in_cover || corner != runtime.was_corner;

        let scoped = flags.scoped && weapon.is_some_and(|w| w.has_scope);
        let leaving_scope = runtime.scoped && !scoped;

        let fov = pose::target_fov(
            &target_state,
            weapon.and_then(|w| w.zoom_fov_offset),
            flags.zooming || flags.scoped,
        );
        let lerp = pose::blend(
            runtime,
            PoseTarget {
                state: &target_state,
                fov,
                snap,
                fast_fov: classification.fast_fov || leaving_scope,
            },
            config,
            dt,
        );

        runtime.alpha_target = classification.alpha_target;
        runtime.crosshair_alpha = approach(runtime.crosshair_alpha, runtime.alpha_target, lerp);
        runtime.was_in_cover = in_cover;
        runtime.was_corner = corner;
        runtime.state = state_id;

        let pivot_position = character.pivot_position();
        let look = look_rotation(runtime.horizontal, runtime.vertical, runtime.orientation);
        let yaw = Quat::from_rotation_y(-runtime.horizontal.to_radians());
        let nominal = pivot_position + yaw * runtime.pivot + look * runtime.offset;
        let forward = look * Vec3::NEG_Z;
        let target_point = pivot_position + Vec3::Y * character.standing_height();

        let mut fire_origin = None;
        let transform = if scoped {
            if !runtime.scoped {
                let entry = ScopeEntry {
                    camera_position: nominal,
                    forward,
                    head: pivot_position + Vec3::Y * character.target_height(),
                    can_peek: flags.can_peek_left || flags.can_peek_right,
                };
                runtime.scope_offset = scope::entry_offset(
                    queries,
                    character.entity(),
                    &entry,
                    config.scope_ray_distance,
                );
                runtime.scope_height = nominal.y - pivot_position.y;
                runtime.scoped = true;
                debug!(offset = ?runtime.scope_offset, "Scope raised");
            }
            runtime.scope_height = approach(
                runtime.scope_height,
                character.target_height(),
                lerp_rate(dt, config.scope_height_rate),
            );
            let position = scope::scoped_position(pivot_position, runtime.scope_height);
            fire_origin = Some(position);
            Transform::from_position_rotation(position, runtime.scope_offset * look)
        } else {
            if leaving_scope {
                runtime.scoped = false;
                runtime.scope_offset = Quat::IDENTITY;
                debug!("Scope lowered");
            }
            let sample = self.avoidance.measure(
                queries,
                character.entity(),
                target_point,
                nominal,
                config.obstacle_radius,
            );
            runtime.obstacle_fix = approach(
                runtime.obstacle_fix,
                sample.correction,
                lerp_rate(dt, config.obstacle_fix_rate),
            )
            .max(0.0);
            let position = avoidance::apply_correction(nominal, target_point, runtime.obstacle_fix);
            let look_point = nominal + forward * config.aim_distance;
            let roll = Quat::from_rotation_z(runtime.orientation.z.to_radians());
            let facing = Transform::looking_at(position, look_point, Vec3::Y).rotation;
            Transform::from_position_rotation(position, facing * roll)
        };

        runtime.target_distance = transform.position.distance(character.top_position());

        let crosshair = match config.crosshair.texture {
            Some(_) if flags.would_aim => crosshair::overlay(
                &OverlayView {
                    transform,
                    fov: runtime.fov,
                    viewport: input.viewport,
                    near: config.near,
                    far: config.far,
                },
                &GunAim {
                    origin: character.gun_origin(),
                    direction: character.gun_direction(),
                    recoil: character.recoil(),
                },
                config.aim_distance,
                config.crosshair.size,
                runtime.crosshair_alpha,
            ),
            _ => None,
        };

        let frame = CameraFrame {
            transform,
            fov: runtime.fov,
            state: state_id,
            crosshair,
            fade: FadeTarget {
                target: character.entity(),
                point: target_point,
            },
            fire_origin,
            target_distance: runtime.target_distance,
        };
        self.transform = transform;
        Some(frame)
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

/// Look rotation for horizontal/vertical angles plus a (pitch, yaw, roll) offset, in degrees
fn look_rotation(horizontal: f32, vertical: f32, orientation: Vec3) -> Quat {
    let yaw = (horizontal + orientation.y).to_radians();
    let pitch = (vertical + orientation.x).to_radians();
    Quat::from_rotation_y(-yaw) * Quat::from_rotation_x(pitch)
}
