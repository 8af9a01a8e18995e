//! Scripted demo scenario
//!
//! Walks a character through every camera situation in order: free movement, low cover,
//! peeking, aiming, zooming, scoping, backing into a wall, and dying.

use glam::{Quat, Vec2, Vec3};
use vantage_game::{CharacterFlags, CharacterSnapshot, CoverKind};
use vantage_physics::PhysicsWorld;

/// Low cover block in front of the start position
const LOW_COVER_CENTER: Vec3 = Vec3::new(0.0, 0.5, -3.0);
/// Wall the character backs into
const BACK_WALL_CENTER: Vec3 = Vec3::new(0.0, 2.0, 7.0);
/// Target wall far ahead, seen through the scope
const TARGET_WALL_CENTER: Vec3 = Vec3::new(0.0, 3.0, -40.0);

/// Build the static demo level
pub fn build_level(physics: &mut PhysicsWorld) {
    physics.create_ground(0.0);
    physics.create_static_box(Vec3::new(1.5, 0.5, 0.3), LOW_COVER_CENTER);
    physics.create_static_box(Vec3::new(4.0, 2.0, 0.3), BACK_WALL_CENTER);
    physics.create_static_box(Vec3::new(20.0, 3.0, 0.5), TARGET_WALL_CENTER);
    // Pickup volume the camera passes through
    physics.create_trigger_box(Vec3::splat(1.0), Vec3::new(0.6, 1.8, 2.5));
}

/// Scenario phases, in playback order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioPhase {
    /// Walk forward while looking around
    Explore,
    /// Crouch behind the low cover, left edge
    TakeCover,
    /// Peek around the left edge of the cover
    Peek,
    /// Step out and aim
    Aim,
    /// Zoom with the scoped rifle
    Zoom,
    /// Look through the scope
    Scope,
    /// Back up against the wall behind
    BackUp,
    /// Get shot
    Die,
}

impl ScenarioPhase {
    pub fn first() -> Self {
        Self::Explore
    }

    /// Seconds spent in this phase
    pub fn duration(&self) -> f32 {
        match self {
            Self::Explore => 2.0,
            Self::TakeCover => 1.5,
            Self::Peek => 1.0,
            Self::Aim => 1.0,
            Self::Zoom => 1.0,
            Self::Scope => 1.5,
            Self::BackUp => 1.5,
            Self::Die => 2.0,
        }
    }

    /// Get a human-readable description of this phase
    pub fn description(&self) -> &'static str {
        match self {
            Self::Explore => "Exploring...",
            Self::TakeCover => "Taking cover...",
            Self::Peek => "Peeking around the corner...",
            Self::Aim => "Aiming...",
            Self::Zoom => "Zooming in...",
            Self::Scope => "Looking through the scope...",
            Self::BackUp => "Backing into the wall...",
            Self::Die => "Down!",
        }
    }

    /// Get the next phase, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Explore => Some(Self::TakeCover),
            Self::TakeCover => Some(Self::Peek),
            Self::Peek => Some(Self::Aim),
            Self::Aim => Some(Self::Zoom),
            Self::Zoom => Some(Self::Scope),
            Self::Scope => Some(Self::BackUp),
            Self::BackUp => Some(Self::Die),
            Self::Die => None,
        }
    }

    /// Character position at `progress` (0 to 1) through the phase
    pub fn position(&self, progress: f32) -> Vec3 {
        let progress = progress.clamp(0.0, 1.0);
        match self {
            Self::Explore => Vec3::ZERO.lerp(Vec3::new(0.0, 0.0, -2.2), progress),
            Self::TakeCover | Self::Peek => Vec3::new(0.0, 0.0, -2.2),
            Self::Aim => Vec3::new(0.0, 0.0, -2.2).lerp(Vec3::new(-1.8, 0.0, -2.2), progress),
            Self::Zoom | Self::Scope => Vec3::new(-1.8, 0.0, -2.2),
            Self::BackUp => Vec3::new(-1.8, 0.0, -2.2).lerp(Vec3::new(0.0, 0.0, 5.5), progress),
            Self::Die => Vec3::new(0.0, 0.0, 5.5),
        }
    }

    /// Mouse movement for one frame of this phase, in pixels
    pub fn look_delta(&self, progress: f32) -> Vec2 {
        match self {
            Self::Explore => Vec2::new((progress * std::f32::consts::TAU).sin() * 6.0, 0.0),
            Self::Aim => Vec2::new(0.0, -1.0),
            _ => Vec2::ZERO,
        }
    }

    /// Update the character's flags and pose for this phase
    pub fn apply(&self, character: &mut CharacterSnapshot, progress: f32) {
        let mut flags = CharacterFlags {
            alive: true,
            ..Default::default()
        };
        character.recoil = 0.0;
        character.rotation = Quat::IDENTITY;

        match self {
            Self::Explore => {}
            Self::TakeCover => {
                flags.cover = CoverKind::Low;
                flags.standing_left = true;
                flags.crouching = true;
            }
            Self::Peek => {
                flags.cover = CoverKind::Low;
                flags.standing_left = true;
                flags.can_peek_left = true;
            }
            Self::Aim => {
                flags.would_aim = true;
                flags.aiming_precisely = true;
                character.recoil = 0.5;
                character.gun_direction = Vec3::new(0.02, 0.04, -1.0).normalize();
            }
            Self::Zoom => {
                flags.would_aim = true;
                flags.zooming = true;
            }
            Self::Scope => {
                flags.would_aim = true;
                flags.zooming = true;
                flags.scoped = true;
            }
            Self::BackUp => {}
            Self::Die => flags.alive = false,
        }

        character.flags = flags;
        character.position = self.position(progress);
        character.gun_origin = character.position + Vec3::new(0.2, 1.4, -0.3);
        if !matches!(self, Self::Aim) {
            character.gun_direction = Vec3::NEG_Z;
        }
    }
}
