//! Read-only view of the character the camera follows
//!
//! The character subsystem owns locomotion, cover detection, and weapons. The camera only
//! sees it through [`TrackedCharacterView`], captured once per frame into [`CharacterFlags`].

use glam::{Quat, Vec3};
use vantage_core::EntityId;

/// Which kind of cover the character is currently using
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoverKind {
    #[default]
    None,
    /// Waist-high cover (character crouches behind it)
    Low,
    /// Cover taller than the character
    Tall,
}

impl CoverKind {
    pub fn is_some(self) -> bool {
        !matches!(self, CoverKind::None)
    }
}

/// What the camera needs to know about the equipped ranged weapon
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeaponView {
    /// Degrees subtracted from the state FOV while zooming
    pub zoom_fov_offset: Option<f32>,
    /// Whether the weapon carries an optical scope
    pub has_scope: bool,
}

/// Capabilities the camera reads from the tracked character
pub trait TrackedCharacterView {
    /// Root entity of the character (collider hierarchy root, fade target identity)
    fn entity(&self) -> EntityId;

    fn is_alive(&self) -> bool;
    fn is_crouching(&self) -> bool;
    fn is_climbing(&self) -> bool;
    fn cover(&self) -> CoverKind;
    /// Facing away from the cover wall while in tall cover
    fn is_looking_back(&self) -> bool;
    /// Standing at the left side of the current cover
    fn is_standing_left(&self) -> bool;
    fn can_peek_left(&self) -> bool;
    fn can_peek_right(&self) -> bool;
    /// Can aim over or along the cover wall without leaving it
    fn can_wall_aim(&self) -> bool;
    fn has_grenade(&self) -> bool;
    fn is_zooming(&self) -> bool;
    fn is_scoped(&self) -> bool;
    /// Intends to aim (facing control is active)
    fn would_aim(&self) -> bool;
    fn is_aiming_precisely(&self) -> bool;

    /// World position the camera pivots around (character feet)
    fn pivot_position(&self) -> Vec3;
    fn pivot_rotation(&self) -> Quat;
    fn gun_origin(&self) -> Vec3;
    fn gun_direction(&self) -> Vec3;
    /// Current recoil intensity of the equipped weapon
    fn recoil(&self) -> f32;
    /// Height above the pivot used as the line-of-sight target
    fn standing_height(&self) -> f32;
    /// Head height above the pivot the scope camera settles at
    fn target_height(&self) -> f32;
    /// Top of the character, used to measure camera distance
    fn top_position(&self) -> Vec3;

    /// Currently equipped ranged weapon, if any
    fn weapon(&self) -> Option<WeaponView>;
}

/// Per-frame snapshot of the character predicates the classifier decides on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterFlags {
    pub alive: bool,
    pub crouching: bool,
    pub climbing: bool,
    pub cover: CoverKind,
    pub looking_back: bool,
    pub standing_left: bool,
    pub can_peek_left: bool,
    pub can_peek_right: bool,
    pub can_wall_aim: bool,
    pub has_grenade: bool,
    pub zooming: bool,
    pub scoped: bool,
    pub would_aim: bool,
    pub aiming_precisely: bool,
}

impl CharacterFlags {
    /// Capture the predicates from a character view
    pub fn capture(view: &dyn TrackedCharacterView) -> Self {
        Self {
            alive: view.is_alive(),
            crouching: view.is_crouching(),
            climbing: view.is_climbing(),
            cover: view.cover(),
            looking_back: view.is_looking_back(),
            standing_left: view.is_standing_left(),
            can_peek_left: view.can_peek_left(),
            can_peek_right: view.can_peek_right(),
            can_wall_aim: view.can_wall_aim(),
            has_grenade: view.has_grenade(),
            zooming: view.is_zooming(),
            scoped: view.is_scoped(),
            would_aim: view.would_aim(),
            aiming_precisely: view.is_aiming_precisely(),
        }
    }

    pub fn in_cover(&self) -> bool {
        self.cover.is_some()
    }
}

/// Plain-data character view, for scripted characters and tests
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSnapshot {
    pub entity: EntityId,
    pub flags: CharacterFlags,
    pub position: Vec3,
    pub rotation: Quat,
    pub gun_origin: Vec3,
    pub gun_direction: Vec3,
    pub recoil: f32,
    pub standing_height: f32,
    pub target_height: f32,
    /// Total character height, used for the top point
    pub height: f32,
    pub weapon: Option<WeaponView>,
}

impl CharacterSnapshot {
    /// A living character standing at `position` with nothing equipped
    pub fn new(entity: EntityId, position: Vec3) -> Self {
        Self {
            entity,
            flags: CharacterFlags {
                alive: true,
                ..Default::default()
            },
            position,
            rotation: Quat::IDENTITY,
            gun_origin: position + Vec3::new(0.2, 1.4, 0.0),
            gun_direction: Vec3::NEG_Z,
            recoil: 0.0,
            standing_height: 1.6,
            target_height: 1.65,
            height: 1.8,
            weapon: None,
        }
    }
}

impl TrackedCharacterView for CharacterSnapshot {
    fn entity(&self) -> EntityId {
        self.entity
    }

    fn is_alive(&self) -> bool {
        self.flags.alive
    }

    fn is_crouching(&self) -> bool {
        self.flags.crouching
    }

    fn is_climbing(&self) -> bool {
        self.flags.climbing
    }

    fn cover(&self) -> CoverKind {
        self.flags.cover
    }

    fn is_looking_back(&self) -> bool {
        self.flags.looking_back
    }

    fn is_standing_left(&self) -> bool {
        self.flags.standing_left
    }

    fn can_peek_left(&self) -> bool {
        self.flags.can_peek_left
    }

    fn can_peek_right(&self) -> bool {
        self.flags.can_peek_right
    }

    fn can_wall_aim(&self) -> bool {
        self.flags.can_wall_aim
    }

    fn has_grenade(&self) -> bool {
        self.flags.has_grenade
    }

    fn is_zooming(&self) -> bool {
        self.flags.zooming
    }

    fn is_scoped(&self) -> bool {
        self.flags.scoped
    }

    fn would_aim(&self) -> bool {
        self.flags.would_aim
    }

    fn is_aiming_precisely(&self) -> bool {
        self.flags.aiming_precisely
    }

    fn pivot_position(&self) -> Vec3 {
        self.position
    }

    fn pivot_rotation(&self) -> Quat {
        self.rotation
    }

    fn gun_origin(&self) -> Vec3 {
        self.gun_origin
    }

    fn gun_direction(&self) -> Vec3 {
        self.gun_direction
    }

    fn recoil(&self) -> f32 {
        self.recoil
    }

    fn standing_height(&self) -> f32 {
        self.standing_height
    }

    fn target_height(&self) -> f32 {
        self.target_height
    }

    fn top_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.height
    }

    fn weapon(&self) -> Option<WeaponView> {
        self.weapon
    }
}
