//! Camera state classification
//!
//! An ordered predicate chain from a [`CharacterFlags`] snapshot to exactly one
//! [`CameraStateId`]. The first matching rule wins; anything unmatched lands on `Default`.

use crate::character::{CharacterFlags, CoverKind};

use super::CameraStateId;

/// Result of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub state: CameraStateId,
    /// Crosshair visibility target, 0 or 1
    pub alpha_target: f32,
    /// Blend FOV faster this frame (scoped)
    pub fast_fov: bool,
}

/// Pick the camera state for the current character flags
pub fn classify(flags: &CharacterFlags) -> Classification {
    let (state, mut visible) = select(flags);

    if flags.has_grenade {
        visible = false;
    }
    if flags.scoped {
        visible = false;
    }

    Classification {
        state,
        alpha_target: if visible { 1.0 } else { 0.0 },
        fast_fov: flags.scoped,
    }
}

fn select(flags: &CharacterFlags) -> (CameraStateId, bool) {
    use CameraStateId::*;

    if !flags.alive {
        return (Dead, false);
    }

    if flags.zooming || flags.scoped {
        return (zoom_state(flags), true);
    }

    if flags.climbing {
        return (Climb, true);
    }

    if flags.can_peek_left && flags.standing_left {
        return (LeftCorner, true);
    }
    if flags.can_peek_right && !flags.standing_left {
        return (RightCorner, true);
    }

    match flags.cover {
        CoverKind::Tall => {
            let state = if flags.looking_back {
                TallCoverBack
            } else if flags.standing_left {
                TallCoverLeft
            } else {
                TallCoverRight
            };
            return (state, can_aim_from_cover(flags));
        }
        CoverKind::Low => {
            let state = if flags.has_grenade {
                LowCoverGrenade
            } else {
                LowCover
            };
            return (state, can_aim_from_cover(flags));
        }
        CoverKind::None => {}
    }

    if flags.crouching {
        return (Crouch, true);
    }

    if flags.would_aim || flags.aiming_precisely {
        let state = if flags.has_grenade { Grenade } else { Aim };
        return (state, true);
    }

    (Default, false)
}

fn zoom_state(flags: &CharacterFlags) -> CameraStateId {
    use CameraStateId::*;

    let tall = flags.cover == CoverKind::Tall;
    if flags.in_cover() && flags.standing_left && flags.can_peek_left {
        return if tall { LeftTallCornerZoom } else { LeftLowCornerZoom };
    }
    if flags.in_cover() && !flags.standing_left && flags.can_peek_right {
        return if tall { RightTallCornerZoom } else { RightLowCornerZoom };
    }
    if tall && flags.looking_back {
        return TallCoverBackZoom;
    }
    if flags.cover == CoverKind::Low {
        return LowCoverZoom;
    }
    if flags.crouching {
        return CrouchZoom;
    }
    Zoom
}

fn can_aim_from_cover(flags: &CharacterFlags) -> bool {
    flags.can_peek_left || flags.can_peek_right || flags.can_wall_aim
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const FLAG_COUNT: u32 = 13;

    /// Every boolean combination, crossed with every cover kind
    fn all_flags() -> impl Iterator<Item = CharacterFlags> {
        let covers = [CoverKind::None, CoverKind::Low, CoverKind::Tall];
        (0..(1u32 << FLAG_COUNT)).flat_map(move |bits| {
            covers.into_iter().map(move |cover| {
                let bit = |n: u32| bits & (1 << n) != 0;
                CharacterFlags {
                    alive: bit(0),
                    crouching: bit(1),
                    climbing: bit(2),
                    cover,
                    looking_back: bit(3),
                    standing_left: bit(4),
                    can_peek_left: bit(5),
                    can_peek_right: bit(6),
                    can_wall_aim: bit(7),
                    has_grenade: bit(8),
                    zooming: bit(9),
                    scoped: bit(10),
                    would_aim: bit(11),
                    aiming_precisely: bit(12),
                }
            })
        })
    }

    fn alive() -> CharacterFlags {
        CharacterFlags {
            alive: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_classifier_is_total() {
        let mut reached = HashSet::new();
        for flags in all_flags() {
            let result = classify(&flags);
            assert!(result.alpha_target == 0.0 || result.alpha_target == 1.0);
            if !flags.alive {
                assert_eq!(result.state, CameraStateId::Dead);
            }
            if flags.has_grenade || flags.scoped {
                assert_eq!(result.alpha_target, 0.0);
            }
            reached.insert(result.state);
        }
        for id in CameraStateId::ALL {
            assert!(reached.contains(&id), "{id} is unreachable");
        }
    }

    #[test]
    fn test_idle_character_uses_default() {
        let result = classify(&alive());
        assert_eq!(result.state, CameraStateId::Default);
        assert_eq!(result.alpha_target, 0.0);
        assert!(!result.fast_fov);
    }

    #[test]
    fn test_dead_beats_everything() {
        let flags = CharacterFlags {
            alive: false,
            zooming: true,
            would_aim: true,
            cover: CoverKind::Tall,
            ..Default::default()
        };
        let result = classify(&flags);
        assert_eq!(result.state, CameraStateId::Dead);
        assert_eq!(result.alpha_target, 0.0);
    }

    #[test]
    fn test_low_cover_then_peek_left() {
        let mut flags = CharacterFlags {
            cover: CoverKind::Low,
            standing_left: true,
            ..alive()
        };
        let result = classify(&flags);
        assert_eq!(result.state, CameraStateId::LowCover);
        assert_eq!(result.alpha_target, 0.0);

        flags.can_peek_left = true;
        let result = classify(&flags);
        assert_eq!(result.state, CameraStateId::LeftCorner);
        assert_eq!(result.alpha_target, 1.0);
    }

    #[test]
    fn test_tall_cover_sides() {
        let mut flags = CharacterFlags {
            cover: CoverKind::Tall,
            can_wall_aim: true,
            ..alive()
        };
        assert_eq!(classify(&flags).state, CameraStateId::TallCoverRight);
        flags.standing_left = true;
        assert_eq!(classify(&flags).state, CameraStateId::TallCoverLeft);
        flags.looking_back = true;
        assert_eq!(classify(&flags).state, CameraStateId::TallCoverBack);
        assert_eq!(classify(&flags).alpha_target, 1.0);
    }

    #[test]
    fn test_zoom_corner_variants() {
        let flags = CharacterFlags {
            zooming: true,
            cover: CoverKind::Tall,
            standing_left: true,
            can_peek_left: true,
            ..alive()
        };
        assert_eq!(classify(&flags).state, CameraStateId::LeftTallCornerZoom);

        let flags = CharacterFlags {
            zooming: true,
            cover: CoverKind::Low,
            can_peek_right: true,
            ..alive()
        };
        assert_eq!(classify(&flags).state, CameraStateId::RightLowCornerZoom);

        let flags = CharacterFlags {
            zooming: true,
            crouching: true,
            ..alive()
        };
        assert_eq!(classify(&flags).state, CameraStateId::CrouchZoom);
    }

    #[test]
    fn test_scoped_hides_crosshair_and_speeds_fov() {
        let flags = CharacterFlags {
            scoped: true,
            zooming: true,
            ..alive()
        };
        let result = classify(&flags);
        assert_eq!(result.state, CameraStateId::Zoom);
        assert_eq!(result.alpha_target, 0.0);
        assert!(result.fast_fov);
    }

    #[test]
    fn test_grenade_hides_crosshair() {
        let flags = CharacterFlags {
            would_aim: true,
            has_grenade: true,
            ..alive()
        };
        let result = classify(&flags);
        assert_eq!(result.state, CameraStateId::Grenade);
        assert_eq!(result.alpha_target, 0.0);

        let flags = CharacterFlags {
            would_aim: true,
            ..alive()
        };
        let result = classify(&flags);
        assert_eq!(result.state, CameraStateId::Aim);
        assert_eq!(result.alpha_target, 1.0);
    }

    #[test]
    fn test_climb_beats_cover() {
        let flags = CharacterFlags {
            climbing: true,
            cover: CoverKind::Low,
            can_peek_left: true,
            standing_left: true,
            ..alive()
        };
        assert_eq!(classify(&flags).state, CameraStateId::Climb);
    }
}
