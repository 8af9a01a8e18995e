//! Scope mode
//!
//! While aiming through an optical scope the camera sits at the character's head. On entry a
//! corrective rotation compensates for the parallax between the shoulder camera and the head:
//! whatever the shoulder camera was pointing at stays under the crosshair.

use glam::{Quat, Vec3};
use vantage_core::{EntityId, GeometryQuery};

/// Inputs captured on the frame the scope is raised
#[derive(Debug, Clone, Copy)]
pub struct ScopeEntry {
    /// Position of the shoulder camera before entering
    pub camera_position: Vec3,
    /// Forward direction of the shoulder camera
    pub forward: Vec3,
    /// World position of the head the scope camera moves to
    pub head: Vec3,
    /// Whether the character can peek around either corner
    pub can_peek: bool,
}

/// Rotation mapping the nominal forward onto the direction from the head to what the
/// shoulder camera was looking at. Identity when peeking or when the ray hits nothing.
pub fn entry_offset(
    queries: &dyn GeometryQuery,
    owner: EntityId,
    entry: &ScopeEntry,
    ray_distance: f32,
) -> Quat {
    if entry.can_peek {
        return Quat::IDENTITY;
    }
    let Some(forward) = entry.forward.try_normalize() else {
        return Quat::IDENTITY;
    };

    let look_target = entry.camera_position + forward * ray_distance;
    let to_target = look_target - entry.head;
    let distance = to_target.length();
    let Some(direction) = to_target.try_normalize() else {
        return Quat::IDENTITY;
    };

    match queries.raycast(entry.head, direction, distance, Some(owner)) {
        Some(hit) => match (hit.point - entry.head).try_normalize() {
            Some(actual) => Quat::from_rotation_arc(forward, actual),
            None => Quat::IDENTITY,
        },
        None => Quat::IDENTITY,
    }
}

/// Camera position while scoped
pub fn scoped_position(pivot: Vec3, height: f32) -> Vec3 {
    pivot + Vec3::Y * height
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::{EmptyGeometry, HitBuffer, QueryHit};

    /// A wall across the whole world at `z = wall_z`
    struct Wall {
        wall_z: f32,
    }

    impl GeometryQuery for Wall {
        fn sphere_cast(&self, _: Vec3, _: Vec3, _: f32, _: f32, hits: &mut HitBuffer) {
            hits.clear();
        }

        fn raycast(
            &self,
            origin: Vec3,
            direction: Vec3,
            max_distance: f32,
            _: Option<EntityId>,
        ) -> Option<QueryHit> {
            if direction.z >= 0.0 {
                return None;
            }
            let distance = (self.wall_z - origin.z) / direction.z;
            if distance < 0.0 || distance > max_distance {
                return None;
            }
            Some(QueryHit {
                distance,
                point: origin + direction * distance,
                normal: Vec3::Z,
                entity: None,
                is_trigger: false,
            })
        }

        fn is_descendant_of(&self, entity: EntityId, ancestor: EntityId) -> bool {
            entity == ancestor
        }
    }

    fn shoulder_entry(can_peek: bool) -> ScopeEntry {
        ScopeEntry {
            camera_position: Vec3::new(0.6, 1.8, 3.0),
            forward: Vec3::NEG_Z,
            head: Vec3::new(0.0, 1.65, 0.0),
            can_peek,
        }
    }

    #[test]
    fn test_wall_ahead_produces_parallax_correction() {
        let wall = Wall { wall_z: -2.0 };
        let entry = shoulder_entry(false);
        let offset = entry_offset(&wall, EntityId::new(), &entry, 100.0);
        assert!(!offset.abs_diff_eq(Quat::IDENTITY, 1e-4));

        let hit = wall
            .raycast(
                entry.head,
                (entry.camera_position + entry.forward * 100.0 - entry.head).normalize(),
                200.0,
                None,
            )
            .unwrap();
        let expected = (hit.point - entry.head).normalize();
        let corrected = offset * entry.forward;
        assert!((corrected - expected).length() < 1e-4);
    }

    #[test]
    fn test_peek_uses_identity() {
        let wall = Wall { wall_z: -2.0 };
        let offset = entry_offset(&wall, EntityId::new(), &shoulder_entry(true), 100.0);
        assert_eq!(offset, Quat::IDENTITY);
    }

    #[test]
    fn test_no_hit_uses_identity() {
        let offset = entry_offset(&EmptyGeometry, EntityId::new(), &shoulder_entry(false), 100.0);
        assert_eq!(offset, Quat::IDENTITY);
    }

    #[test]
    fn test_scoped_position_is_head_height() {
        assert_eq!(
            scoped_position(Vec3::new(2.0, 0.0, 1.0), 1.65),
            Vec3::new(2.0, 1.65, 1.0)
        );
    }
}
