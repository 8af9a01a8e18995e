//! Collider body of a tracked character
//!
//! A capsule for the torso and a sphere for the head, both registered under the
//! character's entity so camera casts can recognise (and ignore) them.

use glam::Vec3;
use rapier3d::prelude::*;
use vantage_core::EntityId;

use crate::PhysicsWorld;

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Head sphere radius (default: 0.15m)
    pub head_radius: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            head_radius: 0.15,
        }
    }
}

/// Colliders representing one character in the physics world
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Entity of the character root
    pub entity: EntityId,
    /// Child entity owning the head collider
    pub head_entity: EntityId,
    /// Feet position
    position: Vec3,
    body_handle: Option<ColliderHandle>,
    head_handle: Option<ColliderHandle>,
}

impl CharacterBody {
    /// Create a character body with default config
    pub fn new(entity: EntityId) -> Self {
        Self::with_config(entity, CharacterBodyConfig::default())
    }

    /// Create a character body with custom config
    pub fn with_config(entity: EntityId, config: CharacterBodyConfig) -> Self {
        Self {
            config,
            entity,
            head_entity: EntityId::new(),
            position: Vec3::ZERO,
            body_handle: None,
            head_handle: None,
        }
    }

    /// Insert the colliders into the world with feet at `position`
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let center = self.center_position();
        let body = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(vector![center.x, center.y, center.z])
            .build();
        self.body_handle = Some(physics.add_owned_collider(body, self.entity));

        let head = self.head_position();
        let head_collider = ColliderBuilder::ball(self.config.head_radius)
            .translation(vector![head.x, head.y, head.z])
            .build();
        self.head_handle = Some(physics.add_owned_collider(head_collider, self.head_entity));
        physics.set_parent(self.head_entity, self.entity);
    }

    /// Remove the colliders from the world
    pub fn despawn(&mut self, physics: &mut PhysicsWorld) {
        if let Some(handle) = self.body_handle.take() {
            physics.remove_collider(handle);
        }
        if let Some(handle) = self.head_handle.take() {
            physics.remove_collider(handle);
        }
        physics.clear_parent(self.head_entity);
    }

    /// Move the body so its feet are at `position` (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;
        if let Some(handle) = self.body_handle {
            physics.set_collider_translation(handle, self.center_position());
        }
        if let Some(handle) = self.head_handle {
            physics.set_collider_translation(handle, self.head_position());
        }
    }

    /// Feet position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Middle of the capsule
    pub fn center_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.config.height / 2.0)
    }

    /// Center of the head sphere (eye height)
    pub fn head_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.config.height - self.config.head_radius)
    }

    /// Highest point of the character
    pub fn top_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.config.height + self.config.head_radius)
    }

    pub fn is_spawned(&self) -> bool {
        self.body_handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::{GeometryQuery, HitBuffer};

    #[test]
    fn test_character_body_config() {
        let config = CharacterBodyConfig::default();
        assert_eq!(config.height, 1.8);
        assert_eq!(config.radius, 0.4);
    }

    #[test]
    fn test_head_hits_resolve_to_character() {
        let mut world = PhysicsWorld::new();
        let entity = EntityId::new();
        let mut body = CharacterBody::new(entity);
        body.spawn(&mut world, Vec3::ZERO);

        let mut hits = HitBuffer::new();
        let origin = body.head_position() + Vec3::new(0.0, 0.0, 5.0);
        world.sphere_cast(origin, Vec3::NEG_Z, 0.1, 10.0, &mut hits);
        assert!(!hits.is_empty());
        for hit in hits.iter() {
            let owner = hit.entity.expect("character colliders are owned");
            assert!(world.is_descendant_of(owner, entity));
        }
    }

    #[test]
    fn test_set_position_moves_colliders() {
        let mut world = PhysicsWorld::new();
        let mut body = CharacterBody::new(EntityId::new());
        body.spawn(&mut world, Vec3::ZERO);
        body.set_position(&mut world, Vec3::new(10.0, 0.0, 0.0));

        let miss = world.raycast(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z, 10.0, None);
        assert!(miss.is_none());
        let hit = world.raycast(Vec3::new(10.0, 1.0, 5.0), Vec3::NEG_Z, 10.0, None);
        assert!(hit.is_some());
    }

    #[test]
    fn test_despawn_removes_colliders() {
        let mut world = PhysicsWorld::new();
        let mut body = CharacterBody::new(EntityId::new());
        body.spawn(&mut world, Vec3::ZERO);
        assert!(body.is_spawned());
        body.despawn(&mut world);
        assert!(!body.is_spawned());
        assert!(world.raycast(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z, 10.0, None).is_none());
    }
}
