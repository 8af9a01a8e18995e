//! Vantage Physics - Geometry queries backed by rapier3d
//!
//! Provides the collision world the camera queries for line-of-sight and scope rays,
//! plus the collider bodies of tracked characters.

mod character_body;

pub use character_body::{CharacterBody, CharacterBodyConfig};

use std::collections::HashMap;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::parry::bounding_volume::{Aabb, BoundingVolume};
use rapier3d::parry::query::{self, ShapeCastOptions};
use rapier3d::prelude::*;
use tracing::trace;
use vantage_core::{EntityId, GeometryQuery, HitBuffer, QueryHit};

/// Upper bound on hierarchy depth walked by ancestor checks
const MAX_HIERARCHY_DEPTH: usize = 64;

/// Static collision world answering camera queries
pub struct PhysicsWorld {
    /// Rigid body storage (colliders attached to bodies resolve through it)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Island manager, needed for collider removal
    island_manager: IslandManager,
    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
    /// Entity owning each registered collider
    owners: HashMap<ColliderHandle, EntityId>,
    /// Parent of each child entity
    parents: HashMap<EntityId, EntityId>,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            owners: HashMap::new(),
            parents: HashMap::new(),
        }
    }

    /// Rebuild the ray query acceleration structure after colliders changed
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, props)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.update_queries();
        handle
    }

    /// Add a collider owned by `owner`, so hits on it report that entity
    pub fn add_owned_collider(&mut self, collider: Collider, owner: EntityId) -> ColliderHandle {
        let handle = self.add_static_collider(collider);
        self.owners.insert(handle, owner);
        handle
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
        self.owners.remove(&handle);
        self.update_queries();
    }

    /// Move a collider to a new world position
    pub fn set_collider_translation(&mut self, handle: ColliderHandle, position: Vec3) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_translation(vector![position.x, position.y, position.z]);
        }
        self.update_queries();
    }

    /// Entity that owns a collider, if any
    pub fn owner_of(&self, handle: ColliderHandle) -> Option<EntityId> {
        self.owners.get(&handle).copied()
    }

    /// Attach `child` below `parent` in the scene hierarchy
    pub fn set_parent(&mut self, child: EntityId, parent: EntityId) {
        self.parents.insert(child, parent);
    }

    /// Detach `child` from its parent
    pub fn clear_parent(&mut self, child: EntityId) {
        self.parents.remove(&child);
    }

    fn collider_belongs_to(&self, handle: ColliderHandle, root: EntityId) -> bool {
        self.owner_of(handle)
            .is_some_and(|owner| self.is_descendant_of(owner, root))
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.add_static_collider(collider)
    }

    /// Create a box trigger volume; casts report it with `is_trigger` set
    pub fn create_trigger_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .sensor(true)
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryQuery for PhysicsWorld {
    fn sphere_cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        radius: f32,
        max_distance: f32,
        hits: &mut HitBuffer,
    ) {
        hits.clear();
        let Some(direction) = direction.try_normalize() else {
            return;
        };
        if max_distance <= 0.0 || radius <= 0.0 {
            return;
        }

        let ball = Ball::new(radius);
        let ball_pos = Isometry::translation(origin.x, origin.y, origin.z);
        let velocity = vector![direction.x, direction.y, direction.z];
        let end = origin + direction * max_distance;
        let lo = origin.min(end) - Vec3::splat(radius);
        let hi = origin.max(end) + Vec3::splat(radius);
        let swept = Aabb::new(point![lo.x, lo.y, lo.z], point![hi.x, hi.y, hi.z]);

        for (handle, collider) in self.collider_set.iter() {
            if !collider.compute_aabb().intersects(&swept) {
                continue;
            }
            let cast = query::cast_shapes(
                &ball_pos,
                &velocity,
                &ball,
                collider.position(),
                &vector![0.0, 0.0, 0.0],
                collider.shape(),
                ShapeCastOptions::with_max_time_of_impact(max_distance),
            );
            match cast {
                Ok(Some(hit)) => {
                    let center = origin + direction * hit.time_of_impact;
                    let witness = hit.witness1.coords;
                    let normal = collider.position().rotation * hit.normal2.into_inner();
                    hits.push(QueryHit {
                        distance: hit.time_of_impact,
                        point: center + Vec3::new(witness.x, witness.y, witness.z),
                        normal: Vec3::new(normal.x, normal.y, normal.z),
                        entity: self.owner_of(handle),
                        is_trigger: collider.is_sensor(),
                    });
                }
                Ok(None) => {}
                Err(_) => trace!("Sphere cast unsupported against collider {:?}", handle),
            }
        }
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<EntityId>,
    ) -> Option<QueryHit> {
        let direction = direction.try_normalize()?;
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );
        let predicate = |handle: ColliderHandle, _: &Collider| match exclude {
            Some(root) => !self.collider_belongs_to(handle, root),
            None => true,
        };
        let filter = QueryFilter::default().exclude_sensors().predicate(&predicate);

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(handle, intersection)| QueryHit {
                distance: intersection.time_of_impact,
                point: origin + direction * intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
                entity: self.owner_of(handle),
                is_trigger: false,
            })
    }

    fn is_descendant_of(&self, entity: EntityId, ancestor: EntityId) -> bool {
        let mut current = entity;
        for _ in 0..MAX_HIERARCHY_DEPTH {
            if current == ancestor {
                return true;
            }
            match self.parents.get(&current) {
                Some(parent) => current = *parent,
                None => return false,
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raycast_hits_ground() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);

        let hit = world.raycast(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, 100.0, None);
        let hit = hit.expect("ray should hit the ground");
        assert!((hit.distance - 10.0).abs() < 1e-3);
        assert!((hit.normal - Vec3::Y).length() < 1e-3);
    }

    #[test]
    fn test_sphere_cast_orders_hits() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::new(0.5, 2.0, 2.0), Vec3::new(8.0, 0.0, 0.0));
        world.create_static_box(Vec3::new(0.5, 2.0, 2.0), Vec3::new(4.0, 0.0, 0.0));

        let mut hits = HitBuffer::new();
        world.sphere_cast(Vec3::ZERO, Vec3::X, 0.1, 20.0, &mut hits);
        assert_eq!(hits.len(), 2);
        let distances: Vec<f32> = hits.iter().map(|h| h.distance).collect();
        assert!((distances[0] - 3.4).abs() < 1e-2);
        assert!((distances[1] - 7.4).abs() < 1e-2);
    }

    #[test]
    fn test_sphere_cast_respects_max_distance() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::splat(0.5), Vec3::new(10.0, 0.0, 0.0));

        let mut hits = HitBuffer::new();
        world.sphere_cast(Vec3::ZERO, Vec3::X, 0.1, 5.0, &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_sphere_cast_flags_triggers() {
        let mut world = PhysicsWorld::new();
        world.create_trigger_box(Vec3::splat(0.5), Vec3::new(3.0, 0.0, 0.0));

        let mut hits = HitBuffer::new();
        world.sphere_cast(Vec3::ZERO, Vec3::X, 0.1, 10.0, &mut hits);
        assert_eq!(hits.len(), 1);
        assert!(hits.as_slice()[0].is_trigger);
    }

    #[test]
    fn test_hierarchy_checks() {
        let mut world = PhysicsWorld::new();
        let root = EntityId::new();
        let child = EntityId::new();
        let grandchild = EntityId::new();
        let stranger = EntityId::new();
        world.set_parent(child, root);
        world.set_parent(grandchild, child);

        assert!(world.is_descendant_of(root, root));
        assert!(world.is_descendant_of(grandchild, root));
        assert!(!world.is_descendant_of(root, grandchild));
        assert!(!world.is_descendant_of(stranger, root));

        world.clear_parent(child);
        assert!(!world.is_descendant_of(grandchild, root));
    }

    #[test]
    fn test_hierarchy_cycle_terminates() {
        let mut world = PhysicsWorld::new();
        let a = EntityId::new();
        let b = EntityId::new();
        world.set_parent(a, b);
        world.set_parent(b, a);
        assert!(!world.is_descendant_of(a, EntityId::new()));
    }

    #[test]
    fn test_raycast_excludes_owner_hierarchy() {
        let mut world = PhysicsWorld::new();
        let owner = EntityId::new();
        let collider = ColliderBuilder::ball(0.5)
            .translation(vector![2.0, 0.0, 0.0])
            .build();
        world.add_owned_collider(collider, owner);
        world.create_static_box(Vec3::splat(0.5), Vec3::new(6.0, 0.0, 0.0));

        let blocked = world.raycast(Vec3::ZERO, Vec3::X, 20.0, None).unwrap();
        assert_eq!(blocked.entity, Some(owner));

        let through = world.raycast(Vec3::ZERO, Vec3::X, 20.0, Some(owner)).unwrap();
        assert!(through.entity.is_none());
        assert!((through.distance - 5.5).abs() < 1e-3);
    }
}
