//! Geometry query capability
//!
//! The camera never talks to a physics engine directly. It consumes this trait, which a
//! collision backend (see `vantage-physics`) implements. All queries are synchronous and
//! return within the calling frame.

use glam::Vec3;

use crate::EntityId;

/// Capacity of the reusable sphere-cast hit buffer
pub const MAX_QUERY_HITS: usize = 64;

/// A single ray or shape-cast hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryHit {
    /// Distance travelled along the cast direction before contact
    pub distance: f32,
    /// World-space contact point
    pub point: Vec3,
    /// Surface normal of the hit geometry
    pub normal: Vec3,
    /// Entity owning the hit collider, if the backend tracks one
    pub entity: Option<EntityId>,
    /// Whether the hit collider is a trigger volume
    pub is_trigger: bool,
}

/// Fixed-capacity hit list, allocated once and reused every frame.
///
/// Hits are kept sorted by distance. When full, a nearer hit evicts the farthest one.
#[derive(Debug, Clone)]
pub struct HitBuffer {
    hits: Vec<QueryHit>,
    capacity: usize,
}

impl HitBuffer {
    /// Create a buffer with the default capacity of [`MAX_QUERY_HITS`]
    pub fn new() -> Self {
        Self::with_capacity(MAX_QUERY_HITS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Insert a hit in distance order. Returns false if it was dropped.
    pub fn push(&mut self, hit: QueryHit) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.hits.len() == self.capacity {
            match self.hits.last() {
                Some(farthest) if farthest.distance > hit.distance => {
                    self.hits.pop();
                }
                _ => return false,
            }
        }
        let index = self
            .hits
            .partition_point(|existing| existing.distance <= hit.distance);
        self.hits.insert(index, hit);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryHit> {
        self.hits.iter()
    }

    pub fn as_slice(&self) -> &[QueryHit] {
        &self.hits
    }
}

impl Default for HitBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// World geometry queries used by the camera
pub trait GeometryQuery {
    /// Sweep a sphere from `origin` along the normalized `direction`, writing every hit
    /// within `max_distance` into `hits` (cleared first), nearest first.
    fn sphere_cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        radius: f32,
        max_distance: f32,
        hits: &mut HitBuffer,
    );

    /// Cast a ray and return the nearest non-trigger hit, ignoring colliders that belong to
    /// `exclude` or any of its descendants.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<EntityId>,
    ) -> Option<QueryHit>;

    /// Whether `entity` is `ancestor` itself or sits below it in the scene hierarchy
    fn is_descendant_of(&self, entity: EntityId, ancestor: EntityId) -> bool;
}

/// A backend with no geometry at all. Every query misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyGeometry;

impl GeometryQuery for EmptyGeometry {
    fn sphere_cast(&self, _: Vec3, _: Vec3, _: f32, _: f32, hits: &mut HitBuffer) {
        hits.clear();
    }

    fn raycast(&self, _: Vec3, _: Vec3, _: f32, _: Option<EntityId>) -> Option<QueryHit> {
        None
    }

    fn is_descendant_of(&self, entity: EntityId, ancestor: EntityId) -> bool {
        entity == ancestor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(distance: f32) -> QueryHit {
        QueryHit {
            distance,
            point: Vec3::ZERO,
            normal: Vec3::Y,
            entity: None,
            is_trigger: false,
        }
    }

    #[test]
    fn test_hit_buffer_keeps_distance_order() {
        let mut buffer = HitBuffer::new();
        buffer.push(hit(3.0));
        buffer.push(hit(1.0));
        buffer.push(hit(2.0));
        let distances: Vec<f32> = buffer.iter().map(|h| h.distance).collect();
        assert_eq!(distances, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_hit_buffer_full_keeps_nearest() {
        let mut buffer = HitBuffer::with_capacity(2);
        assert!(buffer.push(hit(5.0)));
        assert!(buffer.push(hit(4.0)));
        assert!(!buffer.push(hit(6.0)));
        assert!(buffer.push(hit(1.0)));
        let distances: Vec<f32> = buffer.iter().map(|h| h.distance).collect();
        assert_eq!(distances, vec![1.0, 4.0]);
        assert_eq!(buffer.len(), buffer.capacity());
    }

    #[test]
    fn test_hit_buffer_reuse_does_not_grow() {
        let mut buffer = HitBuffer::new();
        for frame in 0..10 {
            buffer.clear();
            for i in 0..100 {
                buffer.push(hit((i + frame) as f32));
            }
            assert_eq!(buffer.len(), MAX_QUERY_HITS);
        }
        assert!(buffer.hits.capacity() <= MAX_QUERY_HITS + 1);
    }

    #[test]
    fn test_empty_geometry_misses() {
        let mut buffer = HitBuffer::new();
        buffer.push(hit(1.0));
        EmptyGeometry.sphere_cast(Vec3::ZERO, Vec3::X, 0.1, 10.0, &mut buffer);
        assert!(buffer.is_empty());
        assert!(EmptyGeometry.raycast(Vec3::ZERO, Vec3::X, 10.0, None).is_none());
    }
}
