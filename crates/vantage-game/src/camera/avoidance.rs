//! Line-of-sight obstacle avoidance
//!
//! A sphere is swept from the character toward the camera. The deepest intrusion of any
//! blocking geometry becomes a correction that pulls the camera back along the same line.

use glam::Vec3;
use tracing::trace;
use vantage_core::{EntityId, GeometryQuery, HitBuffer};

/// Raw correction measured this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceSample {
    /// Distance between the line-of-sight target and the unobstructed camera
    pub max_distance: f32,
    /// How far the camera must move toward the target, in `[0, max_distance]`
    pub correction: f32,
}

/// Sphere-cast solver with a hit buffer reused across frames
#[derive(Debug, Clone, Default)]
pub struct ObstacleAvoidance {
    hits: HitBuffer,
}

impl ObstacleAvoidance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure how much geometry between `target` and `camera` blocks the view.
    ///
    /// Trigger volumes and colliders belonging to `owner` (or its descendants) are ignored.
    pub fn measure(
        &mut self,
        queries: &dyn GeometryQuery,
        owner: EntityId,
        target: Vec3,
        camera: Vec3,
        radius: f32,
    ) -> AvoidanceSample {
        let offset = camera - target;
        let max_distance = offset.length();
        if max_distance <= f32::EPSILON {
            return AvoidanceSample {
                max_distance: 0.0,
                correction: 0.0,
            };
        }

        queries.sphere_cast(target, offset / max_distance, radius, max_distance, &mut self.hits);

        let correction = self
            .hits
            .iter()
            .filter(|hit| !hit.is_trigger)
            .filter(|hit| !hit.entity.is_some_and(|entity| queries.is_descendant_of(entity, owner)))
            .map(|hit| (max_distance - hit.distance).clamp(0.0, max_distance))
            .fold(0.0_f32, f32::max);

        if correction > 0.0 {
            trace!(correction, max_distance, hits = self.hits.len(), "Camera view obstructed");
        }

        AvoidanceSample {
            max_distance,
            correction,
        }
    }
}

/// Move `camera` toward `target` by `correction`, never past the target
pub fn apply_correction(camera: Vec3, target: Vec3, correction: f32) -> Vec3 {
    let offset = target - camera;
    let distance = offset.length();
    if distance <= f32::EPSILON {
        return camera;
    }
    let correction = correction.clamp(0.0, distance);
    camera + offset / distance * correction
}
