//! Clamped-lerp smoothing
//!
//! Every interpolated camera value moves toward its target by a fraction `t` of the
//! remaining distance, with `t = min(dt * rate, 1)`. Values never overshoot, and once the
//! remaining distance drops below [`CONVERGENCE_EPSILON`] they land exactly on the target,
//! so a constant target is reached in a bounded number of frames.

use glam::Vec3;

/// Remaining distance below which a step lands on the target
pub const CONVERGENCE_EPSILON: f32 = 1e-4;

/// Frame interpolation factor for a per-second `rate`, clamped to [0, 1]
pub fn lerp_rate(dt: f32, rate: f32) -> f32 {
    let t = dt * rate;
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}

/// Move `current` toward `target` by fraction `t`
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return current;
    }
    let next = current + (target - current) * t.min(1.0);
    if (target - next).abs() < CONVERGENCE_EPSILON {
        target
    } else {
        next
    }
}

/// Vector form of [`approach`]
pub fn approach_vec3(current: Vec3, target: Vec3, t: f32) -> Vec3 {
    if t <= 0.0 {
        return current;
    }
    let next = current.lerp(target, t.min(1.0));
    if next.distance(target) < CONVERGENCE_EPSILON {
        target
    } else {
        next
    }
}
