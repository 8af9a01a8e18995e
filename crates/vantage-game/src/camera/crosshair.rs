//! Crosshair and recoil overlay

use glam::{Mat4, Vec2, Vec3};
use serde::Serialize;
use vantage_core::{ScreenRect, Transform};

/// Where to draw the crosshair this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrosshairOverlay {
    pub rect: ScreenRect,
    pub alpha: f32,
}

/// Camera data the overlay is projected with
#[derive(Debug, Clone, Copy)]
pub struct OverlayView {
    pub transform: Transform,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub viewport: Vec2,
    pub near: f32,
    pub far: f32,
}

impl OverlayView {
    fn view_projection(&self) -> Mat4 {
        let aspect = self.viewport.x / self.viewport.y;
        Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far)
            * self.transform.view_matrix()
    }

    /// Project a world point to pixels (origin top-left). `None` when behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.viewport.x,
            (0.5 - ndc.y * 0.5) * self.viewport.y,
        ))
    }
}

/// Gun data the overlay deviates with
#[derive(Debug, Clone, Copy)]
pub struct GunAim {
    pub origin: Vec3,
    pub direction: Vec3,
    pub recoil: f32,
}

/// Crosshair rectangle: screen centre displaced by the gun's deviation from the ideal aim
/// point, scaled by recoil.
pub fn overlay(
    view: &OverlayView,
    gun: &GunAim,
    aim_distance: f32,
    size: f32,
    alpha: f32,
) -> Option<CrosshairOverlay> {
    if view.viewport.x <= 0.0 || view.viewport.y <= 0.0 {
        return None;
    }
    let center = view.viewport * 0.5;

    let ideal_point = view.transform.position + view.transform.forward() * aim_distance;
    let reach = ideal_point.distance(gun.origin);
    let deviation = match gun.direction.try_normalize() {
        Some(direction) => {
            let gun_point = gun.origin + direction * reach;
            match (view.project(ideal_point), view.project(gun_point)) {
                (Some(ideal), Some(actual)) => actual - ideal,
                _ => Vec2::ZERO,
            }
        }
        None => Vec2::ZERO,
    };

    Some(CrosshairOverlay {
        rect: ScreenRect::from_center(center + deviation * gun.recoil, Vec2::splat(size)),
        alpha,
    })
}
