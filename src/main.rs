//! Vantage - third-person camera demo
//!
//! Runs the camera controller against a scripted character in a small collision level and
//! prints what the camera reported at the end of each phase.

mod scenario;
mod settings;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vantage_core::EntityId;
use vantage_game::{CameraController, CameraFrame, CameraInput, CharacterSnapshot, WeaponView};
use vantage_physics::{CharacterBody, PhysicsWorld};

use scenario::ScenarioPhase;
use settings::DemoSettings;

/// Camera output captured at the end of a phase
#[derive(Debug, Serialize)]
struct PhaseReport {
    phase: &'static str,
    frames: usize,
    frame: CameraFrame,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Vantage camera demo...");

    let settings = DemoSettings::load();
    let profile = settings.camera_profile();
    profile
        .camera
        .validate()
        .context("Invalid camera configuration")?;
    info!("Camera profile has {} states", profile.states.len());

    let mut physics = PhysicsWorld::new();
    scenario::build_level(&mut physics);

    let mut character = CharacterSnapshot::new(EntityId::new(), Vec3::ZERO);
    character.weapon = Some(WeaponView {
        zoom_fov_offset: Some(10.0),
        has_scope: true,
    });
    let mut body = CharacterBody::new(character.entity);
    body.spawn(&mut physics, character.position);

    let mut camera = CameraController::from_profile(profile);
    camera.snap_behind(&character);

    let dt = settings.simulation.frame_delta();
    anyhow::ensure!(dt > 0.0, "Frame delta must be positive, got {}", dt);
    let viewport = Vec2::new(settings.video.width as f32, settings.video.height as f32);
    let mut reports = Vec::new();
    let mut phase = Some(ScenarioPhase::first());

    while let Some(current) = phase {
        info!("{}", current.description());
        let frames = (current.duration() / dt).ceil().max(1.0) as usize;
        let mut last = None;

        for frame in 0..frames {
            let progress = (frame + 1) as f32 / frames as f32;
            current.apply(&mut character, progress);
            body.set_position(&mut physics, character.position);

            let input = CameraInput {
                look_delta: current.look_delta(progress),
                viewport,
            };
            last = camera.update(Some(&character), &physics, &input, dt);
        }

        let frame = last.context("Camera produced no frame")?;
        info!(
            state = %frame.state,
            fov = frame.fov,
            distance = frame.target_distance,
            "Phase finished"
        );
        reports.push(PhaseReport {
            phase: current.description(),
            frames,
            frame,
        });
        phase = current.next();
    }

    let projection = camera.projection_matrix(settings.video.aspect_ratio());
    info!("Final projection: {:?}", projection);

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
