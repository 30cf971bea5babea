//! Top-level application: the render loop and its wiring to the capture
//! pipeline.
//!
//! `AppState` owns the planet scene and the render-side snapshot reader.
//! Each frame it reads the latest controller snapshot (never waiting on the
//! gesture worker), poses the wrapper node, feeds the density into the core
//! emitter and advances the particles.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use log::info;
use orbit_control::{ObjectController, SceneSnapshot, SnapshotCell, SnapshotReader};
use particle_planet::{PlanetScene, WrapperPose};
use pinch_gesture::GestureMode;

use crate::capture::{ReplaySource, SimCaptureSource, SimInput};
use crate::config::{AppConfig, SourceConfig};
use crate::error::{AppError, CaptureError};
use crate::extractor::SyntheticExtractor;
use crate::hud::{self, Status};
use crate::pipeline::Pipeline;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    planet:        PlanetScene,
    reader:        SnapshotReader,
    /// Set once when the capture pipeline dies; shown in the status line.
    capture_error: Option<String>,
}

impl AppState {
    pub fn new(planet: PlanetScene, cell: Arc<SnapshotCell>) -> Self {
        AppState { planet, reader: SnapshotReader::new(cell), capture_error: None }
    }

    pub fn planet(&self) -> &PlanetScene { &self.planet }

    pub fn capture_error(&self) -> Option<&str> { self.capture_error.as_deref() }

    pub fn report_capture_error(&mut self, e: &CaptureError) {
        self.capture_error = Some(e.to_string());
    }

    /// Advance one render frame.  Returns the snapshot the frame used.
    pub fn tick(&mut self, now: Instant, dt: f32) -> SceneSnapshot {
        let snap = *self.reader.latest();
        self.planet.set_pose(WrapperPose {
            scale: snap.transform.scale,
            yaw:   snap.yaw_at(now),
            pitch: snap.transform.pitch,
        });
        self.planet.set_core_birth_rate(snap.density.particles_per_second);
        self.planet.step(dt);
        snap
    }

    pub fn status_line(&self, snap: &SceneSnapshot, mode: GestureMode, dropped: u64) -> String {
        Status { mode, snapshot: snap, dropped, capture_error: self.capture_error() }.line()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run
// ════════════════════════════════════════════════════════════════════════════

/// Open the window and run until it is closed.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    cfg.validate()?;

    let controller = ObjectController::new(cfg.controller);
    let cell = SnapshotCell::new(controller.snapshot());

    // ── Capture pipeline ──────────────────────────────────────────────────
    let (pipeline, sim_tx, legend) = match &cfg.source {
        SourceConfig::Simulated { fps, latency, failure_every } => {
            let (tx, rx) = mpsc::channel::<SimInput>();
            let pipeline = Pipeline::start(
                SimCaptureSource::new(rx, *fps),
                SyntheticExtractor::new(*latency, *failure_every),
                cfg.gestures,
                controller,
                Arc::clone(&cell),
            )?;
            (pipeline, Some(tx), hud::SIM_LEGEND)
        }
        SourceConfig::Replay { path, fps, looped } => {
            let pipeline = Pipeline::start(
                ReplaySource::new(path.clone(), *fps, *looped),
                SyntheticExtractor::passthrough(),
                cfg.gestures,
                controller,
                Arc::clone(&cell),
            )?;
            (pipeline, None, hud::REPLAY_LEGEND)
        }
    };

    // ── Render side ───────────────────────────────────────────────────────
    let mut app = AppState::new(PlanetScene::new(), cell);
    let result = Visualizer::new(&cfg.window.title, cfg.window.width, cfg.window.height, sim_tx)
        .and_then(|mut vis| render_loop(&mut vis, &mut app, &pipeline, legend));

    // Capture and worker first, the scene last.
    if let Some(c) = pipeline.shutdown() {
        let t = c.transform();
        info!("final transform: scale {:.3}, yaw {:.3}, pitch {:.3}", t.scale, t.yaw, t.pitch);
    }
    drop(app);
    result
}

fn render_loop(vis: &mut Visualizer, app: &mut AppState, pipeline: &Pipeline, legend: &str) -> Result<(), AppError> {
    let mut last = Instant::now();
    while vis.is_open() {
        if !vis.poll_input() { break; }

        if let Some(e) = pipeline.take_capture_error() {
            app.report_capture_error(&e);
        }

        let now = Instant::now();
        let dt  = now.duration_since(last).as_secs_f32();
        last = now;

        let snap   = app.tick(now, dt);
        let stats  = pipeline.stats();
        let status = app.status_line(&snap, stats.mode, pipeline.dropped_frames());
        vis.render(app.planet(), &status, legend)?;
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pinch_gesture::GestureCommand;
    use std::time::Duration;

    fn setup() -> (AppState, ObjectController, Arc<SnapshotCell>) {
        let controller = ObjectController::default();
        let cell = SnapshotCell::new(controller.snapshot());
        let app = AppState::new(PlanetScene::with_seed(7), Arc::clone(&cell));
        (app, controller, cell)
    }

    #[test]
    fn tick_applies_published_scale_and_density() {
        let (mut app, mut controller, cell) = setup();
        for _ in 0..40 {
            controller.apply(GestureCommand::Zoom { pinch_distance: 0.02 });
        }
        cell.publish(controller.snapshot());

        let snap = app.tick(Instant::now(), 1.0 / 60.0);
        assert_relative_eq!(snap.transform.scale, 0.5);
        assert_relative_eq!(app.planet().pose().scale, 0.5);
        assert_eq!(app.planet().core_system().unwrap().get_birth_rate(), 8000.0);
        assert!(app.planet().live_particles() > 0);
    }

    #[test]
    fn idle_spin_shows_up_in_the_pose() {
        let epoch = Instant::now();
        let controller = ObjectController::with_epoch(Default::default(), epoch);
        let cell = SnapshotCell::new(controller.snapshot());
        let mut app = AppState::new(PlanetScene::with_seed(7), cell);

        app.tick(epoch + Duration::from_millis(2500), 0.0);
        assert_relative_eq!(app.planet().pose().yaw, std::f32::consts::FRAC_PI_4, epsilon = 1e-4);
    }

    #[test]
    fn capture_error_reaches_status_line() {
        let (mut app, controller, _cell) = setup();
        assert!(app.capture_error().is_none());
        app.report_capture_error(&CaptureError::PermissionDenied);
        let line = app.status_line(&controller.snapshot(), GestureMode::Idle, 0);
        assert!(line.contains("CAMERA: camera access denied"));
    }
}
