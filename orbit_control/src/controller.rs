//! Applies gesture commands to the manipulated object.

use std::time::{Duration, Instant};

use log::{debug, info};
use pinch_gesture::GestureCommand;

use crate::config::ControllerConfig;
use crate::idle::IdleRotation;
use crate::publish::SceneSnapshot;
use crate::transform::{Density, ObjectTransform};

// ════════════════════════════════════════════════════════════════════════════
// ObjectController
// ════════════════════════════════════════════════════════════════════════════

/// Sole owner of the object's transform, density and idle spin.
///
/// Zoom updates are smoothed per *zoom frame*, not per render frame: the
/// scale only moves when a frame classified as zoom is processed.
#[derive(Clone, Debug)]
pub struct ObjectController {
    config:    ControllerConfig,
    transform: ObjectTransform,
    density:   Density,
    idle:      IdleRotation,
    /// Object creation time; idle spin angles are measured from here.
    epoch:     Instant,
    /// Number of commands that changed the object.
    updates:   u64,
}

impl ObjectController {
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_epoch(config, Instant::now())
    }

    pub fn with_epoch(config: ControllerConfig, epoch: Instant) -> Self {
        let scale = config.initial_scale.clamp(config.min_scale, config.max_scale);
        ObjectController {
            transform: ObjectTransform::with_scale(scale),
            density:   Density { particles_per_second: config.initial_density },
            idle:      IdleRotation::new(config.idle_period_secs),
            epoch,
            updates:   0,
            config,
        }
    }

    pub fn config(&self)    -> &ControllerConfig { &self.config }
    pub fn transform(&self) -> ObjectTransform   { self.transform }
    pub fn density(&self)   -> Density           { self.density }
    pub fn idle(&self)      -> IdleRotation      { self.idle }
    pub fn epoch(&self)     -> Instant           { self.epoch }

    /// Apply one tracker command.  Returns `false` if the command was
    /// rejected as degraded input and nothing changed.
    pub fn apply(&mut self, command: GestureCommand) -> bool {
        match command {
            GestureCommand::Zoom { pinch_distance } => self.apply_zoom_target(pinch_distance),
            GestureCommand::Rotate { dx, dy }       => self.apply_rotation_delta(dx, dy),
        }
    }

    /// Smooth the scale toward `pinch_distance × zoom_sensitivity`, clamp it,
    /// and step the density on the clamped scale.
    pub fn apply_zoom_target(&mut self, pinch_distance: f32) -> bool {
        if !(pinch_distance.is_finite() && pinch_distance >= 0.0) {
            debug!("ignoring zoom with pinch distance {}", pinch_distance);
            return false;
        }
        let c       = &self.config;
        let target  = pinch_distance * c.zoom_sensitivity;
        let current = self.transform.scale;
        let next    = current + (target - current) * c.lerp_factor;
        let clamped = next.clamp(c.min_scale, c.max_scale);

        self.transform.scale = clamped;
        self.density = Density::for_scale(clamped, c.density_threshold, c.high_density, c.low_density);
        self.updates += 1;
        true
    }

    /// Rotate by a tracker delta, stopping the idle spin first.
    pub fn apply_rotation_delta(&mut self, dx: f32, dy: f32) -> bool {
        let elapsed = self.epoch.elapsed();
        self.apply_rotation_delta_at(dx, dy, elapsed)
    }

    /// [`apply_rotation_delta`](Self::apply_rotation_delta) at an explicit
    /// time since the object was created.
    pub fn apply_rotation_delta_at(&mut self, dx: f32, dy: f32, elapsed: Duration) -> bool {
        if !(dx.is_finite() && dy.is_finite()) {
            debug!("ignoring rotation delta ({}, {})", dx, dy);
            return false;
        }
        if self.idle.cancel(elapsed) {
            info!("idle rotation stopped at {:.3} rad", self.idle.angle_at(elapsed));
        }
        let s = self.config.rotation_sensitivity;
        self.transform.yaw   += dx * s;
        self.transform.pitch += dy * s;
        self.updates += 1;
        true
    }

    /// Everything the render loop needs, as one value.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            transform: self.transform,
            density:   self.density,
            idle:      self.idle,
            epoch:     self.epoch,
            updates:   self.updates,
        }
    }
}

impl Default for ObjectController {
    fn default() -> Self { ObjectController::new(ControllerConfig::default()) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
