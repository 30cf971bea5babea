//! Startup tunables for the object controller.

use pinch_gesture::ConfigError;

pub const ZOOM_SENSITIVITY:     f32 = 15.0;
pub const LERP_FACTOR:          f32 = 0.1;
pub const MIN_SCALE:            f32 = 0.5;
pub const MAX_SCALE:            f32 = 4.0;
pub const ROTATION_SENSITIVITY: f32 = 5.0;
pub const DENSITY_THRESHOLD:    f32 = 1.0;
pub const HIGH_DENSITY:         u32 = 8000;
pub const LOW_DENSITY:          u32 = 4000;
/// Core birth rate the planet scene is authored with.
pub const INITIAL_DENSITY:      u32 = 5000;
pub const IDLE_PERIOD_SECS:     f32 = 20.0;

/// Configuration for [`ObjectController`](crate::ObjectController).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Pinch distance → target scale multiplier.
    pub zoom_sensitivity:     f32,
    /// Fraction of the remaining distance to the target covered per zoom frame.
    pub lerp_factor:          f32,
    pub min_scale:            f32,
    pub max_scale:            f32,
    /// Rotation command → radians multiplier.
    pub rotation_sensitivity: f32,
    /// Below this scale the planet gets `high_density`, otherwise `low_density`.
    pub density_threshold:    f32,
    pub high_density:         u32,
    pub low_density:          u32,
    /// Density before the first zoom update.
    pub initial_density:      u32,
    pub initial_scale:        f32,
    /// Seconds per full idle revolution.
    pub idle_period_secs:     f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            zoom_sensitivity:     ZOOM_SENSITIVITY,
            lerp_factor:          LERP_FACTOR,
            min_scale:            MIN_SCALE,
            max_scale:            MAX_SCALE,
            rotation_sensitivity: ROTATION_SENSITIVITY,
            density_threshold:    DENSITY_THRESHOLD,
            high_density:         HIGH_DENSITY,
            low_density:          LOW_DENSITY,
            initial_density:      INITIAL_DENSITY,
            initial_scale:        1.0,
            idle_period_secs:     IDLE_PERIOD_SECS,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("zoom sensitivity", self.zoom_sensitivity)?;
        positive("min scale",        self.min_scale)?;
        positive("max scale",        self.max_scale)?;
        positive("idle period",      self.idle_period_secs)?;
        if !(self.lerp_factor > 0.0 && self.lerp_factor <= 1.0) {
            return Err(ConfigError::LerpFactor(self.lerp_factor));
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleRange { min: self.min_scale, max: self.max_scale });
        }
        for (name, value) in [
            ("rotation sensitivity", self.rotation_sensitivity),
            ("density threshold",    self.density_threshold),
            ("initial scale",        self.initial_scale),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
