//! Startup tunables for classification and tracking.

use crate::error::ConfigError;

/// Pinch width (normalized units) below which the hand counts as grabbing.
pub const GRAB_THRESHOLD: f32 = 0.06;

/// Multiplier applied to the midpoint displacement of consecutive grab frames.
///
/// The object controller applies its own rotation multiplier on top of this
/// one; see `orbit_control::ControllerConfig::rotation_sensitivity`.
pub const ROTATION_SENSITIVITY: f32 = 2.0;

/// Configuration for [`GestureTracker`](crate::GestureTracker).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Strictly-below this pinch distance the frame is a grab (rotate).
    pub grab_threshold:       f32,
    /// Scales midpoint deltas into rotation commands.
    pub rotation_sensitivity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            grab_threshold:       GRAB_THRESHOLD,
            rotation_sensitivity: ROTATION_SENSITIVITY,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grab_threshold.is_finite() && self.grab_threshold > 0.0) {
            return Err(ConfigError::NotPositive {
                name:  "grab threshold",
                value: self.grab_threshold,
            });
        }
        if !self.rotation_sensitivity.is_finite() {
            return Err(ConfigError::NotFinite {
                name:  "rotation sensitivity",
                value: self.rotation_sensitivity,
            });
        }
        Ok(())
    }
}
