//! Background spin shown until the user first grabs the object.

use std::f32::consts::TAU;
use std::time::Duration;

/// Constant-rate rotation about the vertical axis, active from creation,
/// stopped for good by [`cancel`](IdleRotation::cancel).
///
/// The spin angle is a pure function of time since the object was created,
/// so the render loop can evaluate it every frame without writing back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleRotation {
    period_secs: f32,
    /// Angle the spin had reached when it was cancelled.
    frozen:      Option<f32>,
}

impl IdleRotation {
    pub fn new(period_secs: f32) -> Self {
        IdleRotation { period_secs, frozen: None }
    }

    pub fn is_active(&self) -> bool { self.frozen.is_none() }

    /// Spin angle in `[0, 2π)` at `elapsed` since creation.
    pub fn angle_at(&self, elapsed: Duration) -> f32 {
        match self.frozen {
            Some(angle) => angle,
            None => {
                let turns = (elapsed.as_secs_f64() / self.period_secs as f64).fract();
                (turns as f32) * TAU
            }
        }
    }

    /// Stop spinning, keeping the angle reached at `elapsed`.
    ///
    /// Returns `true` only for the call that actually stopped the spin;
    /// cancelling an already stopped spin changes nothing.
    pub fn cancel(&mut self, elapsed: Duration) -> bool {
        if self.frozen.is_some() {
            return false;
        }
        self.frozen = Some(self.angle_at(elapsed));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn full_turn_per_period() {
        let idle = IdleRotation::new(20.0);
        assert_relative_eq!(idle.angle_at(Duration::ZERO), 0.0);
        assert_relative_eq!(idle.angle_at(Duration::from_secs(5)),  PI / 2.0, epsilon = 1e-5);
        assert_relative_eq!(idle.angle_at(Duration::from_secs(10)), PI,       epsilon = 1e-5);
        // wraps
        assert_relative_eq!(idle.angle_at(Duration::from_secs(25)), PI / 2.0, epsilon = 1e-5);
    }

    #[test]
    fn cancel_freezes_angle() {
        let mut idle = IdleRotation::new(20.0);
        assert!(idle.cancel(Duration::from_secs(5)));
        assert!(!idle.is_active());
        assert_relative_eq!(idle.angle_at(Duration::from_secs(60)), PI / 2.0, epsilon = 1e-5);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut once = IdleRotation::new(20.0);
        once.cancel(Duration::from_secs(3));

        let mut twice = IdleRotation::new(20.0);
        twice.cancel(Duration::from_secs(3));
        assert!(!twice.cancel(Duration::from_secs(9)));

        assert_eq!(once, twice);
    }
}
