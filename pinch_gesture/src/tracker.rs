//! Cross-frame gesture state machine.
//!
//! ```text
//!            grab (baseline)            grab (emit Rotate)
//!   ┌──────┐ ───────────────▶ ┌──────────┐ ◀───────┐
//!   │ IDLE │                  │ GRABBING │ ────────┘
//!   └──────┘ ◀─────────────── └──────────┘
//!      ▲  │   zoom / no hand
//!      └──┘   zoom (emit Zoom) / no hand
//! ```
//!
//! The tracker must see frames in arrival order.  Dropping frames is fine,
//! reordering is not: the rotation delta is always measured against the
//! previous grab frame that was actually processed.

use glam::Vec2;
use log::debug;

use crate::classifier::{classify, Classification, GestureMode};
use crate::config::GestureConfig;
use crate::landmark::LandmarkSample;

/// A control command for the object controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureCommand {
    /// Smooth the object scale toward a target derived from `pinch_distance`.
    Zoom { pinch_distance: f32 },
    /// Add to the object orientation (already scaled by the tracker's
    /// rotation sensitivity).
    Rotate { dx: f32, dy: f32 },
}

/// Whether a grab is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackingState {
    Idle,
    /// `last_midpoint` is the midpoint of the previous grab frame.
    Grabbing { last_midpoint: Vec2 },
}

/// Turns per-frame samples into [`GestureCommand`]s.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    config: GestureConfig,
    state:  TrackingState,
    mode:   GestureMode,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        GestureTracker {
            config,
            state: TrackingState::Idle,
            mode:  GestureMode::Idle,
        }
    }

    pub fn config(&self) -> &GestureConfig { &self.config }
    pub fn state(&self)  -> TrackingState  { self.state }

    /// Mode of the most recently processed frame.
    pub fn mode(&self)   -> GestureMode    { self.mode }

    /// Process one frame.  At most one command is emitted per frame.
    pub fn step(&mut self, sample: LandmarkSample) -> Option<GestureCommand> {
        let Some(hand) = sample else {
            self.reset();
            return None;
        };
        let c = classify(&hand, self.config.grab_threshold);
        self.step_classified(c)
    }

    /// Process a frame that has already been classified.
    pub fn step_classified(&mut self, c: Classification) -> Option<GestureCommand> {
        self.mode = c.mode;
        match c.mode {
            GestureMode::Idle => {
                self.state = TrackingState::Idle;
                None
            }
            GestureMode::Zoom => {
                self.state = TrackingState::Idle;
                Some(GestureCommand::Zoom { pinch_distance: c.pinch_distance })
            }
            GestureMode::Rotate => {
                let previous = std::mem::replace(
                    &mut self.state,
                    TrackingState::Grabbing { last_midpoint: c.midpoint },
                );
                match previous {
                    TrackingState::Idle => {
                        debug!("grab started at ({:.3}, {:.3})", c.midpoint.x, c.midpoint.y);
                        None
                    }
                    TrackingState::Grabbing { last_midpoint } => {
                        let d = (c.midpoint - last_midpoint) * self.config.rotation_sensitivity;
                        Some(GestureCommand::Rotate { dx: d.x, dy: d.y })
                    }
                }
            }
        }
    }

    /// Forget any grab in progress (no hand, or the capture source restarted).
    pub fn reset(&mut self) {
        self.state = TrackingState::Idle;
        self.mode  = GestureMode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::HandLandmarks;
    use approx::assert_relative_eq;

    /// A closed pinch centred on (x, y).
    fn grab(x: f32, y: f32) -> LandmarkSample {
        Some(HandLandmarks::new(Vec2::new(x - 0.005, y), Vec2::new(x + 0.005, y)))
    }

    /// An open pinch of width `d` centred on (0.5, 0.5).
    fn open(d: f32) -> LandmarkSample {
        Some(HandLandmarks::new(Vec2::new(0.5 - d / 2.0, 0.5), Vec2::new(0.5 + d / 2.0, 0.5)))
    }

    fn tracker() -> GestureTracker { GestureTracker::new(GestureConfig::default()) }

    #[test]
    fn starts_idle() {
        let t = tracker();
        assert_eq!(t.state(), TrackingState::Idle);
        assert_eq!(t.mode(), GestureMode::Idle);
    }

    #[test]
    fn first_grab_sets_baseline_only() {
        let mut t = tracker();
        assert_eq!(t.step(grab(0.3, 0.3)), None);
        assert!(matches!(t.state(), TrackingState::Grabbing { .. }));
        assert_eq!(t.mode(), GestureMode::Rotate);
    }

    #[test]
    fn consecutive_grab_emits_scaled_delta() {
        let mut t = tracker();
        t.step(grab(0.3, 0.3));
        match t.step(grab(0.32, 0.31)) {
            Some(GestureCommand::Rotate { dx, dy }) => {
                assert_relative_eq!(dx, 0.04, epsilon = 1e-5);
                assert_relative_eq!(dy, 0.02, epsilon = 1e-5);
            }
            other => panic!("expected rotate, got {:?}", other),
        }
    }

    #[test]
    fn delta_measured_from_previous_grab_frame() {
        let mut t = tracker();
        t.step(grab(0.30, 0.30));
        t.step(grab(0.40, 0.30));
        match t.step(grab(0.45, 0.30)) {
            Some(GestureCommand::Rotate { dx, .. }) => assert_relative_eq!(dx, 0.1, epsilon = 1e-5),
            other => panic!("expected rotate, got {:?}", other),
        }
    }

    #[test]
    fn no_hand_clears_history() {
        let mut t = tracker();
        t.step(grab(0.3, 0.3));
        assert_eq!(t.step(None), None);
        assert_eq!(t.state(), TrackingState::Idle);
        assert_eq!(t.mode(), GestureMode::Idle);
        // Next grab is a fresh baseline again.
        assert_eq!(t.step(grab(0.9, 0.9)), None);
    }

    #[test]
    fn zoom_clears_history_and_emits_distance() {
        let mut t = tracker();
        t.step(grab(0.3, 0.3));
        match t.step(open(0.2)) {
            Some(GestureCommand::Zoom { pinch_distance }) => {
                assert_relative_eq!(pinch_distance, 0.2, epsilon = 1e-5)
            }
            other => panic!("expected zoom, got {:?}", other),
        }
        assert_eq!(t.state(), TrackingState::Idle);
        assert_eq!(t.step(grab(0.35, 0.35)), None);
    }

    #[test]
    fn one_command_per_frame() {
        let mut t = tracker();
        let frames = [None, grab(0.3, 0.3), grab(0.31, 0.3), open(0.3), open(0.1), None, grab(0.2, 0.2)];
        let emitted = frames.iter().filter_map(|f| t.step(*f)).count();
        // grab#2 rotate, two zooms
        assert_eq!(emitted, 3);
    }

    #[test]
    fn idle_classification_resets() {
        let mut t = tracker();
        t.step(grab(0.3, 0.3));
        let c = Classification { pinch_distance: 0.0, midpoint: Vec2::ZERO, mode: GestureMode::Idle };
        assert_eq!(t.step_classified(c), None);
        assert_eq!(t.state(), TrackingState::Idle);
    }

    #[test]
    fn sensitivity_is_configurable() {
        let mut t = GestureTracker::new(GestureConfig { rotation_sensitivity: 1.0, ..GestureConfig::default() });
        t.step(grab(0.3, 0.3));
        match t.step(grab(0.4, 0.3)) {
            Some(GestureCommand::Rotate { dx, dy }) => {
                assert_relative_eq!(dx, 0.1, epsilon = 1e-5);
                assert_relative_eq!(dy, 0.0, epsilon = 1e-6);
            }
            other => panic!("expected rotate, got {:?}", other),
        }
    }
}
