//! Single-frame pinch classification.
//!
//! Pure functions only: everything that depends on previous frames lives in
//! [`tracker`](crate::tracker).

use glam::Vec2;

use crate::landmark::HandLandmarks;

/// Control mode of one processed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureMode {
    /// Pinch open: pinch width drives the zoom target.
    Zoom,
    /// Pinch closed (grab): midpoint motion drives rotation.
    Rotate,
    /// No hand in frame.
    Idle,
}

impl GestureMode {
    pub fn label(self) -> &'static str {
        match self {
            GestureMode::Zoom   => "ZOOM",
            GestureMode::Rotate => "ROTATE",
            GestureMode::Idle   => "IDLE",
        }
    }
}

/// Geometry and mode of one frame with both fingertips present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub pinch_distance: f32,
    pub midpoint:       Vec2,
    pub mode:           GestureMode,
}

/// Classify a hand against `grab_threshold`.
///
/// The comparison is strict: a pinch of exactly `grab_threshold` is a zoom.
/// Never returns [`GestureMode::Idle`]; absence of a hand is decided by the
/// caller before classification.
pub fn classify(hand: &HandLandmarks, grab_threshold: f32) -> Classification {
    let pinch_distance = hand.index_tip.distance(hand.thumb_tip);
    let midpoint       = (hand.index_tip + hand.thumb_tip) * 0.5;
    let mode = if pinch_distance < grab_threshold {
        GestureMode::Rotate
    } else {
        GestureMode::Zoom
    };
    Classification { pinch_distance, midpoint, mode }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hand(index: (f32, f32), thumb: (f32, f32)) -> HandLandmarks {
        HandLandmarks::new(Vec2::new(index.0, index.1), Vec2::new(thumb.0, thumb.1))
    }

    #[test]
    fn distance_and_midpoint() {
        let c = classify(&hand((0.3, 0.4), (0.6, 0.8)), 0.06);
        assert_relative_eq!(c.pinch_distance, 0.5, epsilon = 1e-6);
        assert_relative_eq!(c.midpoint.x, 0.45, epsilon = 1e-6);
        assert_relative_eq!(c.midpoint.y, 0.6,  epsilon = 1e-6);
        assert_eq!(c.mode, GestureMode::Zoom);
    }

    #[test]
    fn narrow_pinch_is_rotate() {
        for d in [0.0_f32, 0.01, 0.03, 0.059] {
            let c = classify(&hand((0.5, 0.5), (0.5 + d, 0.5)), 0.06);
            assert_eq!(c.mode, GestureMode::Rotate, "d = {}", d);
        }
    }

    #[test]
    fn wide_pinch_is_zoom() {
        for d in [0.061_f32, 0.1, 0.3, 0.9] {
            let c = classify(&hand((0.0, 0.5), (d, 0.5)), 0.06);
            assert_eq!(c.mode, GestureMode::Zoom, "d = {}", d);
        }
    }

    #[test]
    fn threshold_itself_is_zoom() {
        // Built along the y axis from 0 so the f32 distance is exactly 0.06.
        let c = classify(&hand((0.0, 0.0), (0.0, 0.06)), 0.06);
        assert_eq!(c.pinch_distance, 0.06);
        assert_eq!(c.mode, GestureMode::Zoom);
    }

    #[test]
    fn custom_threshold_respected() {
        let h = hand((0.5, 0.5), (0.58, 0.5));
        assert_eq!(classify(&h, 0.06).mode, GestureMode::Zoom);
        assert_eq!(classify(&h, 0.10).mode, GestureMode::Rotate);
    }
}
