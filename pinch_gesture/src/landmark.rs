//! Per-frame landmark samples delivered by a landmark extractor.

use glam::Vec2;

use crate::error::SampleError;

/// The two fingertips the control loop looks at.
///
/// Points are in normalized frame coordinates: origin bottom-left of the
/// mirrored image, x right, y up, `[0, 1]` per axis.  Values slightly
/// outside the unit square are tolerated; extractors report fingertips
/// partly out of frame that way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks {
    pub index_tip: Vec2,
    pub thumb_tip: Vec2,
}

/// One processed frame: a detected hand, or `None` when no hand (or not
/// both fingertips) was found.
pub type LandmarkSample = Option<HandLandmarks>;

impl HandLandmarks {
    pub fn new(index_tip: Vec2, thumb_tip: Vec2) -> Self {
        HandLandmarks { index_tip, thumb_tip }
    }

    /// Reject samples that would poison the controller with NaN/inf.
    pub fn validate(self) -> Result<Self, SampleError> {
        for (landmark, p) in [("index tip", self.index_tip), ("thumb tip", self.thumb_tip)] {
            if !p.is_finite() {
                return Err(SampleError::NonFinite { landmark, x: p.x, y: p.y });
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_sample_passes() {
        let h = HandLandmarks::new(Vec2::new(0.4, 0.5), Vec2::new(0.45, 0.5));
        assert_eq!(h.validate(), Ok(h));
    }

    #[test]
    fn nan_index_tip_rejected() {
        let h = HandLandmarks::new(Vec2::new(f32::NAN, 0.5), Vec2::new(0.45, 0.5));
        match h.validate() {
            Err(SampleError::NonFinite { landmark, .. }) => assert_eq!(landmark, "index tip"),
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }

    #[test]
    fn infinite_thumb_tip_rejected() {
        let h = HandLandmarks::new(Vec2::new(0.4, 0.5), Vec2::new(0.45, f32::INFINITY));
        assert!(h.validate().is_err());
    }

    #[test]
    fn slightly_out_of_frame_is_tolerated() {
        let h = HandLandmarks::new(Vec2::new(-0.02, 1.01), Vec2::new(0.05, 0.98));
        assert!(h.validate().is_ok());
    }
}
