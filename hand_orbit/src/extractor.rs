//! Landmark extraction: frame in, fingertip pair (or nothing) out.
//!
//! Real hand-landmark inference plugs in behind [`LandmarkExtractor`].  The
//! built-in [`SyntheticExtractor`] reads the landmarks carried by a
//! [`SyntheticFrame`] and can imitate a slow or flaky model.

use std::thread;
use std::time::Duration;

use pinch_gesture::LandmarkSample;

use crate::capture::SyntheticFrame;
use crate::error::ExtractError;

pub trait LandmarkExtractor: Send + 'static {
    type Frame: Send + 'static;

    /// Find the index and thumb tips in `frame`.  `Ok(None)` means no hand.
    fn extract(&mut self, frame: &Self::Frame) -> Result<LandmarkSample, ExtractError>;
}

/// Extractor for frames that already carry their landmarks.
#[derive(Clone, Debug, Default)]
pub struct SyntheticExtractor {
    /// Simulated inference time per frame.
    latency:       Duration,
    /// Fail every n-th frame (by sequence number), if set.
    failure_every: Option<u64>,
}

impl SyntheticExtractor {
    pub fn new(latency: Duration, failure_every: Option<u64>) -> Self {
        SyntheticExtractor { latency, failure_every: failure_every.filter(|&n| n > 0) }
    }

    /// No latency, no failures.
    pub fn passthrough() -> Self { Self::default() }
}

impl LandmarkExtractor for SyntheticExtractor {
    type Frame = SyntheticFrame;

    fn extract(&mut self, frame: &SyntheticFrame) -> Result<LandmarkSample, ExtractError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        if let Some(n) = self.failure_every {
            if (frame.seq + 1) % n == 0 {
                return Err(ExtractError::Inference {
                    seq:    frame.seq,
                    reason: "injected failure".to_string(),
                });
            }
        }
        Ok(frame.landmarks.to_sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinch_gesture::ScriptFrame;
    use std::time::Instant;

    fn frame(seq: u64, landmarks: ScriptFrame) -> SyntheticFrame {
        SyntheticFrame { seq, captured_at: Instant::now(), landmarks }
    }

    #[test]
    fn passthrough_returns_carried_landmarks() {
        let mut x = SyntheticExtractor::passthrough();
        let hand = ScriptFrame::hand([0.4, 0.5], [0.6, 0.5]);
        assert_eq!(x.extract(&frame(0, hand)).unwrap(), hand.to_sample());
        assert_eq!(x.extract(&frame(1, ScriptFrame::no_hand())).unwrap(), None);
    }

    #[test]
    fn injected_failures_hit_every_nth_frame() {
        let mut x = SyntheticExtractor::new(Duration::ZERO, Some(3));
        let hand = ScriptFrame::hand([0.4, 0.5], [0.6, 0.5]);
        let failed: Vec<u64> = (0..9)
            .filter(|&seq| x.extract(&frame(seq, hand)).is_err())
            .collect();
        assert_eq!(failed, vec![2, 5, 8]);
    }

    #[test]
    fn zero_failure_interval_disables_failures() {
        let mut x = SyntheticExtractor::new(Duration::ZERO, Some(0));
        let hand = ScriptFrame::hand([0.4, 0.5], [0.6, 0.5]);
        assert!((0..10).all(|seq| x.extract(&frame(seq, hand)).is_ok()));
    }

    #[test]
    fn latency_is_applied() {
        let mut x = SyntheticExtractor::new(Duration::from_millis(15), None);
        let start = Instant::now();
        x.extract(&frame(0, ScriptFrame::no_hand())).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
