//! The gesture worker: extraction, classification, tracking and control,
//! on the capture side of the pipeline.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use log::{debug, info, warn};
use orbit_control::{ObjectController, SnapshotCell};
use pinch_gesture::{GestureMode, GestureTracker, LandmarkSample};

use crate::capture::Liveness;
use crate::extractor::LandmarkExtractor;
use crate::frame_queue::FrameReceiver;

/// How long the worker waits for a frame before re-checking liveness.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ════════════════════════════════════════════════════════════════════════════
// PipelineStats
// ════════════════════════════════════════════════════════════════════════════

/// Counters shared between the worker and whoever displays them.
#[derive(Debug)]
pub struct PipelineStats {
    processed: AtomicU64,
    skipped:   AtomicU64,
    failures:  AtomicU64,
    mode:      AtomicU8,
}

/// Point-in-time copy of [`PipelineStats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Frames that made it through the tracker and, if they moved the
    /// object, into the snapshot cell.
    pub processed: u64,
    /// Frames rejected as degraded input.
    pub skipped:   u64,
    /// Frames the extractor failed on.
    pub failures:  u64,
    /// Mode of the last processed frame.
    pub mode:      GestureMode,
}

impl Default for PipelineStats {
    fn default() -> Self {
        PipelineStats {
            processed: AtomicU64::new(0),
            skipped:   AtomicU64::new(0),
            failures:  AtomicU64::new(0),
            mode:      AtomicU8::new(encode_mode(GestureMode::Idle)),
        }
    }
}

impl PipelineStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            processed: self.processed.load(Ordering::Acquire),
            skipped:   self.skipped.load(Ordering::Relaxed),
            failures:  self.failures.load(Ordering::Relaxed),
            mode:      decode_mode(self.mode.load(Ordering::Relaxed)),
        }
    }
}

fn encode_mode(mode: GestureMode) -> u8 {
    match mode {
        GestureMode::Idle   => 0,
        GestureMode::Zoom   => 1,
        GestureMode::Rotate => 2,
    }
}

fn decode_mode(v: u8) -> GestureMode {
    match v {
        1 => GestureMode::Zoom,
        2 => GestureMode::Rotate,
        _ => GestureMode::Idle,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureWorker
// ════════════════════════════════════════════════════════════════════════════

/// Outcome of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The frame went through the tracker (and maybe moved the object).
    Processed,
    /// Degraded input; the frame was ignored.
    Skipped,
    /// Liveness went down; nothing was applied.
    Stopped,
}

pub struct GestureWorker<X: LandmarkExtractor> {
    frames:     FrameReceiver<X::Frame>,
    extractor:  X,
    tracker:    GestureTracker,
    controller: ObjectController,
    cell:       Arc<SnapshotCell>,
    live:       Liveness,
    stats:      Arc<PipelineStats>,
}

impl<X: LandmarkExtractor> GestureWorker<X> {
    pub fn new(
        frames:     FrameReceiver<X::Frame>,
        extractor:  X,
        tracker:    GestureTracker,
        controller: ObjectController,
        cell:       Arc<SnapshotCell>,
        live:       Liveness,
    ) -> Self {
        GestureWorker {
            frames,
            extractor,
            tracker,
            controller,
            cell,
            live,
            stats: Arc::new(PipelineStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<PipelineStats> { Arc::clone(&self.stats) }

    /// Process frames until liveness goes down or the capture side hangs
    /// up.  Returns the controller in its final state.
    pub fn run(mut self) -> ObjectController {
        info!("gesture worker started");
        while self.live.is_alive() {
            match self.frames.recv_timeout(POLL_INTERVAL) {
                Ok(frame) => {
                    if self.process(&frame) == Step::Stopped {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout)      => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        let s = self.stats.snapshot();
        info!("gesture worker stopped: {} processed, {} skipped, {} extractor failures, {} dropped",
              s.processed, s.skipped, s.failures, self.frames.dropped());
        self.controller
    }

    /// Run one frame through extractor, tracker and controller.
    pub fn process(&mut self, frame: &X::Frame) -> Step {
        let sample: LandmarkSample = match self.extractor.extract(frame) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("{}; treating frame as no hand", e);
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                None
            }
        };

        let sample = match sample.map(|h| h.validate()).transpose() {
            Ok(sample) => sample,
            Err(e) => {
                debug!("skipping frame: {}", e);
                self.stats.skipped.fetch_add(1, Ordering::Relaxed);
                return Step::Skipped;
            }
        };

        let command = self.tracker.step(sample);
        self.stats.mode.store(encode_mode(self.tracker.mode()), Ordering::Relaxed);

        if !self.live.is_alive() {
            return Step::Stopped;
        }
        if let Some(command) = command {
            debug!("{:?}", command);
            if self.controller.apply(command) {
                self.cell.publish(self.controller.snapshot());
            }
        }
        // Counted only once the frame's result is visible in the cell.
        self.stats.processed.fetch_add(1, Ordering::Release);
        Step::Processed
    }
}
