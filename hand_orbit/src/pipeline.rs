//! Thread wiring for the capture side: one capture thread, one gesture
//! worker, a drop-oldest queue between them and a snapshot cell out.
//!
//! ```text
//!   CaptureSource ──▶ [latest frame] ──▶ GestureWorker ──▶ SnapshotCell ──▶ render loop
//!       thread            queue             thread           (try_lock)
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver};
use log::{error, info};
use orbit_control::{ObjectController, SnapshotCell};
use pinch_gesture::{GestureConfig, GestureTracker};

use crate::capture::{CaptureSource, Liveness};
use crate::error::{AppError, CaptureError};
use crate::extractor::LandmarkExtractor;
use crate::frame_queue::{latest_frame_queue, DroppedCounter};
use crate::worker::{GestureWorker, PipelineStats, StatsSnapshot};

pub struct Pipeline {
    source:  String,
    live:    Liveness,
    capture: Option<JoinHandle<()>>,
    worker:  Option<JoinHandle<ObjectController>>,
    stats:   Arc<PipelineStats>,
    dropped: DroppedCounter,
    /// Carries at most one fatal capture error.
    status:  Receiver<CaptureError>,
}

impl Pipeline {
    /// Spawn the capture thread and the gesture worker.
    ///
    /// `controller` moves to the worker, which becomes its only writer; the
    /// render side sees it through `cell`.
    pub fn start<S, X>(
        source:     S,
        extractor:  X,
        gestures:   GestureConfig,
        controller: ObjectController,
        cell:       Arc<SnapshotCell>,
    ) -> Result<Pipeline, AppError>
    where
        S: CaptureSource,
        X: LandmarkExtractor<Frame = S::Frame>,
    {
        gestures.validate()?;
        controller.config().validate()?;

        let live = Liveness::new();
        let (frames_tx, frames_rx) = latest_frame_queue::<S::Frame>();
        let dropped = frames_rx.dropped_counter();
        let (status_tx, status) = bounded::<CaptureError>(1);
        let name = source.name().to_string();

        let worker = GestureWorker::new(
            frames_rx,
            extractor,
            GestureTracker::new(gestures),
            controller,
            cell,
            live.clone(),
        );
        let stats = worker.stats();

        let capture_live = live.clone();
        let capture_name = name.clone();
        let capture = thread::Builder::new()
            .name("capture".into())
            .spawn(move || {
                if let Err(e) = Box::new(source).run(frames_tx, capture_live) {
                    error!("{} stopped: {}", capture_name, e);
                    let _ = status_tx.try_send(e);
                }
            })
            .map_err(|source| AppError::Spawn { name: "capture", source })?;

        let worker = match thread::Builder::new()
            .name("gesture".into())
            .spawn(move || worker.run())
        {
            Ok(handle) => handle,
            Err(source) => {
                live.shut_down();
                let _ = capture.join();
                return Err(AppError::Spawn { name: "gesture", source });
            }
        };

        info!("capture pipeline started ({})", name);
        Ok(Pipeline {
            source: name,
            live,
            capture: Some(capture),
            worker: Some(worker),
            stats,
            dropped,
            status,
        })
    }

    pub fn stats(&self) -> StatsSnapshot { self.stats.snapshot() }

    /// Frames evicted from the queue before the worker got to them.
    pub fn dropped_frames(&self) -> u64 { self.dropped.get() }

    /// The fatal capture error, the first time it is asked for after it
    /// happened; `None` otherwise.
    pub fn take_capture_error(&self) -> Option<CaptureError> {
        self.status.try_recv().ok()
    }

    /// Stop capture first, then the worker.  Returns the controller's final
    /// state, or `None` if the worker panicked.
    pub fn shutdown(mut self) -> Option<ObjectController> {
        self.stop()
    }

    fn stop(&mut self) -> Option<ObjectController> {
        self.live.shut_down();
        if let Some(h) = self.capture.take() {
            if h.join().is_err() {
                error!("capture thread panicked");
            }
        }
        let controller = self.worker.take().and_then(|h| match h.join() {
            Ok(c)  => Some(c),
            Err(_) => {
                error!("gesture worker panicked");
                None
            }
        });
        info!("capture pipeline stopped ({})", self.source);
        controller
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        if self.capture.is_some() || self.worker.is_some() {
            self.stop();
        }
    }
}
