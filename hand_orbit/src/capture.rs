//! Frame sources.
//!
//! The public interface is [`CaptureSource`]: something that runs on its own
//! thread and offers frames to a [`FrameSender`] at its own cadence until
//! the pipeline's [`Liveness`] flag goes down.  The gesture worker doesn't
//! know whether frames come from the simulated camera or a recorded script.
//!
//! Every source delivers frames already normalized for orientation and
//! mirroring: landmark coordinates are `[0, 1]` with the origin bottom-left
//! of the mirrored image, x right, y up.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::info;
use pinch_gesture::{LandmarkScript, ScriptFrame};

use crate::error::CaptureError;
use crate::frame_queue::FrameSender;

// ════════════════════════════════════════════════════════════════════════════
// Liveness
// ════════════════════════════════════════════════════════════════════════════

/// Shared "keep running" flag.  Once cleared it never comes back.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self { Liveness(Arc::new(AtomicBool::new(true))) }

    pub fn is_alive(&self) -> bool { self.0.load(Ordering::Acquire) }

    pub fn shut_down(&self) { self.0.store(false, Ordering::Release); }
}

impl Default for Liveness {
    fn default() -> Self { Liveness::new() }
}

// ════════════════════════════════════════════════════════════════════════════
// Frames and the CaptureSource trait
// ════════════════════════════════════════════════════════════════════════════

/// A frame whose "image" is the landmark pair itself.
///
/// Stands in for camera pixels in simulation and replay; the extractor for
/// these frames only has to validate and time them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticFrame {
    pub seq:         u64,
    pub captured_at: Instant,
    pub landmarks:   ScriptFrame,
}

/// Anything that can deliver frames to the gesture pipeline.
pub trait CaptureSource: Send + 'static {
    type Frame: Send + 'static;

    /// Human-readable name for logs and the HUD.
    fn name(&self) -> &str;

    /// Deliver frames until `live` is cleared or the consumer goes away.
    /// An `Err` means the source could not (or can no longer) deliver frames.
    fn run(self: Box<Self>, frames: FrameSender<Self::Frame>, live: Liveness) -> Result<(), CaptureError>;
}

/// Fixed-rate frame clock.
struct Cadence {
    interval: Duration,
    next:     Instant,
}

impl Cadence {
    fn new(fps: f32) -> Self {
        let interval = Duration::from_secs_f32(1.0 / fps.clamp(1.0, 240.0));
        Cadence { interval, next: Instant::now() }
    }

    /// Sleep until the next frame is due.
    fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        }
        // Don't try to catch up after a stall.
        self.next = self.next.max(now) + self.interval;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimCaptureSource: the visualizer window stands in for the camera
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer position in normalized image coordinates (y up).
    Pointer { x: f32, y: f32 },
    /// Pinch closed (grab) or open.
    Pinch(bool),
    /// Widen (positive) or narrow (negative) the open pinch.
    Spread(f32),
    /// Toggle whether a hand is in frame.
    ToggleHand,
}

/// Open pinch width the simulated hand starts with.
pub const SIM_OPEN_SPREAD:   f32 = 1.0 / 15.0;
/// Pinch width while grabbing; well under the grab threshold.
pub const SIM_CLOSED_SPREAD: f32 = 0.02;
const SIM_SPREAD_RANGE: (f32, f32) = (0.065, 0.3);

/// Simulated hand state driven by [`SimInput`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimHand {
    pub midpoint: [f32; 2],
    pub pinched:  bool,
    pub spread:   f32,
    pub visible:  bool,
}

impl Default for SimHand {
    fn default() -> Self {
        SimHand { midpoint: [0.5, 0.5], pinched: false, spread: SIM_OPEN_SPREAD, visible: true }
    }
}

impl SimHand {
    pub fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pointer { x, y } => self.midpoint = [x, y],
            SimInput::Pinch(p)         => self.pinched = p,
            SimInput::Spread(d)        => {
                self.spread = (self.spread + d).clamp(SIM_SPREAD_RANGE.0, SIM_SPREAD_RANGE.1)
            }
            SimInput::ToggleHand       => self.visible = !self.visible,
        }
    }

    /// Index and thumb tips placed symmetrically about the midpoint.
    pub fn landmarks(&self) -> ScriptFrame {
        if !self.visible {
            return ScriptFrame::no_hand();
        }
        let half = if self.pinched { SIM_CLOSED_SPREAD } else { self.spread } * 0.5;
        let [x, y] = self.midpoint;
        ScriptFrame::hand([x, y + half], [x, y - half])
    }
}

pub struct SimCaptureSource {
    inputs: Receiver<SimInput>,
    fps:    f32,
    hand:   SimHand,
}

impl SimCaptureSource {
    pub fn new(inputs: Receiver<SimInput>, fps: f32) -> Self {
        SimCaptureSource { inputs, fps, hand: SimHand::default() }
    }
}

impl CaptureSource for SimCaptureSource {
    type Frame = SyntheticFrame;

    fn name(&self) -> &str { "simulated camera" }

    fn run(mut self: Box<Self>, frames: FrameSender<SyntheticFrame>, live: Liveness) -> Result<(), CaptureError> {
        info!("simulated camera running at {} fps", self.fps);
        let mut cadence = Cadence::new(self.fps);
        let mut seq = 0u64;

        while live.is_alive() {
            loop {
                match self.inputs.try_recv() {
                    Ok(input)                       => self.hand.apply(input),
                    Err(TryRecvError::Empty)        => break,
                    Err(TryRecvError::Disconnected) => return Ok(()),
                }
            }

            let frame = SyntheticFrame { seq, captured_at: Instant::now(), landmarks: self.hand.landmarks() };
            if frames.send(frame).is_err() {
                return Ok(());
            }
            seq += 1;
            cadence.wait();
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ReplaySource: a recorded landmark script
// ════════════════════════════════════════════════════════════════════════════

/// Plays a [`LandmarkScript`] file as if it were a camera.
///
/// A script that can't be loaded is this source's "device unavailable".
pub struct ReplaySource {
    path:   PathBuf,
    /// Overrides the script's own rate.
    fps:    Option<f32>,
    looped: bool,
}

/// Frame rate used when neither the caller nor the script specifies one.
pub const DEFAULT_REPLAY_FPS: f32 = 30.0;

impl ReplaySource {
    pub fn new<P: Into<PathBuf>>(path: P, fps: Option<f32>, looped: bool) -> Self {
        ReplaySource { path: path.into(), fps, looped }
    }
}

impl CaptureSource for ReplaySource {
    type Frame = SyntheticFrame;

    fn name(&self) -> &str { "landmark replay" }

    fn run(self: Box<Self>, frames: FrameSender<SyntheticFrame>, live: Liveness) -> Result<(), CaptureError> {
        let script = LandmarkScript::load(&self.path)?;
        let fps = self.fps.or(script.fps).unwrap_or(DEFAULT_REPLAY_FPS);
        info!("replaying {} ({} frames at {} fps{})",
              self.path.display(), script.frames.len(), fps,
              if self.looped { ", looped" } else { "" });

        let mut cadence = Cadence::new(fps);
        let mut seq = 0u64;
        loop {
            for landmarks in &script.frames {
                if !live.is_alive() {
                    return Ok(());
                }
                let frame = SyntheticFrame { seq, captured_at: Instant::now(), landmarks: *landmarks };
                if frames.send(frame).is_err() {
                    return Ok(());
                }
                seq += 1;
                cadence.wait();
            }
            if !self.looped {
                info!("replay finished after {} frames", seq);
                return Ok(());
            }
            // The jump from the last frame back to the first is not hand
            // motion; break any grab in progress.
            let gap = SyntheticFrame { seq, captured_at: Instant::now(), landmarks: ScriptFrame::no_hand() };
            if frames.send(gap).is_err() {
                return Ok(());
            }
            seq += 1;
            cadence.wait();
        }
    }
}
