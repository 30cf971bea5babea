//! Capture pipeline end to end: source → queue → worker → snapshot cell.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use hand_orbit::capture::{ReplaySource, SimCaptureSource, SimInput};
use hand_orbit::extractor::SyntheticExtractor;
use hand_orbit::pipeline::Pipeline;
use hand_orbit::CaptureError;
use orbit_control::{ObjectController, SnapshotCell};
use pinch_gesture::{GestureConfig, LandmarkScript, ScriptFrame};

fn write_script(name: &str, fps: f32, frames: Vec<ScriptFrame>) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hand_orbit_{}_{}.json", name, std::process::id()));
    let script = LandmarkScript { fps: Some(fps), frames };
    std::fs::write(&path, serde_json::to_string(&script).unwrap()).unwrap();
    path
}

fn start(source: ReplaySource) -> (Pipeline, Arc<SnapshotCell>) {
    let controller = ObjectController::default();
    let cell = SnapshotCell::new(controller.snapshot());
    let pipeline = Pipeline::start(
        source,
        SyntheticExtractor::passthrough(),
        GestureConfig::default(),
        controller,
        Arc::clone(&cell),
    ).unwrap();
    (pipeline, cell)
}

/// Wait until every one of `frames` was either handled or evicted.
fn wait_for_frames(pipeline: &Pipeline, frames: u64) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let s = pipeline.stats();
        if s.processed + s.skipped + pipeline.dropped_frames() >= frames {
            return;
        }
        assert!(Instant::now() < deadline, "pipeline stalled: {:?}", s);
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn replayed_zoom_reaches_the_snapshot() {
    let zoom = ScriptFrame::hand([0.4, 0.5], [0.6, 0.5]);
    let path = write_script("zoom", 200.0, vec![zoom; 20]);
    let (pipeline, cell) = start(ReplaySource::new(&path, None, false));
    wait_for_frames(&pipeline, 20);

    let snap = cell.load();
    let stats = pipeline.stats();
    assert_eq!(snap.updates, stats.processed);
    assert!(snap.transform.scale > 1.0 && snap.transform.scale < 3.0);
    assert_eq!(snap.density.particles_per_second, 4000);
    assert!(snap.idle.is_active());

    let controller = pipeline.shutdown().unwrap();
    assert_eq!(controller.transform(), snap.transform);
    std::fs::remove_file(path).ok();
}

#[test]
fn replayed_grab_rotates_and_stops_idle_spin() {
    // 200 ms between frames: the worker always takes a frame before the
    // next one arrives, so the grab baseline is never evicted.
    let path = write_script("grab", 5.0, vec![
        ScriptFrame::no_hand(),
        ScriptFrame::hand([0.295, 0.30], [0.305, 0.30]),
        ScriptFrame::hand([0.315, 0.31], [0.325, 0.31]),
    ]);
    let (pipeline, cell) = start(ReplaySource::new(&path, None, false));
    wait_for_frames(&pipeline, 3);

    let snap = cell.load();
    assert_eq!(pipeline.dropped_frames(), 0);
    assert_eq!(pipeline.stats().processed, 3);
    assert_relative_eq!(snap.transform.yaw,   0.2, epsilon = 1e-4);
    assert_relative_eq!(snap.transform.pitch, 0.1, epsilon = 1e-4);
    assert!(!snap.idle.is_active());
    assert_eq!(snap.transform.scale, 1.0);
    assert_eq!(snap.updates, 1);
    pipeline.shutdown();
    std::fs::remove_file(path).ok();
}

#[test]
fn missing_script_is_reported_once() {
    let (pipeline, cell) = start(ReplaySource::new("/nonexistent/hand_orbit.json", None, false));

    let deadline = Instant::now() + Duration::from_secs(5);
    let err = loop {
        if let Some(e) = pipeline.take_capture_error() {
            break e;
        }
        assert!(Instant::now() < deadline, "no capture error reported");
        thread::sleep(Duration::from_millis(5));
    };
    assert!(matches!(err, CaptureError::Script(_)));
    assert!(pipeline.take_capture_error().is_none());

    // The render side still has the initial snapshot to draw.
    assert_eq!(cell.load().updates, 0);
    assert_eq!(cell.load().transform.scale, 1.0);
    pipeline.shutdown();
}

#[test]
fn slow_extractor_drops_frames_instead_of_queueing() {
    let (input_tx, input_rx) = mpsc::channel::<SimInput>();
    let controller = ObjectController::default();
    let cell = SnapshotCell::new(controller.snapshot());
    let pipeline = Pipeline::start(
        SimCaptureSource::new(input_rx, 200.0),
        SyntheticExtractor::new(Duration::from_millis(30), None),
        GestureConfig::default(),
        controller,
        Arc::clone(&cell),
    ).unwrap();

    thread::sleep(Duration::from_millis(400));
    let stats = pipeline.stats();
    assert!(pipeline.dropped_frames() > 0);
    // At 30 ms per frame the worker can't have seen more than ~14 frames.
    assert!(stats.processed < 20, "{:?}", stats);

    drop(input_tx);
    pipeline.shutdown();
}

#[test]
fn shutdown_is_prompt_and_final() {
    let (input_tx, input_rx) = mpsc::channel::<SimInput>();
    let controller = ObjectController::default();
    let cell = SnapshotCell::new(controller.snapshot());
    let pipeline = Pipeline::start(
        SimCaptureSource::new(input_rx, 60.0),
        SyntheticExtractor::passthrough(),
        GestureConfig::default(),
        controller,
        Arc::clone(&cell),
    ).unwrap();
    thread::sleep(Duration::from_millis(50));

    let started = Instant::now();
    assert!(pipeline.shutdown().is_some());
    assert!(started.elapsed() < Duration::from_secs(1));

    // Nothing is published after teardown, even with input still arriving.
    let before = cell.load();
    let _ = input_tx.send(SimInput::Spread(0.1));
    thread::sleep(Duration::from_millis(50));
    assert_eq!(cell.load(), before);
}

#[test]
fn invalid_gesture_config_is_rejected_at_start() {
    let controller = ObjectController::default();
    let cell = SnapshotCell::new(controller.snapshot());
    let bad = GestureConfig { grab_threshold: 0.0, ..GestureConfig::default() };
    let result = Pipeline::start(
        ReplaySource::new("unused.json", None, false),
        SyntheticExtractor::passthrough(),
        bad,
        controller,
        cell,
    );
    assert!(result.is_err());
}
