//! Replay a landmark script through the gesture tracker and object
//! controller, printing what every frame did.
//!
//! ```text
//! pinch_trace [script.json]
//! ```
//!
//! Without a script, the built-in four-frame sample is traced.

use std::time::Duration;

use orbit_control::{ControllerConfig, ObjectController};
use pinch_gesture::{
    GestureCommand, GestureConfig, GestureTracker, LandmarkSample, LandmarkScript, SampleError, ScriptFrame,
};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║               Pinch Gesture Trace                        ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let script = match std::env::args().nth(1) {
        Some(path) => match LandmarkScript::load(&path) {
            Ok(s)  => { println!("  Script: {}  ({} frames)\n", path, s.frames.len()); s }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            println!("  Script: built-in sample\n");
            sample_script()
        }
    };

    let fps = script.fps.unwrap_or(30.0).max(1.0);
    let frame_time = Duration::from_secs_f32(1.0 / fps);

    let mut tracker    = GestureTracker::new(GestureConfig::default());
    let mut controller = ObjectController::new(ControllerConfig::default());

    println!("  {:>5}  {:<7} {:<28} {:>6} {:>8} {:>8} {:>7}",
             "frame", "mode", "command", "scale", "yaw", "pitch", "density");
    println!("  {}", "─".repeat(78));

    for (i, sample) in script.samples().enumerate() {
        let elapsed = frame_time * i as u32;
        let row = match trace_frame(&mut tracker, &mut controller, sample, elapsed) {
            Ok(command) => (tracker.mode().label(), describe(command)),
            Err(e)      => ("-", format!("skipped: {}", e)),
        };

        let t = controller.transform();
        println!("  {:>5}  {:<7} {:<28} {:>6.3} {:>8.3} {:>8.3} {:>7}",
                 i, row.0, row.1,
                 t.scale, t.yaw, t.pitch,
                 controller.density().particles_per_second);
    }
    println!();
    println!("  Idle spin: {}", if controller.idle().is_active() { "running" } else { "stopped" });
    println!();
}

/// Validate one sample and run it through tracker and controller.
/// Degraded samples are rejected before the tracker sees them.
fn trace_frame(
    tracker:    &mut GestureTracker,
    controller: &mut ObjectController,
    sample:     LandmarkSample,
    elapsed:    Duration,
) -> Result<Option<GestureCommand>, SampleError> {
    let sample = sample.map(|h| h.validate()).transpose()?;
    let command = tracker.step(sample);
    match command {
        Some(GestureCommand::Zoom { pinch_distance }) => {
            controller.apply_zoom_target(pinch_distance);
        }
        Some(GestureCommand::Rotate { dx, dy }) => {
            controller.apply_rotation_delta_at(dx, dy, elapsed);
        }
        None => {}
    }
    Ok(command)
}

fn describe(command: Option<GestureCommand>) -> String {
    match command {
        None => "—".to_string(),
        Some(GestureCommand::Zoom { pinch_distance }) =>
            format!("zoom d={:.3}", pinch_distance),
        Some(GestureCommand::Rotate { dx, dy }) =>
            format!("rotate ({:+.3}, {:+.3})", dx, dy),
    }
}

/// No hand, grab, drag, release into an open pinch.
fn sample_script() -> LandmarkScript {
    LandmarkScript {
        fps: Some(30.0),
        frames: vec![
            ScriptFrame::no_hand(),
            ScriptFrame::hand([0.295, 0.30], [0.305, 0.30]),
            ScriptFrame::hand([0.315, 0.31], [0.325, 0.31]),
            ScriptFrame::hand([0.30,  0.50], [0.50,  0.50]),
        ],
    }
}
