//! Application configuration and command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use log::warn;
use orbit_control::ControllerConfig;
use pinch_gesture::{ConfigError, GestureConfig};

use crate::error::AppError;

pub const DEFAULT_CAPTURE_FPS: f32 = 30.0;
const FPS_RANGE: (f32, f32) = (1.0, 240.0);

pub const USAGE: &str = "\
usage: hand_orbit [options]

  --quick                  skip the gesture guide and open the window at once
  --replay <file>          play a recorded landmark script instead of the
                           simulated camera
  --loop                   loop the replayed script
  --fps <n>                capture frames per second (default 30)
  --latency-ms <n>         simulated landmark inference time per frame
  --fail-every <n>         make every n-th landmark extraction fail
  --grab-threshold <d>     pinch width below which the hand grabs (default 0.06)
  --zoom-sensitivity <k>   pinch width to target scale multiplier (default 15)
  --help                   show this message";

// ════════════════════════════════════════════════════════════════════════════
// Config types
// ════════════════════════════════════════════════════════════════════════════

/// Where frames come from.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceConfig {
    /// The window stands in for the camera.
    Simulated {
        fps:           f32,
        /// Artificial extractor latency per frame.
        latency:       Duration,
        failure_every: Option<u64>,
    },
    /// A recorded landmark script.
    Replay {
        path:   PathBuf,
        /// Overrides the script's own rate.
        fps:    Option<f32>,
        looped: bool,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Simulated { fps: DEFAULT_CAPTURE_FPS, latency: Duration::ZERO, failure_every: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub title:  String,
    pub width:  usize,
    pub height: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title:  "Hand Orbit - pinch to zoom, grab to rotate".to_string(),
            width:  crate::visualizer::WIN_W,
            height: crate::visualizer::WIN_H,
        }
    }
}

/// Configuration for the full application.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppConfig {
    pub gestures:   GestureConfig,
    pub controller: ControllerConfig,
    pub source:     SourceConfig,
    pub window:     WindowConfig,
    /// Skip the printed gesture guide.
    pub quick:      bool,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.gestures.validate()?;
        self.controller.validate()?;
        let fps = match &self.source {
            SourceConfig::Simulated { fps, .. } => Some(*fps),
            SourceConfig::Replay { fps, .. }    => *fps,
        };
        if let Some(fps) = fps {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(ConfigError::NotPositive { name: "fps", value: fps }.into());
            }
        }
        Ok(())
    }

    /// Parse command-line arguments (without the program name).
    pub fn from_args<I, S>(args: I) -> Result<AppConfig, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cfg = AppConfig::default();
        let mut replay:        Option<PathBuf> = None;
        let mut looped                         = false;
        let mut fps:           Option<f32>     = None;
        let mut latency:       Option<Duration> = None;
        let mut failure_every: Option<u64>     = None;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quick"            => cfg.quick = true,
                "--loop"             => looped = true,
                "--replay"           => replay = Some(PathBuf::from(value(&arg, args.next())?)),
                "--fps"              => fps = Some(parse(&arg, args.next())?),
                "--latency-ms"       => latency = Some(Duration::from_millis(parse(&arg, args.next())?)),
                "--fail-every"       => failure_every = Some(parse(&arg, args.next())?),
                "--grab-threshold"   => cfg.gestures.grab_threshold = parse(&arg, args.next())?,
                "--zoom-sensitivity" => cfg.controller.zoom_sensitivity = parse(&arg, args.next())?,
                "--help" | "-h"      => return Err(AppError::Usage(USAGE.to_string())),
                other                => return Err(AppError::Usage(format!("unknown option `{}`", other))),
            }
        }

        let fps = fps.map(clamp_fps);
        cfg.source = match replay {
            Some(path) => {
                if latency.is_some() || failure_every.is_some() {
                    return Err(AppError::Usage(
                        "--latency-ms and --fail-every only apply to the simulated camera".to_string(),
                    ));
                }
                SourceConfig::Replay { path, fps, looped }
            }
            None => {
                if looped {
                    return Err(AppError::Usage("--loop needs --replay".to_string()));
                }
                SourceConfig::Simulated {
                    fps:           fps.unwrap_or(DEFAULT_CAPTURE_FPS),
                    latency:       latency.unwrap_or(Duration::ZERO),
                    failure_every: failure_every.filter(|&n| n > 0),
                }
            }
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String, AppError> {
    next.ok_or_else(|| AppError::Usage(format!("{} needs a value", flag)))
}

fn parse<T: std::str::FromStr>(flag: &str, next: Option<String>) -> Result<T, AppError> {
    let v = value(flag, next)?;
    v.trim().parse().map_err(|_| AppError::Usage(format!("bad value `{}` for {}", v, flag)))
}

fn clamp_fps(fps: f32) -> f32 {
    if fps.is_nan() {
        return fps;
    }
    let clamped = fps.clamp(FPS_RANGE.0, FPS_RANGE.1);
    if clamped != fps {
        warn!("capture rate {} fps out of range, using {}", fps, clamped);
    }
    clamped
}
