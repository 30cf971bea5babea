//! Error types for the capture pipeline and the application shell.

use pinch_gesture::{ConfigError, ScriptError};
use thiserror::Error;

/// The frame source cannot deliver frames.  Fatal to the capture pipeline
/// only; the render loop keeps running with the last transform.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture device unavailable: {0}")]
    Unavailable(String),

    #[error("camera access denied")]
    PermissionDenied,

    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// A landmark extractor failed on one frame.  The frame is treated as
/// having no hand.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("landmark inference failed on frame {seq}: {reason}")]
    Inference { seq: u64, reason: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid argument: {0}")]
    Usage(String),

    #[error("failed to start {name} thread: {source}")]
    Spawn { name: &'static str, source: std::io::Error },
}
