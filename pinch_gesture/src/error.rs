//! Error types shared by the gesture and control crates.

use thiserror::Error;

/// A landmark sample that must not reach the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SampleError {
    /// A coordinate was NaN or infinite.
    #[error("non-finite {landmark} coordinate ({x}, {y})")]
    NonFinite { landmark: &'static str, x: f32, y: f32 },
}

/// A tunable outside the range the control loop can work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be finite and > 0 (got {value})")]
    NotPositive { name: &'static str, value: f32 },

    #[error("lerp factor must be in (0, 1] (got {0})")]
    LerpFactor(f32),

    #[error("scale range is empty: min {min} > max {max}")]
    ScaleRange { min: f32, max: f32 },

    #[error("{name} must be finite (got {value})")]
    NotFinite { name: &'static str, value: f32 },
}

/// Failure loading a landmark script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("cannot read landmark script: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed landmark script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("landmark script has no frames")]
    Empty,
}
