//! Recorded landmark sequences in JSON.
//!
//! ```json
//! {
//!   "fps": 30,
//!   "frames": [
//!     { "hand": null },
//!     { "index": [0.295, 0.30], "thumb": [0.305, 0.30] },
//!     { "index": [0.315, 0.31], "thumb": [0.325, 0.31] },
//!     { "index": [0.40,  0.50], "thumb": [0.60,  0.50] }
//!   ]
//! }
//! ```
//!
//! A frame missing either fingertip is a frame with no detected hand.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ScriptError;
use crate::landmark::{HandLandmarks, LandmarkSample};

/// One recorded frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    #[serde(default)]
    pub index: Option<[f32; 2]>,
    #[serde(default)]
    pub thumb: Option<[f32; 2]>,
}

impl ScriptFrame {
    pub fn hand(index: [f32; 2], thumb: [f32; 2]) -> Self {
        ScriptFrame { index: Some(index), thumb: Some(thumb) }
    }

    pub fn no_hand() -> Self { ScriptFrame::default() }

    pub fn to_sample(&self) -> LandmarkSample {
        match (self.index, self.thumb) {
            (Some(i), Some(t)) => Some(HandLandmarks::new(Vec2::from(i), Vec2::from(t))),
            _ => None,
        }
    }
}

/// A recorded landmark sequence with its capture rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandmarkScript {
    /// Capture rate the script was recorded at, if known.
    #[serde(default)]
    pub fps:    Option<f32>,
    pub frames: Vec<ScriptFrame>,
}

impl LandmarkScript {
    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        let script: LandmarkScript = serde_json::from_str(text)?;
        if script.frames.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(script)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn samples(&self) -> impl Iterator<Item = LandmarkSample> + '_ {
        self.frames.iter().map(ScriptFrame::to_sample)
    }
}
