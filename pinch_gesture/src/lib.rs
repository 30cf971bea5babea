//! # pinch_gesture
//!
//! Turns per-frame two-finger hand landmarks (index tip, thumb tip) into
//! control commands for a manipulated 3D object.
//!
//! ## Pipeline
//!
//! ```text
//! LandmarkSample ──validate──▶ classify ──▶ GestureTracker::step ──▶ Option<GestureCommand>
//! ```
//!
//! * A pinch narrower than the grab threshold is a **grab**: the hand
//!   midpoint drags the object's orientation ([`GestureMode::Rotate`]).
//! * A wider pinch is a **zoom**: the pinch width itself is the zoom target
//!   ([`GestureMode::Zoom`]).
//! * No hand is [`GestureMode::Idle`].
//!
//! ## Coordinates
//!
//! Landmark coordinates are normalized to `[0, 1]` per axis with the origin
//! at the bottom-left of the mirrored front-camera image, x to the right and
//! y up.  Every capture source is expected to deliver points in this frame.
//!
//! ## Quick start
//!
//! ```rust
//! use pinch_gesture::{GestureConfig, GestureTracker, GestureCommand, HandLandmarks};
//! use glam::Vec2;
//!
//! let mut tracker = GestureTracker::new(GestureConfig::default());
//! let grab = |x: f32, y: f32| Some(HandLandmarks::new(Vec2::new(x, y), Vec2::new(x + 0.01, y)));
//!
//! assert_eq!(tracker.step(grab(0.30, 0.30)), None);          // baseline only
//! assert!(matches!(tracker.step(grab(0.32, 0.31)),
//!                  Some(GestureCommand::Rotate { .. })));
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod landmark;
pub mod script;
pub mod tracker;

pub use classifier::{classify, Classification, GestureMode};
pub use config::GestureConfig;
pub use error::{ConfigError, SampleError, ScriptError};
pub use landmark::{HandLandmarks, LandmarkSample};
pub use script::{LandmarkScript, ScriptFrame};
pub use tracker::{GestureCommand, GestureTracker, TrackingState};
