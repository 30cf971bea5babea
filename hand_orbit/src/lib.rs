//! # hand_orbit
//!
//! Hand-gesture control of a ringed particle planet: pinch to zoom, grab and
//! drag to rotate.  Absent interaction the planet spins slowly on its own.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Fingertips | Action |
//! |---|---|---|
//! | Open pinch | index/thumb ≥ 0.06 apart | Zoom toward 15 × pinch width, smoothed |
//! | Grab + move | index/thumb < 0.06 apart | Rotate by the midpoint's motion; stops the idle spin |
//! | No hand | n/a | Nothing; any grab in progress ends |
//!
//! The planet's core emits denser particles when zoomed out (scale < 1).
//!
//! ## Threads
//!
//! Capture and the gesture worker run on their own threads behind a
//! drop-oldest frame queue (see [`pipeline`]); the render loop runs on the
//! main thread and reads controller snapshots without blocking.
//!
//! ## Sources
//!
//! * (default): **Simulated camera**: the window's mouse and keyboard stand
//!   in for the hand.
//! * `--replay <file>`: a recorded landmark script.
//!
//! ### Simulation controls
//!
//! | Input | Hand |
//! |---|---|
//! | Mouse | Pinch midpoint |
//! | `Space` held | Grab (pinch closed) |
//! | Wheel / `+` / `-` | Open pinch wider / narrower |
//! | `H` | Hand in / out of frame |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod capture;
pub mod config;
pub mod error;
pub mod extractor;
pub mod frame_queue;
pub mod hud;
pub mod pipeline;
pub mod visualizer;
pub mod worker;

pub use config::{AppConfig, SourceConfig, WindowConfig};
pub use error::{AppError, CaptureError, ExtractError};
