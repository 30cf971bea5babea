//! # orbit_control
//!
//! The object side of the gesture loop: an [`ObjectController`] that owns
//! the manipulated object's [`ObjectTransform`] and [`Density`], applies
//! [`GestureCommand`](pinch_gesture::GestureCommand)s to them, and
//! publishes complete [`SceneSnapshot`]s through a [`SnapshotCell`] for a
//! render loop running on another thread.
//!
//! | Command | Effect |
//! |---|---|
//! | `Zoom { pinch_distance }` | scale ← clamp(lerp(scale, distance × 15, 0.1), 0.5, 4.0); density stepped on scale |
//! | `Rotate { dx, dy }` | idle spin cancelled; yaw += dx × 5, pitch += dy × 5 |
//!
//! Combined with the gesture tracker's own ×2, a hand midpoint displacement
//! turns the object by ten times that many radians.

pub mod config;
pub mod controller;
pub mod idle;
pub mod publish;
pub mod transform;

pub use config::ControllerConfig;
pub use controller::ObjectController;
pub use idle::IdleRotation;
pub use publish::{SceneSnapshot, SnapshotCell, SnapshotReader};
pub use transform::{Density, ObjectTransform};
