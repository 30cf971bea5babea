//! # particle_planet
//!
//! A ringed planet drawn entirely with particles:
//!
//! * a **core** system emitting gold particles from the surface of a sphere,
//! * a tilted **ring** system emitting white dust from the surface of a torus,
//!
//! both parented to a **wrapper** node that the gesture controller scales and
//! rotates.  Rendering is a perspective splat of every live particle into an
//! ARGB framebuffer with additive blending, so no GPU is required.
//!
//! ```text
//! root
//!  └─ wrapper            ← scale / yaw / pitch from the controller
//!      ├─ core           ← sphere r=1.0, birth rate = density
//!      └─ ring           ← torus R=2.5 r=0.2, tilted (0.5, 0, 0.2)
//! ```
//!
//! The scene graph is a plain ownership tree: nodes live in a `Vec` owned by
//! [`Scene`] and refer to each other by [`NodeId`].

pub mod camera;
pub mod emitter;
pub mod particles;
pub mod planet;
pub mod raster;
pub mod scene;

pub use camera::Camera;
pub use emitter::EmitterShape;
pub use particles::{Particle, ParticleSystem};
pub use planet::{PlanetScene, WrapperPose};
pub use raster::{Framebuffer, Rgb};
pub use scene::{Node, NodeId, NodeTransform, Scene};
