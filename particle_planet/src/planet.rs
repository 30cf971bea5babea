//! The ringed planet scene.

use glam::{EulerRot, Quat};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::Camera;
use crate::emitter::EmitterShape;
use crate::particles::ParticleSystem;
use crate::raster::{self, Framebuffer, Rgb};
use crate::scene::{NodeId, NodeTransform, Scene};

// ════════════════════════════════════════════════════════════════════════════
// Authored look
// ════════════════════════════════════════════════════════════════════════════

pub const CORE_RADIUS:      f32 = 1.0;
pub const CORE_BIRTH_RATE:  f32 = 5000.0;
pub const CORE_LIFE_SPAN:   f32 = 1.5;
pub const CORE_SIZE:        f32 = 0.04;
pub const CORE_COLOR:       Rgb = Rgb::new(1.0, 0.8, 0.4);

pub const RING_RADIUS:      f32 = 2.5;
pub const RING_PIPE_RADIUS: f32 = 0.2;
/// Ring tilt as (x, y, z) Euler angles in radians.
pub const RING_TILT:        [f32; 3] = [0.5, 0.0, 0.2];
pub const RING_BIRTH_RATE:  f32 = 8000.0;
pub const RING_LIFE_SPAN:   f32 = 2.0;
pub const RING_SIZE:        f32 = 0.01;
pub const RING_COLOR:       Rgb = Rgb::WHITE;

pub const BACKGROUND:       Rgb = Rgb::BLACK;

/// Scale and orientation of the wrapper node, as driven by the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapperPose {
    pub scale: f32,
    pub yaw:   f32,
    pub pitch: f32,
}

impl Default for WrapperPose {
    fn default() -> Self { WrapperPose { scale: 1.0, yaw: 0.0, pitch: 0.0 } }
}

// ════════════════════════════════════════════════════════════════════════════
// PlanetScene
// ════════════════════════════════════════════════════════════════════════════

/// Owns the scene graph, camera and emission RNG.
pub struct PlanetScene {
    scene:      Scene,
    camera:     Camera,
    background: Rgb,
    wrapper:    NodeId,
    core:       NodeId,
    ring:       NodeId,
    rng:        StdRng,
}

impl PlanetScene {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic emission, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut scene = Scene::new();
        let wrapper = scene.add_child(scene.root(), "wrapper", NodeTransform::default());

        let core = scene.add_child(wrapper, "core", NodeTransform::default());
        scene.node_mut(core).system = Some(
            ParticleSystem::new(EmitterShape::Sphere { radius: CORE_RADIUS })
                .birth_rate(CORE_BIRTH_RATE)
                .life_span(CORE_LIFE_SPAN)
                .particle_size(CORE_SIZE)
                .color(CORE_COLOR),
        );

        let [tx, ty, tz] = RING_TILT;
        let ring = scene.add_child(wrapper, "ring", NodeTransform {
            rotation: Quat::from_euler(EulerRot::YXZ, ty, tx, tz),
            ..NodeTransform::default()
        });
        scene.node_mut(ring).system = Some(
            ParticleSystem::new(EmitterShape::Torus {
                ring_radius: RING_RADIUS,
                pipe_radius: RING_PIPE_RADIUS,
            })
            .birth_rate(RING_BIRTH_RATE)
            .life_span(RING_LIFE_SPAN)
            .particle_size(RING_SIZE)
            .color(RING_COLOR),
        );

        debug!("planet scene built with {} nodes", scene.len());

        PlanetScene {
            scene,
            camera: Camera::default(),
            background: BACKGROUND,
            wrapper,
            core,
            ring,
            rng,
        }
    }

    pub fn scene(&self)   -> &Scene  { &self.scene }
    pub fn camera(&self)  -> &Camera { &self.camera }
    pub fn wrapper(&self) -> NodeId  { self.wrapper }
    pub fn core(&self)    -> NodeId  { self.core }
    pub fn ring(&self)    -> NodeId  { self.ring }

    pub fn core_system(&self) -> Option<&ParticleSystem> {
        self.scene.node(self.core).system.as_ref()
    }

    pub fn ring_system(&self) -> Option<&ParticleSystem> {
        self.scene.node(self.ring).system.as_ref()
    }

    /// Place the wrapper node.  Yaw is about the vertical axis, applied
    /// after pitch.
    pub fn set_pose(&mut self, pose: WrapperPose) {
        let t = &mut self.scene.node_mut(self.wrapper).transform;
        t.scale    = pose.scale;
        t.rotation = Quat::from_euler(EulerRot::YXZ, pose.yaw, pose.pitch, 0.0);
    }

    pub fn pose(&self) -> WrapperPose {
        let t = self.scene.node(self.wrapper).transform;
        let (yaw, pitch, _) = t.rotation.to_euler(EulerRot::YXZ);
        WrapperPose { scale: t.scale, yaw, pitch }
    }

    /// Core particles per second (the density knob).
    pub fn set_core_birth_rate(&mut self, per_second: u32) {
        if let Some(s) = self.scene.node_mut(self.core).system.as_mut() {
            s.set_birth_rate(per_second as f32);
        }
    }

    /// Advance every particle system by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let rng = &mut self.rng;
        for system in self.scene.systems_mut() {
            system.step(dt, rng);
        }
    }

    pub fn live_particles(&self) -> usize {
        self.scene.systems().map(|(_, s)| s.live()).sum()
    }

    pub fn render(&self, fb: &mut Framebuffer) {
        raster::render(&self.scene, &self.camera, self.background, fb);
    }
}

impl Default for PlanetScene {
    fn default() -> Self { PlanetScene::new() }
}
