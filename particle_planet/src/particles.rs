//! Surface-emitting particle systems.
//!
//! Configured with a builder, stepped once per render frame:
//!
//! ```rust
//! use particle_planet::{EmitterShape, ParticleSystem, Rgb};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut core = ParticleSystem::new(EmitterShape::Sphere { radius: 1.0 })
//!     .birth_rate(5000.0)
//!     .life_span(1.5)
//!     .particle_size(0.04)
//!     .color(Rgb::new(1.0, 0.8, 0.4));
//!
//! core.step(1.0 / 60.0, &mut rng);
//! assert!(core.live() > 0);
//! ```

use glam::Vec3;
use rand::Rng;

use crate::emitter::EmitterShape;
use crate::raster::Rgb;

/// One live particle, positioned in its system's node space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub age:      f32,
}

#[derive(Clone, Debug)]
pub struct ParticleSystem {
    shape:         EmitterShape,
    /// Particles per second.
    birth_rate:    f32,
    /// Seconds a particle lives.
    life_span:     f32,
    /// World-space diameter of one particle.
    particle_size: f32,
    color:         Rgb,
    /// Births owed from previous steps (fractional particles).
    carry:         f32,
    particles:     Vec<Particle>,
}

impl ParticleSystem {
    pub fn new(shape: EmitterShape) -> Self {
        ParticleSystem {
            shape,
            birth_rate:    100.0,
            life_span:     1.0,
            particle_size: 0.02,
            color:         Rgb::WHITE,
            carry:         0.0,
            particles:     Vec::new(),
        }
    }

    // ── builder ───────────────────────────────────────────────────────────

    pub fn birth_rate(mut self, per_second: f32) -> Self { self.set_birth_rate(per_second); self }
    pub fn life_span(mut self, seconds: f32)     -> Self { self.life_span = seconds.max(1e-3); self }
    pub fn particle_size(mut self, size: f32)    -> Self { self.particle_size = size.max(0.0); self }
    pub fn color(mut self, color: Rgb)           -> Self { self.color = color; self }

    // ── live parameters ───────────────────────────────────────────────────

    pub fn set_birth_rate(&mut self, per_second: f32) {
        self.birth_rate = if per_second.is_finite() { per_second.max(0.0) } else { 0.0 };
    }

    pub fn shape(&self)              -> EmitterShape { self.shape }
    pub fn get_birth_rate(&self)     -> f32          { self.birth_rate }
    pub fn get_life_span(&self)      -> f32          { self.life_span }
    pub fn get_particle_size(&self)  -> f32          { self.particle_size }
    pub fn get_color(&self)          -> Rgb          { self.color }
    pub fn particles(&self)          -> &[Particle]  { &self.particles }
    pub fn live(&self)               -> usize        { self.particles.len() }

    /// Steady-state particle count for the current birth rate.
    pub fn expected_live(&self) -> usize {
        (self.birth_rate * self.life_span).round() as usize
    }

    /// Brightness of a particle: full at birth, fading to zero at death.
    pub fn fade(&self, p: &Particle) -> f32 {
        (1.0 - p.age / self.life_span).clamp(0.0, 1.0)
    }

    /// Age, retire and emit for a frame of `dt` seconds.
    pub fn step<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let life = self.life_span;
        for p in &mut self.particles {
            p.age += dt;
        }
        self.particles.retain(|p| p.age < life);

        // A stalled frame must not burst more than one lifetime of particles.
        let span   = dt.min(life);
        let owed   = self.carry + self.birth_rate * span;
        let births = owed.floor();
        self.carry = owed - births;

        let births = births as usize;
        self.particles.reserve(births);
        for i in 0..births {
            // Spread the births across the frame so ages aren't lockstep.
            let age = span * (i as f32 + 0.5) / births as f32;
            self.particles.push(Particle {
                position: self.shape.sample_surface(rng),
                age,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere() -> ParticleSystem {
        ParticleSystem::new(EmitterShape::Sphere { radius: 1.0 })
            .birth_rate(600.0)
            .life_span(0.5)
    }

    #[test]
    fn emits_birth_rate_times_dt() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = sphere();
        s.step(0.1, &mut rng);
        assert_eq!(s.live(), 60);
    }

    #[test]
    fn fractional_births_carry_over() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = ParticleSystem::new(EmitterShape::Sphere { radius: 1.0 })
            .birth_rate(10.0)
            .life_span(100.0);
        // 10/s at 60 fps is 1/6 particle per frame.
        for _ in 0..60 { s.step(1.0 / 60.0, &mut rng); }
        assert!((9..=10).contains(&s.live()), "live = {}", s.live());
    }

    #[test]
    fn reaches_steady_state() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = sphere();
        for _ in 0..120 { s.step(1.0 / 60.0, &mut rng); }
        let expected = s.expected_live() as f32;
        let live = s.live() as f32;
        assert!((live - expected).abs() / expected < 0.05, "live {} vs {}", live, expected);
        assert!(s.particles().iter().all(|p| p.age < 0.5));
    }

    #[test]
    fn birth_rate_change_takes_effect() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = sphere();
        for _ in 0..60 { s.step(1.0 / 60.0, &mut rng); }
        let before = s.live();
        s.set_birth_rate(1200.0);
        for _ in 0..60 { s.step(1.0 / 60.0, &mut rng); }
        assert!(s.live() > before * 3 / 2);
    }

    #[test]
    fn long_stall_is_bounded() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut s = sphere();
        s.step(30.0, &mut rng);
        assert!(s.live() <= s.expected_live());
    }

    #[test]
    fn invalid_inputs_ignored() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = sphere();
        s.step(f32::NAN, &mut rng);
        s.step(-1.0, &mut rng);
        assert_eq!(s.live(), 0);
        s.set_birth_rate(f32::NAN);
        assert_eq!(s.get_birth_rate(), 0.0);
    }

    #[test]
    fn fade_runs_from_one_to_zero() {
        let s = sphere();
        let young = Particle { position: Vec3::ZERO, age: 0.0 };
        let old   = Particle { position: Vec3::ZERO, age: 0.5 };
        assert_eq!(s.fade(&young), 1.0);
        assert_eq!(s.fade(&old), 0.0);
    }
}
