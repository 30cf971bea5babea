//! Emitter surfaces.  Particles are born on the surface, in node space.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EmitterShape {
    /// Sphere centred on the node origin.
    Sphere { radius: f32 },
    /// Torus in the node's XZ plane, its axis along +Y.
    Torus { ring_radius: f32, pipe_radius: f32 },
}

impl EmitterShape {
    /// A point drawn uniformly (by area) from the surface.
    pub fn sample_surface<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match *self {
            EmitterShape::Sphere { radius } => {
                let z: f32   = rng.gen_range(-1.0..=1.0);
                let phi: f32 = rng.gen_range(0.0..TAU);
                let r = (1.0 - z * z).max(0.0).sqrt();
                Vec3::new(r * phi.cos(), z, r * phi.sin()) * radius
            }
            EmitterShape::Torus { ring_radius, pipe_radius } => {
                // The outer side of the tube has more area than the inner
                // side; reject inner-side samples in proportion.
                let max_r = ring_radius + pipe_radius;
                let phi = loop {
                    let phi: f32 = rng.gen_range(0.0..TAU);
                    let w = (ring_radius + pipe_radius * phi.cos()) / max_r;
                    if rng.gen::<f32>() <= w { break phi; }
                };
                let theta: f32 = rng.gen_range(0.0..TAU);
                let d = ring_radius + pipe_radius * phi.cos();
                Vec3::new(d * theta.cos(), pipe_radius * phi.sin(), d * theta.sin())
            }
        }
    }

    /// Radius of a sphere centred on the origin that contains the surface.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            EmitterShape::Sphere { radius } => radius,
            EmitterShape::Torus { ring_radius, pipe_radius } => ring_radius + pipe_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sphere_samples_lie_on_surface() {
        let mut rng = StdRng::seed_from_u64(7);
        let shape = EmitterShape::Sphere { radius: 1.5 };
        for _ in 0..1000 {
            let p = shape.sample_surface(&mut rng);
            assert_relative_eq!(p.length(), 1.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn sphere_samples_cover_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(11);
        let shape = EmitterShape::Sphere { radius: 1.0 };
        let up = (0..2000).filter(|_| shape.sample_surface(&mut rng).y > 0.0).count();
        assert!((800..1200).contains(&up), "up = {}", up);
    }

    #[test]
    fn torus_samples_lie_on_tube() {
        let mut rng = StdRng::seed_from_u64(3);
        let (big, small) = (2.5, 0.2);
        let shape = EmitterShape::Torus { ring_radius: big, pipe_radius: small };
        for _ in 0..1000 {
            let p = shape.sample_surface(&mut rng);
            // distance from the tube's centre circle
            let radial = (p.x * p.x + p.z * p.z).sqrt() - big;
            assert_relative_eq!((radial * radial + p.y * p.y).sqrt(), small, epsilon = 1e-4);
            assert!(p.length() <= shape.bounding_radius() + 1e-4);
        }
    }
}
