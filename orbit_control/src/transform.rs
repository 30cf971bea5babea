//! The values the render loop reads back every frame.

use glam::{EulerRot, Quat};

/// Uniform scale and two unbounded orientation accumulators (radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectTransform {
    pub scale: f32,
    /// Rotation about the vertical axis.
    pub yaw:   f32,
    /// Rotation about the horizontal axis.
    pub pitch: f32,
}

impl ObjectTransform {
    pub fn with_scale(scale: f32) -> Self {
        ObjectTransform { scale, yaw: 0.0, pitch: 0.0 }
    }

    /// Orientation as a quaternion, yaw applied after pitch.
    pub fn rotation(&self, extra_yaw: f32) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw + extra_yaw, self.pitch, 0.0)
    }
}

impl Default for ObjectTransform {
    fn default() -> Self { ObjectTransform::with_scale(1.0) }
}

/// Particles per second emitted by the planet core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Density {
    pub particles_per_second: u32,
}

impl Density {
    /// Smaller planets get more particles so they don't look sparse.
    pub fn for_scale(scale: f32, threshold: f32, high: u32, low: u32) -> Self {
        let particles_per_second = if scale < threshold { high } else { low };
        Density { particles_per_second }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn density_step() {
        assert_eq!(Density::for_scale(0.99, 1.0, 8000, 4000).particles_per_second, 8000);
        assert_eq!(Density::for_scale(1.0,  1.0, 8000, 4000).particles_per_second, 4000);
        assert_eq!(Density::for_scale(3.5,  1.0, 8000, 4000).particles_per_second, 4000);
    }

    #[test]
    fn yaw_turns_about_vertical_axis() {
        let t = ObjectTransform { scale: 1.0, yaw: std::f32::consts::FRAC_PI_2, pitch: 0.0 };
        let v = t.rotation(0.0) * Vec3::X;
        assert_relative_eq!(v.x, 0.0,  epsilon = 1e-6);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn pitch_turns_about_horizontal_axis() {
        let t = ObjectTransform { scale: 1.0, yaw: 0.0, pitch: std::f32::consts::FRAC_PI_2 };
        let v = t.rotation(0.0) * Vec3::Y;
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-6);
    }
}
