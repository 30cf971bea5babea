//! Fixed perspective camera looking down −Z.

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view, degrees.
    pub fov_y:    f32,
    /// Points closer than this (along the view axis) are culled.
    pub near:     f32,
}

/// A world point mapped onto the framebuffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x:     f32,
    pub y:     f32,
    /// Distance in front of the camera along the view axis.
    pub depth: f32,
    /// Pixels per world unit at depth 1.
    pub focal: f32,
}

impl Projected {
    /// Screen-space radius of a world-space diameter at this depth.
    pub fn radius_px(&self, size: f32) -> f32 {
        0.5 * size * self.focal / self.depth
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera { position: Vec3::new(0.0, 0.0, 10.0), fov_y: 60.0, near: 0.1 }
    }
}

impl Camera {
    pub fn focal_px(&self, height: usize) -> f32 {
        (height as f32 * 0.5) / (self.fov_y.to_radians() * 0.5).tan()
    }

    /// Project `world` onto a `width × height` framebuffer with +y up in
    /// world space and row 0 at the top.  `None` behind the near plane.
    pub fn project(&self, world: Vec3, width: usize, height: usize) -> Option<Projected> {
        let v = world - self.position;
        let depth = -v.z;
        if depth < self.near {
            return None;
        }
        let focal = self.focal_px(height);
        Some(Projected {
            x: width  as f32 * 0.5 + v.x * focal / depth,
            y: height as f32 * 0.5 - v.y * focal / depth,
            depth,
            focal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn origin_projects_to_centre() {
        let p = Camera::default().project(Vec3::ZERO, 800, 600).unwrap();
        assert_relative_eq!(p.x, 400.0);
        assert_relative_eq!(p.y, 300.0);
        assert_relative_eq!(p.depth, 10.0);
    }

    #[test]
    fn up_is_towards_row_zero() {
        let cam = Camera::default();
        let p = cam.project(Vec3::new(0.0, 1.0, 0.0), 800, 600).unwrap();
        assert!(p.y < 300.0);
        let q = cam.project(Vec3::new(1.0, 0.0, 0.0), 800, 600).unwrap();
        assert!(q.x > 400.0);
    }

    #[test]
    fn frustum_edge_at_half_fov() {
        let cam = Camera::default();
        // At depth 10 with a 60° vertical fov the top edge is 10·tan 30° up.
        let top = 10.0 * 30f32.to_radians().tan();
        let p = cam.project(Vec3::new(0.0, top, 0.0), 800, 600).unwrap();
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn behind_camera_culled() {
        assert!(Camera::default().project(Vec3::new(0.0, 0.0, 11.0), 800, 600).is_none());
    }

    #[test]
    fn closer_particles_are_bigger() {
        let cam = Camera::default();
        let far  = cam.project(Vec3::new(0.0, 0.0, -5.0), 800, 600).unwrap();
        let near = cam.project(Vec3::new(0.0, 0.0,  5.0), 800, 600).unwrap();
        assert!(near.radius_px(0.04) > far.radius_px(0.04));
    }
}
