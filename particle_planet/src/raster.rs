//! Additive point-sprite rasterizer into a packed ARGB framebuffer.

use glam::Vec3;

use crate::camera::Camera;
use crate::scene::Scene;

/// Linear colour, components nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self { Rgb { r, g, b } }

    pub fn to_argb(self) -> u32 {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        0xFF00_0000 | (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }
}

/// Per-particle brightness before fading; overlapping particles bloom
/// toward white.
const SPLAT_INTENSITY: f32 = 0.35;

/// Sprites smaller than this radius (px) are drawn as one dimmed pixel.
const MIN_SPRITE_RADIUS: f32 = 0.75;

// ════════════════════════════════════════════════════════════════════════════
// Framebuffer
// ════════════════════════════════════════════════════════════════════════════

pub struct Framebuffer {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer { width, height, pixels: vec![0xFF00_0000; width * height] }
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn clear(&mut self, argb: u32) { self.pixels.fill(argb); }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, argb: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = argb;
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, argb: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.pixels[row * self.width + col] = argb;
            }
        }
    }

    /// Add `color × weight` to one pixel, saturating per channel.
    pub fn add_pixel(&mut self, x: isize, y: isize, color: Rgb, weight: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i   = y as usize * self.width + x as usize;
        let px  = self.pixels[i];
        let add = |shift: u32, c: f32| {
            let cur = (px >> shift) & 0xFF;
            let inc = (c * weight * 255.0).max(0.0) as u32;
            (cur + inc).min(0xFF) << shift
        };
        self.pixels[i] = 0xFF00_0000 | add(16, color.r) | add(8, color.g) | add(0, color.b);
    }

    /// Additive round sprite centred on (`x`, `y`) with quadratic falloff.
    pub fn splat(&mut self, x: f32, y: f32, radius: f32, color: Rgb, intensity: f32) {
        if radius < MIN_SPRITE_RADIUS {
            let coverage = (radius / MIN_SPRITE_RADIUS).powi(2);
            self.add_pixel(x.floor() as isize, y.floor() as isize, color, intensity * coverage);
            return;
        }
        let r2 = radius * radius;
        let x0 = (x - radius).floor() as isize;
        let x1 = (x + radius).ceil()  as isize;
        let y0 = (y - radius).floor() as isize;
        let y1 = (y + radius).ceil()  as isize;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - x;
                let dy = py as f32 + 0.5 - y;
                let d2 = dx * dx + dy * dy;
                if d2 < r2 {
                    self.add_pixel(px, py, color, intensity * (1.0 - d2 / r2));
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scene rendering
// ════════════════════════════════════════════════════════════════════════════

/// Clear to `background` and splat every live particle in `scene`.
pub fn render(scene: &Scene, camera: &Camera, background: Rgb, fb: &mut Framebuffer) {
    fb.clear(background.to_argb());
    let (w, h) = (fb.width(), fb.height());

    for (id, system) in scene.systems() {
        let to_world = scene.world_transform(id);
        let size     = system.get_particle_size();
        let color    = system.get_color();
        for p in system.particles() {
            let world: Vec3 = to_world.transform_point3(p.position);
            let Some(s) = camera.project(world, w, h) else { continue };
            let fade = system.fade(p);
            if fade <= 0.0 { continue; }
            fb.splat(s.x, s.y, s.radius_px(size), color, SPLAT_INTENSITY * fade);
        }
    }
}
