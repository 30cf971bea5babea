//! The `minifb` window: renders the planet and, in simulation mode, turns
//! mouse and keyboard into simulated hand input.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ status line                                  │
//! │ key legend                                   │
//! │                                              │
//! │                 ·  planet  ·                 │
//! │                                              │
//! └──────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};
use particle_planet::{Framebuffer, PlanetScene};

use crate::capture::SimInput;
use crate::error::AppError;
use crate::hud;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:       usize = 960;
pub const WIN_H:       usize = 720;
const HUD_SCALE:       usize = 2;
const HUD_MARGIN:      usize = 10;
const STATUS_COLOR:    u32   = 0xFFE0E0E0;
const LEGEND_COLOR:    u32   = 0xFF7F8FA6;
/// Pinch-width change per wheel notch or `+`/`-` press.
const SPREAD_STEP:     f32   = 0.01;

pub struct Visualizer {
    window:  Window,
    fb:      Framebuffer,
    /// Present only when the window is the simulated camera.
    sim_tx:  Option<Sender<SimInput>>,
    pointer: Option<(f32, f32)>,
    pinched: bool,
}

impl Visualizer {
    pub fn new(title: &str, width: usize, height: usize, sim_tx: Option<Sender<SimInput>>) -> Result<Self, AppError> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            fb: Framebuffer::new(width, height),
            sim_tx,
            pointer: None,
            pinched: false,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll input; returns `false` when the user asked to quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }
        if self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            return false;
        }
        let Some(tx) = self.sim_tx.as_ref() else { return true };

        // Mouse → midpoint.  Window y grows downward; hand coordinates grow up.
        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let (w, h) = (self.fb.width() as f32, self.fb.height() as f32);
            let p = (mx / w, 1.0 - my / h);
            if self.pointer != Some(p) {
                self.pointer = Some(p);
                let _ = tx.send(SimInput::Pointer { x: p.0, y: p.1 });
            }
        }

        let pinched = self.window.is_key_down(Key::Space);
        if pinched != self.pinched {
            self.pinched = pinched;
            let _ = tx.send(SimInput::Pinch(pinched));
        }

        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            if dy != 0.0 {
                let _ = tx.send(SimInput::Spread(dy.signum() * SPREAD_STEP));
            }
        }
        if self.window.is_key_pressed(Key::Equal, KeyRepeat::Yes)
            || self.window.is_key_pressed(Key::NumPadPlus, KeyRepeat::Yes)
        {
            let _ = tx.send(SimInput::Spread(SPREAD_STEP));
        }
        if self.window.is_key_pressed(Key::Minus, KeyRepeat::Yes)
            || self.window.is_key_pressed(Key::NumPadMinus, KeyRepeat::Yes)
        {
            let _ = tx.send(SimInput::Spread(-SPREAD_STEP));
        }
        if self.window.is_key_pressed(Key::H, KeyRepeat::No) {
            let _ = tx.send(SimInput::ToggleHand);
        }
        true
    }

    /// Render one frame: particles, then the HUD on top.
    pub fn render(&mut self, planet: &PlanetScene, status: &str, legend: &str) -> Result<(), AppError> {
        planet.render(&mut self.fb);

        let line_h = (hud::GLYPH_H + 3) * HUD_SCALE;
        hud::draw_text(&mut self.fb, status, HUD_MARGIN, HUD_MARGIN, HUD_SCALE, STATUS_COLOR);
        hud::draw_text(&mut self.fb, legend, HUD_MARGIN, HUD_MARGIN + line_h, HUD_SCALE, LEGEND_COLOR);

        let (w, h) = (self.fb.width(), self.fb.height());
        self.window
            .update_with_buffer(self.fb.pixels(), w, h)
            .map_err(|e| AppError::Window(e.to_string()))
    }
}
