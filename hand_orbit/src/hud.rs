//! Status text drawn over the planet with a 3×5 bitmap font.

use orbit_control::SceneSnapshot;
use particle_planet::Framebuffer;
use pinch_gesture::GestureMode;

pub const GLYPH_W: usize = 3;
pub const GLYPH_H: usize = 5;

/// Key legend shown under the status line in simulation mode.
pub const SIM_LEGEND: &str =
    "MOUSE HAND  SPACE GRAB  WHEEL/+/- PINCH  H HAND  Q QUIT";
pub const REPLAY_LEGEND: &str = "Q QUIT";

/// 5 rows of 3 bits, top row in the high bits.
fn glyph(c: char) -> u16 {
    match c {
        '0'        => 0x7B6F,
        '1'        => 0x2C97,
        '2'        => 0x73E7,
        '3'        => 0x73CF,
        '4'        => 0x5BC9,
        '5' | 's' | 'S' => 0x79CF,
        '6'        => 0x79EF,
        '7'        => 0x7249,
        '8'        => 0x7BEF,
        '9'        => 0x7BCF,
        'a' | 'A'  => 0x7BED,
        'b' | 'B'  => 0x6BAE,
        'c' | 'C'  => 0x7927,
        'd' | 'D'  => 0x6B6E,
        'e' | 'E'  => 0x79E7,
        'f' | 'F'  => 0x79E4,
        'g' | 'G'  => 0x796F,
        'h' | 'H'  => 0x5BED,
        'i' | 'I'  => 0x7497,
        'j' | 'J'  => 0x126F,
        'k' | 'K'  => 0x5BAD,
        'l' | 'L'  => 0x4927,
        'm' | 'M'  => 0x5F6D,
        'n' | 'N'  => 0x7B6D,
        'o' | 'O'  => 0x7B6F,
        'p' | 'P'  => 0x7BE4,
        'q' | 'Q'  => 0x7B79,
        'r' | 'R'  => 0x6BAD,
        't' | 'T'  => 0x7492,
        'u' | 'U'  => 0x5B6F,
        'v' | 'V'  => 0x5B52,
        'w' | 'W'  => 0x5B7D,
        'x' | 'X'  => 0x5AAD,
        'y' | 'Y'  => 0x5BD2,
        'z' | 'Z'  => 0x72A7,
        '/'        => 0x12A4,
        '-'        => 0x01C0,
        '.'        => 0x0002,
        ','        => 0x0014,
        ':'        => 0x0410,
        '='        => 0x0E38,
        '+'        => 0x05D0,
        '('        => 0x2922,
        ')'        => 0x224A,
        '|'        => 0x2492,
        ' '        => 0x0000,
        _          => 0x0080,
    }
}

/// Draw `text` with its top-left corner at (`x`, `y`), each font pixel
/// `scale` screen pixels wide.  Returns the x just past the last glyph.
pub fn draw_text(fb: &mut Framebuffer, text: &str, x: usize, y: usize, scale: usize, argb: u32) -> usize {
    let scale = scale.max(1);
    let mut cx = x;
    for ch in text.chars() {
        if cx + GLYPH_W * scale > fb.width() {
            break;
        }
        let bits = glyph(ch);
        for row in 0..GLYPH_H {
            for col in 0..GLYPH_W {
                let bit = 14 - (row * GLYPH_W + col);
                if bits & (1 << bit) != 0 {
                    fb.fill_rect(cx + col * scale, y + row * scale, scale, scale, argb);
                }
            }
        }
        cx += (GLYPH_W + 1) * scale;
    }
    cx
}

/// Everything the status line reports.
#[derive(Clone, Debug, PartialEq)]
pub struct Status<'a> {
    pub mode:          GestureMode,
    pub snapshot:      &'a SceneSnapshot,
    pub dropped:       u64,
    pub capture_error: Option<&'a str>,
}

impl Status<'_> {
    pub fn line(&self) -> String {
        let t = &self.snapshot.transform;
        let mut s = format!(
            "{:<6} SCALE {:.2}  DENSITY {}  DROPPED {}",
            self.mode.label(), t.scale, self.snapshot.density.particles_per_second, self.dropped,
        );
        if !self.snapshot.idle.is_active() {
            s.push_str("  IDLE OFF");
        }
        if let Some(err) = self.capture_error {
            s.push_str("  | CAMERA: ");
            s.push_str(err);
        }
        s
    }
}
