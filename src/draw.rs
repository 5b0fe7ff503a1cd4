// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the flattened layer stack.
// 2) A ring the size of the brush that follows your mouse.
// 3) A tiny 5x7 bitmap font to render HUD text on top of the layers.

use crate::error::Error;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use scratch_reveal::FrameBuffer;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window of the requested size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Process window events without drawing.
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current inner size; changes when the user drags the window border.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position clamped to the window. Used for strokes so a drag that
    /// leaves the window still erases along the edge.
    pub fn mouse_pos_clamped(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Clamp)
    }

    /// Mouse position only while it is over the window (cursor ring hides otherwise).
    pub fn mouse_pos_inside(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Visual: when pressed, every layer comes back fully covered.
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }

    /// Brush size nudges this frame: `]`/`=`/wheel up grow, `[`/`-`/wheel down shrink.
    pub fn brush_notches(&self) -> i64 {
        let pressed = |k| self.window.is_key_pressed(k, KeyRepeat::Yes) as i64;
        let keys = pressed(Key::RightBracket) + pressed(Key::Equal)
            - pressed(Key::LeftBracket)
            - pressed(Key::Minus);
        let wheel = match self.window.get_scroll_wheel() {
            Some((_, dy)) if dy > 0.0 => 1,
            Some((_, dy)) if dy < 0.0 => -1,
            _ => 0,
        };
        keys + wheel
    }
}

/* ---------- Software drawing: pixels, cursor ring, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// 1-pixel circle outline (midpoint algorithm).
fn draw_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    let (mut x, mut y) = (radius, 0);
    let mut err = 1 - radius;
    while x >= y {
        for (dx, dy) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + dx, cy + dy, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Ring showing exactly what the brush will cover.
/// Visual: a light circle with a dark halo so it reads on any artwork.
pub fn draw_cursor_ring(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: u32, color: u32) {
    let r = radius as i32;
    draw_circle(fb, cx, cy, r + 1, 0x00000000);
    draw_circle(fb, cx, cy, r, color);
}

/* ---------- 5x7 bitmap font (just the characters the HUD prints) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        '%' => g!(0b11001,0b11010,0b00010,0b00100,0b01000,0b01011,0b10011),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '[' => g!(0b01110,0b01000,0b01000,0b01000,0b01000,0b01000,0b01110),
        ']' => g!(0b01110,0b00010,0b00010,0b00010,0b00010,0b00010,0b01110),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (offset, c) in [(1, 0x00000000), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// HUD line for the current progress. `scratched` is the active layer's
/// transparent fraction.
pub fn hud_text(layer: Option<usize>, layer_count: usize, scratched: f64, radius: u32) -> String {
    let progress = match layer {
        Some(i) => format!("LAYER {}/{} {}%", i + 1, layer_count, (scratched * 100.0).floor() as u32),
        None => String::from("ALL CLEAR"),
    };
    format!("{progress} | BRUSH {radius} | R: RESET  [ ]: SIZE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_only_uses_known_glyphs() {
        for text in [hud_text(Some(1), 3, 0.5, 24), hud_text(None, 3, 0.0, 150)] {
            assert!(text.chars().all(|c| glyph5x7(c).is_some()), "{text}");
        }
        assert!(hud_text(Some(0), 3, 0.429, 7).starts_with("LAYER 1/3 42% | BRUSH 7"));
    }

    #[test]
    fn ring_hits_the_radius() {
        let mut fb = FrameBuffer::new(41, 41);
        draw_cursor_ring(&mut fb, 20, 20, 10, 0x00FFFFFF);
        assert_eq!(fb.pixels[20 * 41 + 30], 0x00FFFFFF);
        assert_eq!(fb.pixels[10 * 41 + 20], 0x00FFFFFF);
        assert_eq!(fb.pixels[20 * 41 + 20], 0);
    }

    #[test]
    fn drawing_off_screen_is_ignored() {
        let mut fb = FrameBuffer::new(8, 8);
        draw_cursor_ring(&mut fb, -50, -50, 3, 0x00FFFFFF);
        draw_text_5x7(&mut fb, 100, 100, "ALL CLEAR", 0x00FFFFFF);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }
}
