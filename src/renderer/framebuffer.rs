//! In-memory display: a windowed RGB565 framebuffer
//!
//! Stands in for the LCD driver on the native build and in tests. It keeps
//! the driver's contract: writes land row-major inside the active window,
//! and the window must be filled exactly before being swapped.

use glam::IVec2;

use super::DisplaySink;
use crate::sim::Region;

/// Fixed-size RGB565 pixel buffer with active-window write semantics
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<u16>,
    window: Option<Region>,
    /// Next write position within the window, row-major
    cursor: IVec2,
}

impl Framebuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
            window: None,
            cursor: IVec2::ZERO,
        }
    }

    #[inline]
    fn index(&self, p: IVec2) -> usize {
        (p.y * self.width + p.x) as usize
    }

    /// Color currently stored at `p`
    #[inline]
    pub fn pixel(&self, p: IVec2) -> u16 {
        self.pixels[self.index(p)]
    }

    /// Raw row-major pixel storage
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Overwrite the whole buffer with one color
    pub fn fill(&mut self, color: u16) {
        self.pixels.fill(color);
    }

    /// Draw `text` in the built-in 5x7 font with its top-left at `origin`.
    ///
    /// This is the HUD collaborator surface: invoked once at startup for
    /// the static score label, never from the animation loop.
    pub fn draw_string(&mut self, origin: IVec2, text: &str, fg: u16, bg: u16) {
        let mut x = origin.x;
        for ch in text.chars() {
            let glyph = glyph_columns(ch);
            for (col, bits) in glyph.iter().enumerate() {
                for row in 0..7 {
                    let p = IVec2::new(x + col as i32, origin.y + row);
                    if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
                        continue;
                    }
                    let on = (bits >> row) & 1 == 1;
                    let idx = self.index(p);
                    self.pixels[idx] = if on { fg } else { bg };
                }
            }
            x += 6; // 5 columns + 1 gap
        }
    }
}

impl DisplaySink for Framebuffer {
    fn set_active_window(&mut self, window: Region) {
        debug_assert!(
            window.top_left.x >= 0
                && window.top_left.y >= 0
                && window.bot_right.x < self.width
                && window.bot_right.y < self.height,
            "window off screen: {window:?}"
        );
        self.cursor = window.top_left;
        self.window = Some(window);
    }

    fn write_next_color(&mut self, color: u16) {
        let Some(window) = self.window else {
            debug_assert!(false, "write with no active window");
            return;
        };
        let idx = self.index(self.cursor);
        self.pixels[idx] = color;

        // Advance row-major within the window
        self.cursor.x += 1;
        if self.cursor.x > window.bot_right.x {
            self.cursor.x = window.top_left.x;
            self.cursor.y += 1;
            if self.cursor.y > window.bot_right.y {
                // Window filled exactly; further writes need a new window
                self.window = None;
            }
        }
    }
}

/// Column bitmaps (LSB = top row) for the handful of 5x7 glyphs the HUD
/// label needs. Unknown characters render as blanks.
fn glyph_columns(ch: char) -> [u8; 5] {
    match ch {
        '0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        '1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        '2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        '3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        '4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        '5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        '6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        '7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        '8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        '9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        ':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        'S' => [0x46, 0x49, 0x49, 0x49, 0x31],
        'C' => [0x3E, 0x41, 0x41, 0x41, 0x22],
        'O' => [0x3E, 0x41, 0x41, 0x41, 0x3E],
        'R' => [0x7F, 0x09, 0x19, 0x29, 0x46],
        'E' => [0x7F, 0x49, 0x49, 0x49, 0x41],
        _ => [0; 5],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color;

    #[test]
    fn test_window_writes_row_major() {
        let mut fb = Framebuffer::new(8, 8);
        fb.set_active_window(Region::new(IVec2::new(2, 3), IVec2::new(4, 4)));
        for c in 1..=6u16 {
            fb.write_next_color(c);
        }
        assert_eq!(fb.pixel(IVec2::new(2, 3)), 1);
        assert_eq!(fb.pixel(IVec2::new(4, 3)), 3);
        assert_eq!(fb.pixel(IVec2::new(2, 4)), 4);
        assert_eq!(fb.pixel(IVec2::new(4, 4)), 6);
        // Nothing outside the window was touched
        assert_eq!(fb.pixel(IVec2::new(5, 3)), 0);
        assert_eq!(fb.pixel(IVec2::new(2, 5)), 0);
    }

    #[test]
    fn test_single_pixel_window() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_active_window(Region::new(IVec2::new(1, 1), IVec2::new(1, 1)));
        fb.write_next_color(7);
        assert_eq!(fb.pixel(IVec2::new(1, 1)), 7);
    }

    #[test]
    fn test_draw_string_sets_glyph_pixels() {
        let mut fb = Framebuffer::new(64, 16);
        fb.draw_string(IVec2::new(1, 1), "0", color::GREEN, color::BLACK);
        // '0' has filled sides and a gap beside the diagonal on its middle row
        assert_eq!(fb.pixel(IVec2::new(1, 4)), color::GREEN);
        assert_eq!(fb.pixel(IVec2::new(2, 4)), color::BLACK);
        assert_eq!(fb.pixel(IVec2::new(5, 4)), color::GREEN);
    }
}
