//! Compositing over a windowed pixel display
//!
//! The display itself is a collaborator behind `DisplaySink`: select a
//! rectangular window, then stream one RGB565 color per pixel in row-major
//! order until the window is full. The compositor resolves each pixel by
//! probing the z-ordered layer stack, top first.

pub mod compose;
pub mod framebuffer;

pub use compose::{compose_window, draw_full, draw_moving_layers};
pub use framebuffer::Framebuffer;

use crate::sim::Region;

/// RGB565 palette (display byte order)
pub mod color {
    pub const BLACK: u16 = 0x0000;
    pub const WHITE: u16 = 0xFFFF;
    pub const BLUE: u16 = 0x001F;
    pub const GREEN: u16 = 0x07E0;
    pub const RED: u16 = 0xF800;
    pub const ORANGE: u16 = 0xFD20;
    pub const VIOLET: u16 = 0xEC1D;
}

/// Row-major windowed pixel sink, the boundary to the display driver
///
/// After `set_active_window(w)` the sink expects exactly `w.area()` calls
/// to `write_next_color`, filling the window row by row, before the window
/// may be changed again.
pub trait DisplaySink {
    fn set_active_window(&mut self, window: Region);
    fn write_next_color(&mut self, color: u16);
}
