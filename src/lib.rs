//! Micro Pong - layered shape animation on a small pixel display
//!
//! Core modules:
//! - `sim`: Deterministic simulation (shapes, layer stack, bounce physics)
//! - `renderer`: Top-wins compositor over a row-major display sink
//! - `sched`: Tick scheduler bridging the periodic interrupt and the
//!   foreground render loop
//! - `tuning`: Data-driven knobs with file override

pub mod renderer;
pub mod sched;
pub mod sim;
pub mod tuning;

pub use sched::{Engine, InputSource};
pub use tuning::Tuning;

use glam::IVec2;

/// Display and timing constants
pub mod consts {
    /// Display width in pixels
    pub const SCREEN_WIDTH: i32 = 128;
    /// Display height in pixels
    pub const SCREEN_HEIGHT: i32 = 160;

    /// Raw periodic-interrupt rate (Hz)
    pub const TICK_RATE_HZ: u32 = 250;
    /// Raw ticks per game tick; effective game rate = 250/15 ≈ 16.7 Hz
    pub const TICK_DIVISOR: u32 = 15;

    /// Band width of the RectOutline shape, in pixels
    pub const OUTLINE_WIDTH: i32 = 1;
}

/// Inclusive region covering the whole display
#[inline]
pub fn screen_region() -> sim::Region {
    sim::Region::new(
        IVec2::ZERO,
        IVec2::new(consts::SCREEN_WIDTH - 1, consts::SCREEN_HEIGHT - 1),
    )
}
