//! Micro Pong native entry point
//!
//! Wires the core to stand-ins for the hardware collaborators: an
//! in-memory framebuffer for the LCD, a scripted button source for the
//! switches, and a timer thread for the periodic interrupt. The foreground
//! loop then runs until the process is killed, exactly like the target
//! device runs until power-off.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use glam::IVec2;

use micro_pong::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_DIVISOR, TICK_RATE_HZ};
use micro_pong::renderer::{Framebuffer, color, draw_full};
use micro_pong::sim::Scene;
use micro_pong::{Engine, InputSource, Tuning, sched};

/// Scripted switches: hold left for a second, release, hold right, repeat
struct DemoButtons {
    ticks: AtomicU32,
}

impl InputSource for DemoButtons {
    fn read_buttons(&self) -> u8 {
        // Sampled once per game tick, so a phase lasts about a second
        let t = self.ticks.fetch_add(1, Ordering::Relaxed);
        match t / (TICK_RATE_HZ / TICK_DIVISOR) % 4 {
            0 => 0b1110, // left held
            2 => 0b0111, // right held
            _ => 0b1111, // released
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("micro-pong starting");

    let tuning = Tuning::load();
    let scene = Scene::pong(&tuning);

    let mut display = Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    // Startup-only passes: full compositor sweep plus the static HUD label
    draw_full(&scene, &mut display);
    display.draw_string(IVec2::new(40, 2), "SCORE: 0", color::GREEN, color::BLACK);

    let engine = Arc::new(Engine::new(scene, tuning));
    let _ticker = sched::spawn_ticker(
        engine.clone(),
        DemoButtons { ticks: AtomicU32::new(0) },
    );
    log::info!("tick source running at {TICK_RATE_HZ} Hz");

    // Never returns; the device runs until power-off
    engine.run(&mut display)
}
