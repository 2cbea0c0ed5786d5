//! Tick scheduling and the interrupt/foreground handoff
//!
//! Two execution contexts share the scene: a periodic "interrupt" handler
//! (`Engine::on_tick`, driven by a timer thread or called directly in
//! tests) and the foreground render loop. The original hardware masked
//! interrupts around the position commit; here the scene mutex is that
//! critical section, and the redraw flag plus condvar replace the
//! busy-poll-then-sleep CPU-off loop.
//!
//! Field ownership: the handler writes `velocity` and `pos_next` and sets
//! the redraw flag; the foreground commits `pos`/`pos_last` and clears the
//! flag. The flag, not the wake itself, is authoritative: wakes can
//! coalesce, so the loop re-checks it on every wakeup.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crate::consts::TICK_RATE_HZ;
use crate::renderer::{self, DisplaySink};
use crate::sim::{self, Scene};
use crate::tuning::Tuning;

/// Debounced button state, the boundary to the switch driver.
///
/// Returns the active-low bitmask; sampled synchronously from the tick
/// handler, never from the foreground.
pub trait InputSource: Send + Sync {
    fn read_buttons(&self) -> u8;
}

/// All buttons released; the no-input source
pub struct Released;

impl InputSource for Released {
    fn read_buttons(&self) -> u8 {
        0xFF
    }
}

/// The scheduler: owns the shared scene and the redraw handoff
pub struct Engine {
    scene: Mutex<Scene>,
    redraw: Mutex<bool>,
    redraw_cv: Condvar,
    raw_ticks: AtomicU32,
    tuning: Tuning,
}

fn recover<'a, T>(
    r: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    // Scene and flag are plain data; a panicked holder leaves them valid
    r.unwrap_or_else(PoisonError::into_inner)
}

impl Engine {
    pub fn new(scene: Scene, mut tuning: Tuning) -> Self {
        // A zero divisor would never fire a game tick (and would divide by
        // zero in the handler); treat it as 1
        tuning.tick_divisor = tuning.tick_divisor.max(1);
        Self {
            scene: Mutex::new(scene),
            redraw: Mutex::new(false),
            redraw_cv: Condvar::new(),
            raw_ticks: AtomicU32::new(0),
            tuning,
        }
    }

    /// The periodic interrupt handler.
    ///
    /// Fires every raw tick; every `tick_divisor`-th call it samples the
    /// buttons, runs one game tick, and raises the redraw flag.
    pub fn on_tick(&self, input: &dyn InputSource) {
        let n = self.raw_ticks.fetch_add(1, Ordering::Relaxed) + 1;
        if n % self.tuning.tick_divisor != 0 {
            return;
        }
        log::trace!("game tick {}", n / self.tuning.tick_divisor);

        let buttons = input.read_buttons();
        {
            let mut scene = recover(self.scene.lock());
            sim::tick(&mut scene, buttons, self.tuning.paddle_speed);
        }

        let mut pending = recover(self.redraw.lock());
        *pending = true;
        self.redraw_cv.notify_one();
    }

    /// Is a redraw currently pending?
    pub fn redraw_pending(&self) -> bool {
        *recover(self.redraw.lock())
    }

    /// Clone the scene as the foreground would see it right now
    pub fn snapshot(&self) -> Scene {
        recover(self.scene.lock()).clone()
    }

    /// One foreground frame: sleep until a redraw is pending, commit the
    /// position double buffer, repaint the disturbed windows, clear the
    /// flag.
    ///
    /// The commit and snapshot happen under the scene lock; pixel writes do
    /// not, so a render in progress never delays the tick handler.
    pub fn render_frame(&self, sink: &mut impl DisplaySink) {
        {
            let mut pending = recover(self.redraw.lock());
            while !*pending {
                // Low-power wait; the tick handler is the sole waker
                pending = recover(self.redraw_cv.wait(pending));
            }
        }

        let frame = {
            let mut scene = recover(self.scene.lock());
            scene.commit_positions();
            scene.clone()
        };
        renderer::draw_moving_layers(&frame, sink);

        *recover(self.redraw.lock()) = false;
        log::debug!("frame rendered");
    }

    /// Run the foreground loop until the process is killed
    pub fn run(&self, sink: &mut impl DisplaySink) -> ! {
        loop {
            self.render_frame(sink);
        }
    }
}

/// Drive `Engine::on_tick` from a std thread at the raw tick rate.
///
/// The native stand-in for the hardware timer; the thread runs until the
/// process exits.
pub fn spawn_ticker(engine: Arc<Engine>, input: impl InputSource + 'static) -> thread::JoinHandle<()> {
    let period = Duration::from_micros(1_000_000 / u64::from(TICK_RATE_HZ));
    thread::spawn(move || {
        loop {
            engine.on_tick(&input);
            thread::sleep(period);
        }
    })
}
