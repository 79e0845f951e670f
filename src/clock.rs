//! Loop driver timing: game clock and frame pacing.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Target frame interval (~60 FPS).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Millisecond time source for the game tick.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for simulations and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) -> u64 {
        self.now.set(self.now.get() + ms);
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Keeps one update + draw per frame interval.
#[derive(Debug)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Instant,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: Instant::now(),
        }
    }

    /// Time left before the next frame is due; zero if it is already due.
    pub fn time_to_next_frame(&self) -> Duration {
        self.interval.saturating_sub(self.last_frame.elapsed())
    }

    /// Returns true (and restarts the interval) when a frame is due.
    pub fn frame_due(&mut self) -> bool {
        if self.last_frame.elapsed() >= self.interval {
            self.last_frame = Instant::now();
            true
        } else {
            false
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(FRAME_INTERVAL_MS))
    }
}
