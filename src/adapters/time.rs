//! Time adapters.
//!
//! Implement [`Clock`] for the pet simulation.
//!
//! - [`SystemClock`]: wall clock, seconds since the Unix epoch. Saved
//!   timestamps stay meaningful across restarts, so decay covers the time
//!   the program was closed.
//! - [`ManualClock`]: settable time for tests and accelerated simulation.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::ports::Clock;

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    /// A system clock set before 1970 reads as the epoch itself.
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64())
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self {
            now: Cell::new(start_secs),
        }
    }

    /// Move forward (or, with a negative step, backward) by `secs`.
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}
