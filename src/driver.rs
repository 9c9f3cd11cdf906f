//! The step loop that advances a grid until told to stop.

use crate::Grid;
use std::{
    ops::ControlFlow,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};
use tracing::debug;

/// A shared run/stop flag for a [`Driver`] loop
///
/// Clones share the same flag, so any holder can stop the loop.
#[derive(Debug, Clone)]
pub struct RunFlag {
    running: Arc<AtomicBool>,
}
impl RunFlag {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    #[inline]
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }
}
impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// The delay between generations and the run-wide step count, adjustable
/// from inside a [`Driver::run`] callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    delay: Option<Duration>,
    steps: u64,
}
impl Pace {
    pub const MIN_DELAY: Duration = Duration::from_millis(10);
    pub const MAX_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(delay: Option<Duration>) -> Self {
        Self { delay, steps: 0 }
    }

    #[inline]
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Replaces the delay; the next pause already uses it
    #[inline]
    pub fn set_delay(&mut self, delay: Option<Duration>) {
        self.delay = delay;
    }

    /// Steps taken since the loop started, unaffected by grid resets
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Halves the delay, down to [`Pace::MIN_DELAY`]
    pub fn faster(&mut self) {
        self.delay = self.delay.map(|delay| (delay / 2).clamp(Self::MIN_DELAY, Self::MAX_DELAY));
    }

    /// Doubles the delay, up to [`Pace::MAX_DELAY`]; an unpaced loop starts at the minimum
    pub fn slower(&mut self) {
        self.delay = Some(match self.delay {
            Some(delay) => (delay * 2).clamp(Self::MIN_DELAY, Self::MAX_DELAY),
            None => Self::MIN_DELAY,
        });
    }
}

/// Repeatedly steps a grid, pacing generations by an optional delay
#[derive(Debug, Clone, Default)]
pub struct Driver {
    pub delay: Option<Duration>,
    pub max_generations: Option<u64>,
}
impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_max_generations(mut self, max: u64) -> Self {
        self.max_generations = Some(max);
        self
    }

    /// Steps `grid` until `flag` is stopped, the generation budget runs out or
    /// `on_generation` breaks
    ///
    /// `on_generation` runs after every step on the driving thread, so it may
    /// mutate the grid between generations. A delay set on the [`Pace`] it
    /// receives applies from the pause that follows. The flag is checked
    /// before every step. Returns the number of steps taken.
    pub fn run<F>(&self, grid: &mut Grid, flag: &RunFlag, mut on_generation: F) -> u64
    where
        F: FnMut(&mut Grid, &mut Pace) -> ControlFlow<()>,
    {
        let mut pace = Pace::new(self.delay);
        while flag.is_running() && self.max_generations.is_none_or(|max| pace.steps < max) {
            grid.step();
            pace.steps += 1;

            if on_generation(grid, &mut pace).is_break() {
                break;
            }
            if let Some(delay) = pace.delay {
                thread::sleep(delay);
            }
        }
        debug!(steps = pace.steps, running = flag.is_running(), "driver loop finished");
        pace.steps
    }
}
