//! Clock module - monotonic time and frame pacing
//!
//! The session measures every deadline and interval against a [`Clock`] rather
//! than frame counts, so behavior does not depend on the achieved frame rate.

use std::time::{Duration, Instant};

/// Monotonic time source with a voluntary sleep
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;

    /// Block (or pretend to) for `d`
    fn sleep(&mut self, d: Duration);
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Deterministic clock: time only moves when told to, and `sleep` advances it.
///
/// Used for headless runs and replays.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, d: Duration) {
        self.now += d;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, d: Duration) {
        self.advance(d);
    }
}

/// Caps loop iterations per second, in the manner of a game-loop tick.
///
/// Each call sleeps until one frame interval after the previous call returned (or
/// after the first call was made), but never past `deadline`.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    interval: Duration,
    last_tick: Option<Duration>,
}

impl FrameLimiter {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / frame_rate.max(1),
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn wait(&mut self, clock: &mut impl Clock, deadline: Duration) {
        let now = clock.now();
        let last = self.last_tick.unwrap_or(now);
        let target = (last + self.interval).min(deadline);
        if target > now {
            clock.sleep(target - now);
        }
        self.last_tick = Some(clock.now());
    }
}
