// Frame pacing and tick timing
//
// The clock owns the only blocking wait in the client: each tick sleeps the
// remainder of the target interval, then reports how many whole milliseconds
// actually elapsed since the previous tick. Everything downstream works from
// that integer delta, so animation speed is independent of the achieved rate.

use std::time::{Duration, Instant};

/// Frame clock that paces the loop to a target rate and hands out
/// integer millisecond deltas
pub struct FrameClock {
    /// Target duration of one tick
    target: Duration,

    /// Time of the previous tick
    last_tick: Instant,

    /// Total ticks completed
    tick_count: u64,
}

impl FrameClock {
    /// Create a clock targeting `frame_rate` ticks per second
    pub fn new(frame_rate: u32) -> Self {
        let frame_rate = frame_rate.max(1);
        log::info!("Frame clock targeting {} fps", frame_rate);
        Self {
            target: Duration::from_millis(1000 / frame_rate as u64),
            last_tick: Instant::now(),
            tick_count: 0,
        }
    }

    /// Complete one tick: block until the target interval has elapsed since
    /// the previous tick (or since construction, for the first tick), then
    /// return the elapsed time in whole milliseconds.
    pub fn tick(&mut self) -> u64 {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.target {
            std::thread::sleep(self.target - elapsed);
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.tick_count += 1;

        delta.as_millis() as u64
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Target tick interval
    pub fn target_interval(&self) -> Duration {
        self.target
    }
}
