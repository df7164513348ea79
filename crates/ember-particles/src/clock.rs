//! Frame clock for hosts that drive the tick from wall time

use std::time::Instant;

/// Produces per-frame deltas for `Manager::tick`.
///
/// The manager itself never reads a clock — the frame source is external —
/// but hosts without their own timing can tick this once per frame and feed
/// the returned delta through.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock and return the frame delta in seconds.
    /// Call once per frame. The first tick yields zero.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Clamp to avoid spiral of death (max 250ms frame time)
        self.delta_time = elapsed.min(0.25);
        self.total_time += self.delta_time;
        self.delta_time as f32
    }
}
