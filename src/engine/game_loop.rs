/// Game loop timing and control system
///
/// Implements a fixed timestep simulation clock with variable rendering.
/// Simulation ticks run at a constant rate no matter how fast or slow the
/// display refresh is; the caller renders exactly once per frame regardless
/// of how many ticks were granted.
use std::time::{Duration, Instant};

/// Target simulation rate (ticks per second)
pub const TICK_RATE: u32 = 60;

/// Interval between fixed ticks
pub const TICK_INTERVAL: Duration = Duration::from_micros(1_000_000 / TICK_RATE as u64);

/// Maximum number of simulation ticks per frame to prevent spiral of death
pub const MAX_TICKS_PER_FRAME: u32 = 10;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Fixed-timestep simulation clock
///
/// Tracks a monotonic "next tick due" deadline. Each frame the caller asks
/// how many ticks are due for the current wall-clock instant; after a stall
/// the catch-up work is bounded by [`MAX_TICKS_PER_FRAME`], deliberately
/// letting the simulation fall behind real time instead of spiraling.
pub struct FrameClock {
    /// When the next simulation tick is due
    next_tick: Instant,

    /// Time of last frame (for FPS tracking)
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total ticks granted
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    /// Create a new clock; the first tick comes due immediately after `now`
    pub fn new(now: Instant) -> Self {
        Self {
            next_tick: now,
            last_frame_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame at `now`, returning the number of fixed ticks to run
    ///
    /// `now` is a parameter rather than sampled internally so that tests can
    /// drive the clock with synthetic instants.
    pub fn begin_frame(&mut self, now: Instant) -> u32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        // Grant every tick whose deadline has passed, up to the cap
        let mut ticks = 0;
        while now > self.next_tick && ticks < MAX_TICKS_PER_FRAME {
            self.next_tick += TICK_INTERVAL;
            ticks += 1;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get the fixed tick interval
    pub fn tick_interval(&self) -> Duration {
        TICK_INTERVAL
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks granted
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}
