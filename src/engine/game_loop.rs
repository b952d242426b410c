/// Frame timing
///
/// The simulation never reads the clock itself; it is handed the elapsed
/// milliseconds since the previous tick, which keeps it deterministic under
/// synthetic delta sequences in tests. Frame pacing comes from the surface's
/// vsync wait, not from here.
use std::time::{Duration, Instant};

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// How often the FPS average is recomputed and logged
const FPS_LOG_INTERVAL: u64 = 120;

/// Per-tick wall clock
pub struct FrameClock {
    last_tick: Instant,
    start_time: Instant,
    frame_times: Vec<Duration>,
    frame_count: u64,
    current_fps: f32,
}

impl FrameClock {
    /// Create a clock; the first tick measures from this moment
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_tick: now,
            start_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Advance the clock and return elapsed milliseconds since the last tick
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % FPS_LOG_INTERVAL == 0 {
            self.update_fps();
            log::debug!("~{:.1} fps", self.current_fps);
        }

        frame_time.as_secs_f64() * 1000.0
    }

    /// Most recently computed FPS average
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Total number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total elapsed time since the clock was created
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

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

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
