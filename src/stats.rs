use std::time::{Duration, Instant};

/// Window over which completed frames are folded into one FPS reading.
pub const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Counter-and-timer pair for throughput: the loop reports each completed
/// sampling call and the counter emits a frames-per-second reading once
/// per window. The sampler itself never tracks this.
#[derive(Debug)]
pub struct FpsCounter {
    frames: u32,
    window_start: Instant,
    fps: f32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            window_start: now,
            fps: 0.0,
        }
    }

    /// Record one completed frame and return the current reading. The
    /// reading only changes when a full window has elapsed.
    pub fn tick(&mut self, now: Instant) -> f32 {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed >= FPS_WINDOW {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
        }
        self.fps
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Discard the partial window, e.g. after sitting frozen for a while.
    pub fn reset(&mut self, now: Instant) {
        self.frames = 0;
        self.window_start = now;
    }
}
