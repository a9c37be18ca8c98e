//! Frame time sources.

use std::time::Instant;

/// Monotonic time source sampled once per frame
pub trait FrameClock {
    /// Seconds since the animation started
    fn now_s(&mut self) -> f64;
}

/// Real time, measured from construction
#[derive(Debug, Clone)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for WallClock {
    fn now_s(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Deterministic clock for recording: frame `i` is at `i / fps`
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    fps: u32,
    frame: u64,
}

impl FixedStepClock {
    pub fn new(fps: u32) -> Self {
        Self { fps, frame: 0 }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl FrameClock for FixedStepClock {
    fn now_s(&mut self) -> f64 {
        let t = self.frame as f64 / self.fps as f64;
        self.frame += 1;
        t
    }
}
