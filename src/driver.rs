//! Animation driver: one explicit context, one step per frame.

use std::time::{Duration, Instant};

use image::RgbImage;

use crate::clock::FrameClock;
use crate::error::ConfigError;
use crate::rendering::FrameRenderer;
use crate::surface::{ClothMesh, SurfaceSystem};

/// Summary of one animated frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub index: u64,
    pub time_s: f64,
    pub min_height: f32,
    pub max_height: f32,
}

/// A finished frame handed to a sink
pub struct Frame<'a> {
    pub stats: FrameStats,
    pub mesh: &'a ClothMesh,
    pub image: &'a RgbImage,
    /// Bound on |height| including the amplitude map, for normalising output
    pub height_bound: f64,
}

/// Receives every submitted frame
pub trait FrameSink {
    fn submit(&mut self, frame: &Frame<'_>) -> anyhow::Result<()>;
}

/// Sink that drops frames (real-time preview without output)
#[derive(Debug, Default)]
pub struct DiscardSink;

impl FrameSink for DiscardSink {
    fn submit(&mut self, _frame: &Frame<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Main animation state
pub struct Animator<C: FrameClock> {
    surface: SurfaceSystem,
    renderer: FrameRenderer,
    clock: C,
    last_time_s: f64,
    frame: u64,
}

impl<C: FrameClock> Animator<C> {
    pub fn new(surface: SurfaceSystem, renderer: FrameRenderer, clock: C) -> Self {
        Self {
            surface,
            renderer,
            clock,
            last_time_s: 0.0,
            frame: 0,
        }
    }

    pub fn surface(&self) -> &SurfaceSystem {
        &self.surface
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    /// Frames stepped so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Viewport change from the host; the surface is untouched
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        self.renderer.resize(width, height)
    }

    /// Animate and shade one frame.
    ///
    /// The sampled time is clamped so a frame never precedes the previous one.
    pub fn step(&mut self) -> FrameStats {
        let time_s = self.clock.now_s().max(self.last_time_s);
        self.last_time_s = time_s;

        self.surface.update(time_s);
        self.renderer.render(&self.surface.mesh);

        let (min_height, max_height) = self.surface.mesh.height_range();
        let stats = FrameStats {
            index: self.frame,
            time_s,
            min_height,
            max_height,
        };
        self.frame += 1;

        log::debug!(
            "Frame {} t={:.3}s height [{:.3}, {:.3}]",
            stats.index,
            stats.time_s,
            stats.min_height,
            stats.max_height
        );
        stats
    }

    /// Step once and hand the result to `sink`
    pub fn step_and_submit(&mut self, sink: &mut dyn FrameSink) -> anyhow::Result<FrameStats> {
        let stats = self.step();
        let frame = Frame {
            stats,
            mesh: &self.surface.mesh,
            image: self.renderer.image(),
            height_bound: self.surface.height_bound(),
        };
        sink.submit(&frame)?;
        Ok(stats)
    }

    /// Run a fixed number of frames back to back (recording)
    pub fn run(&mut self, frames: usize, sink: &mut dyn FrameSink) -> anyhow::Result<()> {
        let start = Instant::now();
        for i in 0..frames {
            self.step_and_submit(sink)?;
            if (i + 1) % 60 == 0 {
                log::info!("Recorded {}/{} frames", i + 1, frames);
            }
        }
        log::info!(
            "Finished {} frames in {:.2}s",
            frames,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Run paced to `fps` until `duration` elapses, or forever if `None`
    pub fn run_paced(
        &mut self,
        fps: u32,
        duration: Option<Duration>,
        sink: &mut dyn FrameSink,
    ) -> anyhow::Result<()> {
        let interval = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        let start = Instant::now();
        let mut window_start = start;
        let mut window_frames = 0u32;

        loop {
            let tick = Instant::now();
            if duration.is_some_and(|d| tick.duration_since(start) >= d) {
                break;
            }

            self.step_and_submit(sink)?;
            window_frames += 1;

            let window = window_start.elapsed();
            if window >= Duration::from_secs(1) {
                log::info!(
                    "{:.1} fps ({} frames)",
                    window_frames as f64 / window.as_secs_f64(),
                    self.frame
                );
                window_start = Instant::now();
                window_frames = 0;
            }

            if let Some(rest) = interval.checked_sub(tick.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        Ok(())
    }
}
