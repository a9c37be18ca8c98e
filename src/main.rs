//! Clothwave - a slowly moving cloth backdrop
//!
//! A dense plane whose vertices rise and fall with layered, warped value
//! noise. Runs in real time or records numbered PNG frames.

use anyhow::Context;
use clap::Parser;

use clothwave::cli::Args;
use clothwave::clock::{FixedStepClock, WallClock};
use clothwave::driver::{Animator, DiscardSink};
use clothwave::rendering::{FrameRenderer, PngRecorder};
use clothwave::surface::SurfaceSystem;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    log::info!("Clothwave - procedural cloth backdrop");

    // All configuration is checked here, once, before the first frame
    let surface_params = args
        .surface_params()
        .context("Invalid surface configuration")?;
    let surface = SurfaceSystem::new(&surface_params).context("Invalid surface configuration")?;
    let render_config = args.render_config();
    render_config
        .validate()
        .context("Invalid render configuration")?;
    let renderer = FrameRenderer::new(&render_config)?;

    log::info!(
        "Surface: {} vertices, output {}x{}",
        surface.mesh.vertex_count(),
        render_config.width,
        render_config.height
    );

    match args.create_recording_config() {
        Some(recording) => {
            recording
                .validate()
                .context("Invalid recording configuration")?;
            let frames = recording.total_frames();
            log::info!(
                "Recording {} frames at {} fps to {}",
                frames,
                recording.fps,
                recording.frames_dir()
            );

            let mut sink = PngRecorder::from_config(&recording)?;
            let mut animator =
                Animator::new(surface, renderer, FixedStepClock::new(recording.fps));
            animator.run(frames, &mut sink)?;
            log::info!("Wrote {} frames", sink.written());
        }
        None => {
            let duration = args
                .realtime_duration()
                .context("Invalid real-time configuration")?;

            let mut animator = Animator::new(surface, renderer, WallClock::new());
            animator.run_paced(args.fps, duration, &mut DiscardSink)?;
        }
    }

    Ok(())
}
