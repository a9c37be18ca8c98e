//! Command-line argument parsing.

use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;
use crate::params::{Preset, RecordingConfig, RenderConfig, SurfaceParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "clothwave")]
#[command(about = "Animated cloth backdrop driven by procedural noise", long_about = None)]
pub struct Args {
    /// Backdrop preset: waves (default), swell, cloth
    #[arg(long, value_name = "PRESET", default_value = "waves")]
    pub preset: String,

    /// Noise seed (0 = reference field)
    #[arg(long, default_value_t = 0)]
    pub seed: u32,

    /// Override plane segments, e.g. 120x80
    #[arg(long, value_name = "COLSxROWS")]
    pub segments: Option<String>,

    /// Record frames to PNG (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Record grayscale heightmaps instead of shaded frames
    #[arg(long)]
    pub heightmap: bool,

    /// Output directory for recorded frames
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub output: String,

    /// Frame rate (recording step and real-time pacing)
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Output width (pixels)
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Output height (pixels)
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Stop real-time mode after this many seconds (runs until killed if absent)
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f32>,
}

impl Args {
    /// Parse preset from command-line arguments
    pub fn parse_preset(&self) -> Result<Preset, ConfigError> {
        Preset::from_name(&self.preset)
            .ok_or_else(|| ConfigError::UnknownPreset(self.preset.clone()))
    }

    /// Surface parameters for the chosen preset with overrides applied
    pub fn surface_params(&self) -> Result<SurfaceParams, ConfigError> {
        let preset = self.parse_preset()?;
        let mut params = preset.surface();
        params.field.seed = self.seed;

        if let Some(spec) = &self.segments {
            let (columns, rows) =
                parse_segments(spec).ok_or_else(|| ConfigError::MalformedSegments(spec.clone()))?;
            params.plane.width_segments = columns;
            params.plane.height_segments = rows;
        }
        params.validate()?;

        log::info!(
            "Preset: {} ({}x{} segments, {} layers)",
            preset.name(),
            params.plane.width_segments,
            params.plane.height_segments,
            params.field.layers.len()
        );
        Ok(params)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            ..RenderConfig::default()
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| RecordingConfig {
            duration_secs: duration,
            output_dir: self.output.clone(),
            fps: self.fps,
            heightmap: self.heightmap,
        })
    }

    /// How long real-time mode runs; `None` means until the process is killed
    pub fn realtime_duration(&self) -> Result<Option<Duration>, ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        match self.duration {
            None => Ok(None),
            Some(secs) if secs.is_finite() && secs >= 0.0 => {
                Ok(Some(Duration::from_secs_f32(secs)))
            }
            Some(secs) => Err(ConfigError::InvalidDuration {
                what: "real-time",
                bound: ">= 0",
                value: secs as f64,
            }),
        }
    }
}

/// Parse `COLSxROWS`
fn parse_segments(spec: &str) -> Option<(usize, usize)> {
    let (columns, rows) = spec.to_lowercase().split_once('x').map(|(c, r)| {
        (c.trim().parse().ok(), r.trim().parse().ok())
    })?;
    Some((columns?, rows?))
}
