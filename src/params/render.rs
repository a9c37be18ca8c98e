//! Rendering and recording configuration.

use glam::Vec3;

use crate::error::ConfigError;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width (pixels)
    pub width: u32,

    /// Output height (pixels)
    pub height: u32,

    /// Ambient light intensity (0..1)
    pub ambient: f32,

    /// Directional light intensity (0..1)
    pub directional: f32,

    /// Position of the directional light; it shines toward the origin
    pub light_position: Vec3,

    /// Surface colour (sRGB)
    pub material_rgb: [u8; 3],

    /// Clear colour behind the surface (sRGB)
    pub background_rgb: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            ambient: 0.7,
            directional: 0.5,
            light_position: Vec3::new(-5.0, 5.0, 5.0),
            material_rgb: [0xF4, 0xEE, 0xE6],
            background_rgb: [0xED, 0xE1, 0xD4],
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: String,

    /// Frame rate (FPS)
    pub fps: u32,

    /// Write grayscale heightmaps instead of shaded frames
    pub heightmap: bool,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "recording".to_string(),
            fps: 60,
            heightmap: false,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> String {
        format!("{}/frames", self.output_dir)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        let duration = self.duration_secs as f64;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(ConfigError::InvalidDuration {
                what: "recording",
                bound: "> 0",
                value: duration,
            });
        }
        Ok(())
    }
}
