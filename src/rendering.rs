//! Headless rendering: viewport, lighting, CPU shading and PNG frame output.

use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec3;
use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::driver::{Frame, FrameSink};
use crate::error::ConfigError;
use crate::params::{RecordingConfig, RenderConfig};
use crate::surface::ClothMesh;

/// Opacity of the surface over the background
const SURFACE_OPACITY: f32 = 0.95;

/// Output dimensions. The height field never sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        *self = Self::new(width, height)?;
        Ok(())
    }
}

/// Ambient term plus one two-sided directional light
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
    /// Unit vector from the surface toward the light
    pub to_light: Vec3,
}

impl Lighting {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            ambient: config.ambient,
            directional: config.directional,
            to_light: config.light_position.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    /// Lambert intensity for a unit normal, clamped to 1
    pub fn intensity(&self, normal: Vec3) -> f32 {
        (self.ambient + self.directional * normal.dot(self.to_light).abs()).min(1.0)
    }
}

/// Shades the mesh into an RGB image the size of the viewport
pub struct FrameRenderer {
    viewport: Viewport,
    lighting: Lighting,
    material: Vec3,
    background: Vec3,
    image: RgbImage,
}

impl FrameRenderer {
    pub fn new(config: &RenderConfig) -> Result<Self, ConfigError> {
        let viewport = Viewport::new(config.width, config.height)?;
        Ok(Self {
            viewport,
            lighting: Lighting::from_config(config),
            material: rgb_to_vec(config.material_rgb),
            background: rgb_to_vec(config.background_rgb),
            image: RgbImage::new(viewport.width(), viewport.height()),
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Last rendered frame
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Viewport change: new output buffer dimensions
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        self.viewport.resize(width, height)?;
        self.image = RgbImage::new(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
        Ok(())
    }

    /// Shade the current mesh state.
    ///
    /// The vertex grid is stretched over the whole viewport and normals are
    /// interpolated bilinearly between the four nearest vertices.
    pub fn render(&mut self, mesh: &ClothMesh) -> &RgbImage {
        let (width, height) = (self.viewport.width(), self.viewport.height());
        let columns = mesh.columns();
        let rows = mesh.rows();

        if columns < 2 || rows < 2 {
            let bg = vec_to_rgb(self.background);
            self.image.pixels_mut().for_each(|p| *p = bg);
            return &self.image;
        }

        let sx = (columns - 1) as f32 / width as f32;
        let sy = (rows - 1) as f32 / height as f32;

        for (px, py, pixel) in self.image.enumerate_pixels_mut() {
            let gx = ((px as f32 + 0.5) * sx).min((columns - 1) as f32);
            let gy = ((py as f32 + 0.5) * sy).min((rows - 1) as f32);
            let normal = sample_normal(mesh, gx, gy);

            let lit = self.material * self.lighting.intensity(normal);
            let color = self.background.lerp(lit, SURFACE_OPACITY);
            *pixel = vec_to_rgb(color);
        }

        &self.image
    }
}

fn sample_normal(mesh: &ClothMesh, gx: f32, gy: f32) -> Vec3 {
    let columns = mesh.columns();
    let x0 = (gx.floor() as usize).min(columns - 2);
    let y0 = (gy.floor() as usize).min(mesh.rows() - 2);
    let fx = gx - x0 as f32;
    let fy = gy - y0 as f32;

    let n = |x: usize, y: usize| Vec3::from_array(mesh.vertices[y * columns + x].normal);
    let top = n(x0, y0).lerp(n(x0 + 1, y0), fx);
    let bottom = n(x0, y0 + 1).lerp(n(x0 + 1, y0 + 1), fx);
    top.lerp(bottom, fy).try_normalize().unwrap_or(Vec3::Z)
}

fn rgb_to_vec(rgb: [u8; 3]) -> Vec3 {
    Vec3::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0
}

fn vec_to_rgb(v: Vec3) -> Rgb<u8> {
    let c = (v.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Rgb([c.x as u8, c.y as u8, c.z as u8])
}

/// Grayscale heightmap, one pixel per vertex.
///
/// Heights in `[-bound, bound]` map to `[0, 255]`; values outside are clamped.
pub fn heightmap(mesh: &ClothMesh, bound: f32) -> GrayImage {
    let columns = mesh.columns() as u32;
    let rows = mesh.rows() as u32;
    let bound = if bound > 0.0 { bound } else { 1.0 };

    GrayImage::from_fn(columns, rows, |x, y| {
        let z = mesh.vertices[(y * columns + x) as usize].position[2];
        let gray = ((z / bound + 1.0) * 127.5).clamp(0.0, 255.0) as u8;
        Luma([gray])
    })
}

/// What the recorder writes for each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutput {
    Shaded,
    Heightmap,
}

/// Writes numbered PNG frames into a directory
pub struct PngRecorder {
    frames_dir: PathBuf,
    output: FrameOutput,
    written: usize,
}

impl PngRecorder {
    /// Create the recorder and its output directory
    pub fn new(frames_dir: impl AsRef<Path>, output: FrameOutput) -> anyhow::Result<Self> {
        let frames_dir = frames_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&frames_dir).with_context(|| {
            format!("Failed to create frames directory {}", frames_dir.display())
        })?;
        Ok(Self {
            frames_dir,
            output,
            written: 0,
        })
    }

    pub fn from_config(config: &RecordingConfig) -> anyhow::Result<Self> {
        let output = if config.heightmap {
            FrameOutput::Heightmap
        } else {
            FrameOutput::Shaded
        };
        Self::new(config.frames_dir(), output)
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.frames_dir.join(format!("frame_{:05}.png", index))
    }

    /// Number of frames saved so far
    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngRecorder {
    fn submit(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        let path = self.frame_path(frame.stats.index);
        match self.output {
            FrameOutput::Shaded => frame.image.save(&path),
            FrameOutput::Heightmap => heightmap(frame.mesh, frame.height_bound as f32).save(&path),
        }
        .with_context(|| format!("Failed to save frame {}", path.display()))?;

        self.written += 1;
        Ok(())
    }
}
