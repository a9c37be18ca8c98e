//! Named backdrop variants.
//!
//! The variants differ only in tuning: which layers run, whether the sample
//! point is warped, whether crests are sharpened, and how the amplitude map
//! is built. All of them drive the same generator.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use super::{AmplitudeMapParams, DomainWarp, HeightFieldParams, Layer, PlaneParams};
use crate::error::ConfigError;

/// Everything needed to build an animated surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceParams {
    pub plane: PlaneParams,
    pub amplitude: AmplitudeMapParams,
    pub field: HeightFieldParams,
}

impl SurfaceParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.plane.validate()?;
        self.amplitude.validate()?;
        self.field.validate()
    }
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Preset::Waves.surface()
    }
}

/// Backdrop preset selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Warped multi-layer fractal waves with sharpened crests
    #[default]
    Waves,

    /// Two slow fractal layers, no warp, no ridges
    Swell,

    /// Dense fine plane moved by three travelling sines
    Cloth,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Waves => "waves",
            Self::Swell => "swell",
            Self::Cloth => "cloth",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "waves" => Some(Self::Waves),
            "swell" => Some(Self::Swell),
            "cloth" => Some(Self::Cloth),
            _ => None,
        }
    }

    pub fn surface(&self) -> SurfaceParams {
        match self {
            Self::Waves => SurfaceParams {
                plane: PlaneParams::default(),
                amplitude: AmplitudeMapParams::default(),
                field: HeightFieldParams::default(),
            },
            Self::Swell => {
                let mut field = HeightFieldParams {
                    warp: DomainWarp::none(),
                    ridge_mix: 0.0,
                    ..HeightFieldParams::default()
                };
                field.layers.truncate(2);
                SurfaceParams {
                    plane: PlaneParams::default(),
                    amplitude: AmplitudeMapParams::default(),
                    field,
                }
            }
            Self::Cloth => SurfaceParams {
                plane: PlaneParams {
                    width: 16.0,
                    height: 9.0,
                    width_segments: 250,
                    height_segments: 160,
                },
                amplitude: AmplitudeMapParams::Uniform(1.0),
                field: HeightFieldParams {
                    seed: 0,
                    warp: DomainWarp::none(),
                    layers: vec![
                        Layer::sine(0.25, DVec2::new(0.8, 0.0), 0.6, 0.0),
                        Layer::sine(0.15, DVec2::new(0.5, 0.5), -0.3, 0.0),
                        // cos(y + 0.7t)
                        Layer::sine(0.10, DVec2::new(0.0, 1.0), 0.7, FRAC_PI_2),
                    ],
                    ridge_mix: 0.0,
                },
            },
        }
    }
}
