//! Height-field tuning: fractal octaves, domain warp, wave layers, ridges.

use glam::DVec2;

use crate::error::{ensure_finite, ensure_positive, ConfigError};

/// Octave structure of a fractal noise sum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    /// Number of summed octaves (>= 1)
    pub octaves: u32,

    /// Amplitude multiplier per octave (dimensionless, > 0)
    pub gain: f64,

    /// Frequency multiplier per octave (dimensionless, > 0)
    pub lacunarity: f64,
}

impl FractalParams {
    pub const fn new(octaves: u32, gain: f64, lacunarity: f64) -> Self {
        Self {
            octaves,
            gain,
            lacunarity,
        }
    }

    /// Plain value noise, no extra octaves
    pub const fn single() -> Self {
        Self::new(1, 0.5, 2.0)
    }

    pub fn validate(&self, what: &'static str) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::ZeroOctaves { what });
        }
        ensure_positive(what, "gain", self.gain)?;
        ensure_positive(what, "lacunarity", self.lacunarity)
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self::new(4, 0.5, 2.0)
    }
}

/// One axis of the domain warp: where to sample the warp noise and how it drifts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpAxis {
    /// Spatial frequency applied to the rest position (per unit length)
    pub frequency: DVec2,

    /// Drift of the sample point per second
    pub drift: DVec2,
}

impl WarpAxis {
    fn validate(&self) -> Result<(), ConfigError> {
        for v in [self.frequency, self.drift] {
            ensure_finite("domain warp", "frequency/drift", v.x)?;
            ensure_finite("domain warp", "frequency/drift", v.y)?;
        }
        Ok(())
    }
}

/// Time-varying offset added to sample coordinates so crests meander
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainWarp {
    /// Maximum displacement of the sample point (world units), 0 disables the warp
    pub strength: f64,

    pub x: WarpAxis,
    pub y: WarpAxis,

    pub fractal: FractalParams,
}

impl DomainWarp {
    pub fn none() -> Self {
        Self {
            strength: 0.0,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.strength != 0.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("domain warp", "strength", self.strength)?;
        self.x.validate()?;
        self.y.validate()?;
        self.fractal.validate("domain warp")
    }
}

impl Default for DomainWarp {
    fn default() -> Self {
        Self {
            strength: 0.6,
            x: WarpAxis {
                frequency: DVec2::new(0.15, 0.15),
                drift: DVec2::new(0.1, -0.08),
            },
            y: WarpAxis {
                frequency: DVec2::new(0.12, 0.12),
                drift: DVec2::new(-0.07, 0.09),
            },
            fractal: FractalParams::single(),
        }
    }
}

/// Shape of a single wave layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// `fractal(p * scale + t * drift)`
    Fractal {
        /// Drift of the sample point per second
        drift: DVec2,
        params: FractalParams,
    },

    /// `sin(dot(p, scale) + t * speed + phase)`
    Sine {
        /// Phase speed (radians per second)
        speed: f64,
        /// Phase offset (radians)
        phase: f64,
    },
}

/// A weighted wave layer of the height field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Contribution to the summed height (world units)
    pub weight: f64,

    /// Spatial frequency per axis (per unit length)
    pub scale: DVec2,

    pub waveform: Waveform,
}

impl Layer {
    pub fn fractal(weight: f64, scale: DVec2, drift: DVec2, params: FractalParams) -> Self {
        Self {
            weight,
            scale,
            waveform: Waveform::Fractal { drift, params },
        }
    }

    pub fn sine(weight: f64, scale: DVec2, speed: f64, phase: f64) -> Self {
        Self {
            weight,
            scale,
            waveform: Waveform::Sine { speed, phase },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("layer", "weight", self.weight)?;
        ensure_finite("layer", "scale", self.scale.x)?;
        ensure_finite("layer", "scale", self.scale.y)?;
        match self.waveform {
            Waveform::Fractal { drift, params } => {
                ensure_finite("layer", "drift", drift.x)?;
                ensure_finite("layer", "drift", drift.y)?;
                params.validate("layer")
            }
            Waveform::Sine { speed, phase } => {
                ensure_finite("layer", "speed", speed)?;
                ensure_finite("layer", "phase", phase)
            }
        }
    }
}

/// Full parameter set of the per-frame height field
#[derive(Debug, Clone, PartialEq)]
pub struct HeightFieldParams {
    /// Seed of the lattice hash (0 = reference field)
    pub seed: u32,

    pub warp: DomainWarp,

    /// Summed wave layers, evaluated at the warped coordinates
    pub layers: Vec<Layer>,

    /// Blend toward `(1 - |h|)^2` for sharper crests, 0 disables ridge shaping
    pub ridge_mix: f64,
}

impl HeightFieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers.is_empty() {
            return Err(ConfigError::NoLayers);
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        self.warp.validate()?;
        if !(0.0..=1.0).contains(&self.ridge_mix) {
            return Err(ConfigError::RidgeMixOutOfRange(self.ridge_mix));
        }
        Ok(())
    }

    /// Sum of absolute layer weights (upper bound of the unshaped height)
    pub fn weight_sum(&self) -> f64 {
        self.layers.iter().map(|l| l.weight.abs()).sum()
    }
}

impl Default for HeightFieldParams {
    fn default() -> Self {
        Self {
            seed: 0,
            warp: DomainWarp::default(),
            layers: vec![
                // Primary swell: long and slow
                Layer::fractal(
                    0.5,
                    DVec2::new(0.7, 0.42),
                    DVec2::new(0.1, -0.1),
                    FractalParams::new(4, 0.5, 2.0),
                ),
                // Broad secondary layer
                Layer::fractal(
                    0.3,
                    DVec2::new(0.30, 0.36),
                    DVec2::new(0.18, -0.18),
                    FractalParams::new(4, 0.5, 2.0),
                ),
                // Ripples: shorter and faster
                Layer::fractal(
                    0.4,
                    DVec2::new(0.85, 0.80),
                    DVec2::new(0.35, -0.35),
                    FractalParams::new(3, 0.55, 2.2),
                ),
            ],
            ridge_mix: 0.3,
        }
    }
}
