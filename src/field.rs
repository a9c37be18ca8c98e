//! Per-vertex height field: domain warp, layered waves, ridge shaping.
//!
//! [`HeightField::sample`] is a pure function of (rest position, time,
//! amplitude). It holds no mutable state, so every vertex of a frame can be
//! evaluated independently and in any order.

use glam::DVec2;

use crate::error::ConfigError;
use crate::noise::{Fractal, ValueNoise};
use crate::params::{HeightFieldParams, Layer, Waveform};

/// Waveform with its noise source resolved
#[derive(Debug, Clone, Copy)]
enum CompiledWave {
    Fractal { drift: DVec2, fractal: Fractal },
    Sine { speed: f64, phase: f64 },
}

#[derive(Debug, Clone, Copy)]
struct CompiledLayer {
    weight: f64,
    scale: DVec2,
    wave: CompiledWave,
}

impl CompiledLayer {
    fn compile(layer: &Layer, source: ValueNoise) -> Self {
        let wave = match layer.waveform {
            Waveform::Fractal { drift, params } => CompiledWave::Fractal {
                drift,
                fractal: Fractal::new(source, params),
            },
            Waveform::Sine { speed, phase } => CompiledWave::Sine { speed, phase },
        };
        Self {
            weight: layer.weight,
            scale: layer.scale,
            wave,
        }
    }

    fn eval(&self, warped: DVec2, time_s: f64) -> f64 {
        let scale = self.scale;
        let wave = match &self.wave {
            CompiledWave::Fractal { drift, fractal } => {
                let q = warped * scale + *drift * time_s;
                fractal.sample(q.x, q.y)
            }
            CompiledWave::Sine { speed, phase } => {
                (warped.x * scale.x + warped.y * scale.y + time_s * speed + phase).sin()
            }
        };
        self.weight * wave
    }
}

/// Procedural height generator shared by every vertex of the surface
#[derive(Debug, Clone)]
pub struct HeightField {
    params: HeightFieldParams,
    warp: Fractal,
    layers: Vec<CompiledLayer>,
}

impl HeightField {
    /// Validate parameters and build the generator
    pub fn new(params: HeightFieldParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let source = ValueNoise::new(params.seed);
        let warp = Fractal::new(source, params.warp.fractal);
        let layers = params
            .layers
            .iter()
            .map(|layer| CompiledLayer::compile(layer, source))
            .collect();

        Ok(Self {
            params,
            warp,
            layers,
        })
    }

    pub fn params(&self) -> &HeightFieldParams {
        &self.params
    }

    /// Warped sample point. The offset is computed from the rest position
    /// only, never from a previous height.
    pub fn warp(&self, rest: DVec2, time_s: f64) -> DVec2 {
        let warp = &self.params.warp;
        if !warp.is_enabled() {
            return rest;
        }

        let qx = rest * warp.x.frequency + warp.x.drift * time_s;
        let qy = rest * warp.y.frequency + warp.y.drift * time_s;
        DVec2::new(
            rest.x + warp.strength * self.warp.sample(qx.x, qx.y),
            rest.y + warp.strength * self.warp.sample(qy.x, qy.y),
        )
    }

    /// Height before the per-vertex amplitude multiplier
    pub fn shape(&self, rest: DVec2, time_s: f64) -> f64 {
        let warped = self.warp(rest, time_s);
        let height = self
            .layers
            .iter()
            .fold(0.0, |sum, layer| sum + layer.eval(warped, time_s));
        self.ridge(height)
    }

    /// Final height of a vertex at `rest` for the frame at `time_s`
    pub fn sample(&self, rest: DVec2, time_s: f64, amplitude: f64) -> f64 {
        self.shape(rest, time_s) * amplitude
    }

    fn ridge(&self, height: f64) -> f64 {
        let mix = self.params.ridge_mix;
        if mix == 0.0 {
            return height;
        }
        let r = 1.0 - height.abs();
        (1.0 - mix) * height + mix * (r * r)
    }

    /// Bound on |shape| for any input, used to normalise heightmaps
    pub fn height_bound(&self) -> f64 {
        let sum = self.params.weight_sum();
        let mix = self.params.ridge_mix;
        let ridge_peak = (1.0 + sum).powi(2);
        (1.0 - mix) * sum + mix * ridge_peak
    }
}
