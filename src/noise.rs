//! Lattice value noise and its fractal sum.
//!
//! Both types implement [`noise::NoiseFn`] so they can be composed with the
//! rest of the `noise` ecosystem, but the lattice hash is our own: a scaled
//! sine whose fractional part is repeatable and visually decorrelated. It is
//! not meant to be cryptographically random.

use noise::{NoiseFn, Seedable};

use crate::params::FractalParams;

const HASH_X: f64 = 127.1;
const HASH_Y: f64 = 311.7;
const HASH_SEED: f64 = 74.7;
const HASH_SCALE: f64 = 43758.5453123;

/// Fractional part, always in [0, 1) for finite input
#[inline]
fn fract(v: f64) -> f64 {
    v - v.floor()
}

/// Cubic Hermite ease: 0 ↦ 0, 1 ↦ 1, zero slope at both ends
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Smoothed 2D value noise in [-1, 1)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Pseudo-random lattice value in [0, 1) for integer-valued coordinates
    pub fn lattice(&self, xi: f64, yi: f64) -> f64 {
        let phase = xi * HASH_X + yi * HASH_Y + self.seed as f64 * HASH_SEED;
        fract(phase.sin() * HASH_SCALE)
    }

    /// Bilinear blend of the four surrounding lattice values, eased so the
    /// field and its first derivative are continuous across cell edges.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = x.floor();
        let yi = y.floor();
        let u = smoothstep(x - xi);
        let v = smoothstep(y - yi);

        let v00 = self.lattice(xi, yi);
        let v10 = self.lattice(xi + 1.0, yi);
        let v01 = self.lattice(xi, yi + 1.0);
        let v11 = self.lattice(xi + 1.0, yi + 1.0);

        let bottom = v00 * (1.0 - u) + v10 * u;
        let top = v01 * (1.0 - u) + v11 * u;
        (bottom * (1.0 - v) + top * v) * 2.0 - 1.0
    }
}

impl NoiseFn<f64, 2> for ValueNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

impl Seedable for ValueNoise {
    fn set_seed(self, seed: u32) -> Self {
        Self { seed }
    }

    fn seed(&self) -> u32 {
        self.seed
    }
}

/// Normalized multi-octave sum of a 2D source noise.
///
/// Octave `o` samples the source at frequency `lacunarity^o` with weight
/// `gain^o`; the sum is divided by the total weight, so with a source in
/// [-1, 1] the result stays in [-1, 1] for any octave count.
#[derive(Clone, Copy, Debug)]
pub struct Fractal<N = ValueNoise> {
    source: N,
    params: FractalParams,
}

impl<N: NoiseFn<f64, 2>> Fractal<N> {
    pub fn new(source: N, params: FractalParams) -> Self {
        Self { source, params }
    }

    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut sum = 0.0;
        let mut norm = 0.0;

        for _ in 0..self.params.octaves {
            sum += amplitude * self.source.get([x * frequency, y * frequency]);
            norm += amplitude;
            amplitude *= self.params.gain;
            frequency *= self.params.lacunarity;
        }

        sum / norm
    }
}

impl<N: NoiseFn<f64, 2>> NoiseFn<f64, 2> for Fractal<N> {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

impl<N: Seedable> Seedable for Fractal<N> {
    fn set_seed(self, seed: u32) -> Self {
        Self {
            source: self.source.set_seed(seed),
            params: self.params,
        }
    }

    fn seed(&self) -> u32 {
        self.source.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);

        // Zero slope at both ends (finite difference)
        let h = 1e-6;
        assert!((smoothstep(h) - smoothstep(0.0)) / h < 1e-5);
        assert!((smoothstep(1.0) - smoothstep(1.0 - h)) / h < 1e-5);
    }

    #[test]
    fn test_lattice_is_deterministic_and_in_unit_range() {
        let noise = ValueNoise::default();
        for yi in -20..20 {
            for xi in -20..20 {
                let a = noise.lattice(xi as f64, yi as f64);
                let b = noise.lattice(xi as f64, yi as f64);
                assert_eq!(a.to_bits(), b.to_bits());
                assert!((0.0..1.0).contains(&a), "lattice({xi}, {yi}) = {a}");
            }
        }
    }

    #[test]
    fn test_lattice_reference_values() {
        let noise = ValueNoise::default();
        assert_eq!(noise.lattice(0.0, 0.0), 0.0);
        assert!((noise.lattice(1.0, 0.0) - 0.325_623_615_965_014_3).abs() < 1e-9);
    }

    #[test]
    fn test_seed_changes_field() {
        let a = ValueNoise::new(0);
        let b = a.set_seed(7);
        assert_eq!(b.seed(), 7);

        let differs = (0..16).any(|i| {
            let p = [i as f64 * 0.37 + 0.1, i as f64 * 0.53 + 0.2];
            a.get(p) != b.get(p)
        });
        assert!(differs);
    }

    #[test]
    fn test_value_noise_reference_value() {
        let noise = ValueNoise::default();
        assert!((noise.sample(0.5, 0.5) - -0.375_200_242_388_018_5).abs() < 1e-9);
    }

    #[test]
    fn test_value_noise_continuous_across_cell_edges() {
        let noise = ValueNoise::default();
        let eps = 1e-9;
        for i in -5..5 {
            let edge = i as f64;
            for j in 0..10 {
                let along = j as f64 * 0.173 - 0.8;

                // Vertical edge x = edge, approached from both cells
                let left = noise.sample(edge - eps, along);
                let right = noise.sample(edge, along);
                assert!((left - right).abs() < 1e-6, "seam at x = {edge}");

                // Horizontal edge y = edge
                let below = noise.sample(along, edge - eps);
                let above = noise.sample(along, edge);
                assert!((below - above).abs() < 1e-6, "seam at y = {edge}");
            }
        }
    }

    #[test]
    fn test_value_noise_slope_continuous_across_cell_edges() {
        let noise = ValueNoise::default();
        let h = 1e-5;
        for i in -3..3 {
            let edge = i as f64;
            let y = 0.41;
            let slope_left = (noise.sample(edge, y) - noise.sample(edge - h, y)) / h;
            let slope_right = (noise.sample(edge + h, y) - noise.sample(edge, y)) / h;
            assert!(
                (slope_left - slope_right).abs() < 1e-3,
                "derivative jump at x = {edge}: {slope_left} vs {slope_right}"
            );
        }
    }

    #[test]
    fn test_fractal_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for octaves in 1..=8 {
            let params = FractalParams {
                octaves,
                gain: rng.gen_range(0.1..1.0),
                lacunarity: rng.gen_range(1.1..3.0),
            };
            let fractal = Fractal::new(ValueNoise::default(), params);
            for _ in 0..500 {
                let x = rng.gen_range(-1000.0..1000.0);
                let y = rng.gen_range(-1000.0..1000.0);
                let v = fractal.sample(x, y);
                assert!((-1.0..=1.0).contains(&v), "fractal({x}, {y}) = {v}");
            }
        }
    }

    #[test]
    fn test_single_octave_matches_source() {
        let source = ValueNoise::new(3);
        let params = FractalParams {
            octaves: 1,
            gain: 0.5,
            lacunarity: 2.0,
        };
        let fractal = Fractal::new(source, params);
        for i in 0..20 {
            let p = [i as f64 * 0.31 - 2.0, i as f64 * 0.17 + 1.0];
            assert_eq!(fractal.get(p), source.get(p));
        }
    }
}
