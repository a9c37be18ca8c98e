//! Static per-vertex amplitude multipliers.

use crate::error::ConfigError;
use crate::noise::{Fractal, ValueNoise};
use crate::params::AmplitudeMapParams;

use super::mesh::ClothMesh;

/// One multiplier per mesh vertex, fixed after construction
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeMap {
    values: Vec<f32>,
}

impl AmplitudeMap {
    /// Derive the map from the mesh rest positions
    pub fn build(
        mesh: &ClothMesh,
        params: &AmplitudeMapParams,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        params.validate()?;

        let values = match params {
            AmplitudeMapParams::Uniform(value) => vec![*value; mesh.vertex_count()],
            AmplitudeMapParams::Noise {
                frequency,
                fractal,
                min,
                range,
            } => {
                let noise = Fractal::new(ValueNoise::new(seed), *fractal);
                (0..mesh.vertex_count())
                    .map(|i| {
                        let p = mesh.rest_position(i) * *frequency;
                        let n = noise.sample(p.x, p.y);
                        (*min as f64 + *range as f64 * (0.5 * (n + 1.0))) as f32
                    })
                    .collect()
            }
        };

        Ok(Self { values })
    }

    /// Wrap explicit multipliers; the caller checks the length against its mesh
    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> f32 {
        self.values[index]
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Largest multiplier magnitude (0 for an empty map)
    pub fn peak(&self) -> f32 {
        self.values.iter().fold(0.0, |peak, v| peak.max(v.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PlaneParams;

    #[test]
    fn test_noise_map_range() {
        let mesh = ClothMesh::plane(&PlaneParams::default()).unwrap();
        let map = AmplitudeMap::build(&mesh, &AmplitudeMapParams::default(), 0).unwrap();

        assert_eq!(map.len(), mesh.vertex_count());
        for &a in map.values() {
            assert!((0.6..=1.4).contains(&a), "amplitude {a}");
        }

        // Not flat: some regions oscillate more than others
        let (lo, hi) = map
            .values()
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &a| (lo.min(a), hi.max(a)));
        assert!(hi - lo > 0.1);
    }

    #[test]
    fn test_uniform_map() {
        let mesh = ClothMesh::plane(&PlaneParams::default()).unwrap();
        let map = AmplitudeMap::build(&mesh, &AmplitudeMapParams::Uniform(1.0), 0).unwrap();
        assert!(map.values().iter().all(|&a| a == 1.0));
    }

    #[test]
    fn test_peak() {
        let map = AmplitudeMap::from_values(vec![0.5, -2.5, 1.75]);
        assert_eq!(map.peak(), 2.5);
        assert_eq!(AmplitudeMap::from_values(Vec::new()).peak(), 0.0);
    }

    #[test]
    fn test_length_matches_mesh_for_many_sizes() {
        for (w, h) in [(1, 1), (2, 3), (17, 5), (300, 300)] {
            let mesh = ClothMesh::plane(&PlaneParams {
                width: 10.0,
                height: 10.0,
                width_segments: w,
                height_segments: h,
            })
            .unwrap();
            let map = AmplitudeMap::build(&mesh, &AmplitudeMapParams::default(), 0).unwrap();
            assert_eq!(map.len(), mesh.vertex_count());
            assert_eq!(map.len(), (w + 1) * (h + 1));
        }
    }
}
