//! Plane mesh and amplitude-map parameters.

use crate::error::{ensure_finite, ensure_positive, grid_vertex_count, ConfigError};

use super::FractalParams;

/// Plane geometry centred on the origin, lying in XY with heights along Z
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneParams {
    /// Extent along X (world units)
    pub width: f32,

    /// Extent along Y (world units)
    pub height: f32,

    /// Cells along X (vertices per row = width_segments + 1)
    pub width_segments: usize,

    /// Cells along Y (vertex rows = height_segments + 1)
    pub height_segments: usize,
}

impl PlaneParams {
    /// Vertices in the grid; call after `validate` for huge segment counts
    pub fn vertex_count(&self) -> usize {
        (self.width_segments + 1) * (self.height_segments + 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width_segments == 0 || self.height_segments == 0 {
            return Err(ConfigError::ZeroSegments {
                columns: self.width_segments,
                rows: self.height_segments,
            });
        }

        let columns = self.width_segments.checked_add(1);
        let rows = self.height_segments.checked_add(1);
        let fits = columns
            .zip(rows)
            .and_then(|(columns, rows)| grid_vertex_count(columns, rows));
        if fits.is_none() {
            return Err(ConfigError::TooManyVertices {
                columns: self.width_segments,
                rows: self.height_segments,
            });
        }

        ensure_positive("plane", "width", self.width as f64)?;
        ensure_positive("plane", "height", self.height as f64)
    }
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            width: 25.0,
            height: 80.0,
            width_segments: 40,
            height_segments: 50,
        }
    }
}

/// How per-vertex amplitude multipliers are derived from rest positions
#[derive(Debug, Clone, PartialEq)]
pub enum AmplitudeMapParams {
    /// Every vertex gets the same multiplier
    Uniform(f32),

    /// `min + range * 0.5 * (fractal(p * frequency) + 1)`
    Noise {
        /// Spatial frequency of the map (per unit length, low = broad regions)
        frequency: f64,
        fractal: FractalParams,
        /// Multiplier where the map noise is at -1
        min: f32,
        /// Added multiplier where the map noise is at +1
        range: f32,
    },
}

impl AmplitudeMapParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Uniform(value) => ensure_finite("amplitude map", "value", *value as f64),
            Self::Noise {
                frequency,
                fractal,
                min,
                range,
            } => {
                ensure_finite("amplitude map", "frequency", *frequency)?;
                ensure_finite("amplitude map", "min", *min as f64)?;
                ensure_finite("amplitude map", "range", *range as f64)?;
                fractal.validate("amplitude map")
            }
        }
    }
}

impl Default for AmplitudeMapParams {
    fn default() -> Self {
        Self::Noise {
            frequency: 0.12,
            fractal: FractalParams::new(3, 0.55, 1.9),
            min: 0.6,
            range: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_vertex_count() {
        let plane = PlaneParams::default();
        assert_eq!(plane.vertex_count(), 41 * 51);
    }

    #[test]
    fn test_plane_validation() {
        let mut plane = PlaneParams::default();
        assert_eq!(plane.validate(), Ok(()));

        plane.height_segments = 0;
        assert_eq!(
            plane.validate(),
            Err(ConfigError::ZeroSegments {
                columns: 40,
                rows: 0
            })
        );

        let plane = PlaneParams {
            width: 0.0,
            ..PlaneParams::default()
        };
        assert!(plane.validate().is_err());
    }

    #[test]
    fn test_oversized_plane_rejected() {
        let huge = PlaneParams {
            width_segments: usize::MAX,
            height_segments: 1,
            ..PlaneParams::default()
        };
        assert_eq!(
            huge.validate(),
            Err(ConfigError::TooManyVertices {
                columns: usize::MAX,
                rows: 1
            })
        );

        // 65536 x 65536 vertices is exactly the u32 index range
        let at_limit = PlaneParams {
            width_segments: 65535,
            height_segments: 65535,
            ..PlaneParams::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));

        let past_limit = PlaneParams {
            width_segments: 65536,
            ..at_limit
        };
        assert!(matches!(
            past_limit.validate(),
            Err(ConfigError::TooManyVertices { .. })
        ));
    }

    #[test]
    fn test_amplitude_map_validation() {
        assert_eq!(AmplitudeMapParams::default().validate(), Ok(()));
        assert!(AmplitudeMapParams::Uniform(f32::INFINITY).validate().is_err());
    }
}
