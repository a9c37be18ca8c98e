//! Animated surface: mesh + amplitude map + height field.

use glam::DVec2;
use rayon::prelude::*;

use super::amplitude::AmplitudeMap;
use super::mesh::ClothMesh;
use crate::error::ConfigError;
use crate::field::HeightField;
use crate::params::SurfaceParams;

/// High-level surface system: evaluates the field for every vertex each frame
pub struct SurfaceSystem {
    pub mesh: ClothMesh,
    amplitude: AmplitudeMap,
    field: HeightField,
    /// Scratch buffer for the parallel evaluation pass
    heights: Vec<f32>,
}

impl SurfaceSystem {
    /// Create a surface system from validated parameters
    pub fn new(params: &SurfaceParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let mesh = ClothMesh::plane(&params.plane)?;
        let amplitude = AmplitudeMap::build(&mesh, &params.amplitude, params.field.seed)?;
        let field = HeightField::new(params.field.clone())?;
        Self::from_parts(mesh, amplitude, field)
    }

    /// Assemble a surface from prebuilt parts, enforcing one multiplier per vertex
    pub fn from_parts(
        mesh: ClothMesh,
        amplitude: AmplitudeMap,
        field: HeightField,
    ) -> Result<Self, ConfigError> {
        if amplitude.len() != mesh.vertex_count() {
            return Err(ConfigError::AmplitudeMapMismatch {
                map: amplitude.len(),
                mesh: mesh.vertex_count(),
            });
        }

        let heights = vec![0.0; mesh.vertex_count()];
        Ok(Self {
            mesh,
            amplitude,
            field,
            heights,
        })
    }

    pub fn amplitude(&self) -> &AmplitudeMap {
        &self.amplitude
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Bound on |height| over the whole mesh: the field bound times the
    /// largest amplitude multiplier
    pub fn height_bound(&self) -> f64 {
        self.field.height_bound() * self.amplitude.peak() as f64
    }

    /// Heights computed by the last update, one per vertex
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height of one vertex at `time_s` without touching the mesh
    pub fn height_at(&self, index: usize, time_s: f64) -> f64 {
        self.field.sample(
            self.mesh.rest_position(index),
            time_s,
            self.amplitude.get(index) as f64,
        )
    }

    /// Advance the surface to `time_s`.
    ///
    /// Heights are evaluated in parallel (each vertex independently), then
    /// written back and normals recomputed on the calling thread.
    pub fn update(&mut self, time_s: f64) {
        let field = &self.field;
        let amplitude = self.amplitude.values();
        let vertices = &self.mesh.vertices;

        self.heights
            .par_iter_mut()
            .zip(vertices.par_iter())
            .zip(amplitude.par_iter())
            .for_each(|((height, vertex), &amp)| {
                let rest = DVec2::new(vertex.position[0] as f64, vertex.position[1] as f64);
                *height = field.sample(rest, time_s, amp as f64) as f32;
            });

        self.mesh.write_heights(&self.heights);
        self.mesh.recompute_normals();
    }
}
