//! Plane mesh: fixed rest positions, per-frame heights and normals.

use bytemuck::{Pod, Zeroable};
use glam::{DVec2, Vec3};

use crate::error::{grid_vertex_count, ConfigError};
use crate::params::PlaneParams;

/// Vertex data for the cloth mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Row-major vertex grid in the XY plane; Z is the animated height
#[derive(Debug, Clone)]
pub struct ClothMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    columns: usize,
    rows: usize,
}

impl ClothMesh {
    /// Build a plane centred on the origin. The first row is the top edge (+Y).
    pub fn plane(params: &PlaneParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let columns = params.width_segments + 1;
        let rows = params.height_segments + 1;
        let half_w = params.width / 2.0;
        let half_h = params.height / 2.0;
        let cell_w = params.width / params.width_segments as f32;
        let cell_h = params.height / params.height_segments as f32;

        let mut rest = Vec::with_capacity(columns * rows);
        for iy in 0..rows {
            let y = iy as f32 * cell_h - half_h;
            for ix in 0..columns {
                let x = ix as f32 * cell_w - half_w;
                rest.push([x, -y]);
            }
        }

        Self::from_rest_positions(columns, rows, &rest)
    }

    /// Build a mesh from explicit rest positions laid out row by row
    pub fn from_rest_positions(
        columns: usize,
        rows: usize,
        rest: &[[f32; 2]],
    ) -> Result<Self, ConfigError> {
        if columns == 0 || rows == 0 || grid_vertex_count(columns, rows) != Some(rest.len()) {
            return Err(ConfigError::GridMismatch {
                columns,
                rows,
                count: rest.len(),
            });
        }

        let u_div = (columns - 1).max(1) as f32;
        let v_div = (rows - 1).max(1) as f32;
        let vertices = rest
            .iter()
            .enumerate()
            .map(|(i, &[x, y])| Vertex {
                position: [x, y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [(i % columns) as f32 / u_div, 1.0 - (i / columns) as f32 / v_div],
            })
            .collect();

        // Two triangles per cell (counter-clockwise seen from +Z)
        let mut indices = Vec::with_capacity((columns - 1) * (rows - 1) * 6);
        for iy in 0..rows.saturating_sub(1) {
            for ix in 0..columns - 1 {
                let a = (iy * columns + ix) as u32;
                let b = ((iy + 1) * columns + ix) as u32;
                let c = b + 1;
                let d = a + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Ok(Self {
            vertices,
            indices,
            columns,
            rows,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Rest position of a vertex (its fixed XY coordinates)
    pub fn rest_position(&self, index: usize) -> DVec2 {
        let [x, y, _] = self.vertices[index].position;
        DVec2::new(x as f64, y as f64)
    }

    /// Write one height per vertex. Lengths must match.
    pub fn write_heights(&mut self, heights: &[f32]) {
        debug_assert_eq!(heights.len(), self.vertices.len());
        for (vertex, &z) in self.vertices.iter_mut().zip(heights) {
            vertex.position[2] = z;
        }
    }

    /// Recompute smooth vertex normals from the current positions.
    ///
    /// Face normals are accumulated unnormalised, so larger triangles weigh
    /// more, then each vertex sum is normalised.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let v0 = Vec3::from_array(self.vertices[i0].position);
            let v1 = Vec3::from_array(self.vertices[i1].position);
            let v2 = Vec3::from_array(self.vertices[i2].position);

            let face = (v1 - v0).cross(v2 - v0);
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        }

        for (vertex, n) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = n.try_normalize().unwrap_or(Vec3::Z).to_array();
        }
    }

    /// Current height range (min, max)
    pub fn height_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|v| v.position[2])
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), z| {
                (lo.min(z), hi.max(z))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_creation() {
        let params = PlaneParams::default();
        let mesh = ClothMesh::plane(&params).unwrap();

        // Check vertex count: (segments + 1) per side
        assert_eq!(mesh.vertex_count(), params.vertex_count());
        assert_eq!(mesh.columns(), 41);
        assert_eq!(mesh.rows(), 51);

        // Check triangle count: segments^2 * 2 triangles * 3 indices
        assert_eq!(
            mesh.indices.len(),
            params.width_segments * params.height_segments * 6
        );
    }

    #[test]
    fn test_plane_corners() {
        let params = PlaneParams {
            width: 4.0,
            height: 2.0,
            width_segments: 2,
            height_segments: 1,
        };
        let mesh = ClothMesh::plane(&params).unwrap();
        assert_eq!(mesh.rest_position(0), DVec2::new(-2.0, 1.0));
        assert_eq!(mesh.rest_position(2), DVec2::new(2.0, 1.0));
        assert_eq!(mesh.rest_position(5), DVec2::new(2.0, -1.0));
        assert_eq!(mesh.vertices[0].uv, [0.0, 1.0]);
        assert_eq!(mesh.vertices[5].uv, [1.0, 0.0]);
    }

    #[test]
    fn test_mismatched_grid_rejected() {
        let rest = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        assert_eq!(
            ClothMesh::from_rest_positions(2, 2, &rest).unwrap_err(),
            ConfigError::GridMismatch {
                columns: 2,
                rows: 2,
                count: 3
            }
        );
    }

    #[test]
    fn test_overflowing_grid_rejected() {
        let rest = [[0.0, 0.0], [1.0, 0.0]];
        assert!(matches!(
            ClothMesh::from_rest_positions(usize::MAX, 2, &rest),
            Err(ConfigError::GridMismatch { .. })
        ));
    }

    #[test]
    fn test_single_vertex_mesh() {
        let mesh = ClothMesh::from_rest_positions(1, 1, &[[0.5, 0.5]]).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn test_flat_plane_normals_face_up() {
        let mut mesh = ClothMesh::plane(&PlaneParams::default()).unwrap();
        mesh.recompute_normals();
        for vertex in &mesh.vertices {
            let n = Vec3::from_array(vertex.normal);
            assert!((n - Vec3::Z).length() < 1e-5, "normal {n:?}");
        }
    }

    #[test]
    fn test_tilted_plane_normals() {
        // z = x  →  normal ∝ (-1, 0, 1)
        let mut mesh = ClothMesh::plane(&PlaneParams {
            width: 2.0,
            height: 2.0,
            width_segments: 4,
            height_segments: 4,
        })
        .unwrap();
        let heights: Vec<f32> = mesh.vertices.iter().map(|v| v.position[0]).collect();
        mesh.write_heights(&heights);
        mesh.recompute_normals();

        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        for vertex in &mesh.vertices {
            assert!((Vec3::from_array(vertex.normal) - expected).length() < 1e-5);
        }
        assert_eq!(mesh.height_range(), (-1.0, 1.0));
    }

    #[test]
    fn test_vertex_is_pod() {
        let mesh = ClothMesh::from_rest_positions(1, 1, &[[0.0, 0.0]]).unwrap();
        let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        assert_eq!(bytes.len(), std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }
}
