//! Triangle surface meshes.

use drrscope_core::{DrrscopeError, Mat4, Result, Vec3};

/// An indexed triangle mesh with optional per-vertex normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions in world space.
    pub vertices: Vec<Vec3>,
    /// Triangle indices; every 3 consecutive indices form a triangle.
    pub indices: Vec<u32>,
    /// Per-vertex normals; empty until computed or supplied.
    pub normals: Vec<Vec3>,
}

impl SurfaceMesh {
    /// Creates a mesh, validating the index buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the index count is not a multiple of 3 or any
    /// index is out of range.
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(DrrscopeError::SizeMismatch {
                expected: indices.len().div_ceil(3) * 3,
                actual: indices.len(),
            });
        }
        if let Some(&bad) = indices.iter().find(|&&i| (i as usize) >= vertices.len()) {
            return Err(DrrscopeError::SizeMismatch {
                expected: vertices.len(),
                actual: bad as usize,
            });
        }
        Ok(Self {
            vertices,
            indices,
            normals: Vec::new(),
        })
    }

    /// Number of triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounding box, or `None` for a vertexless mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for &v in &self.vertices[1..] {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// Computes area-weighted per-vertex normals from the triangles.
    pub fn compute_vertex_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.vertices.len(), Vec3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let e1 = self.vertices[b] - self.vertices[a];
            let e2 = self.vertices[c] - self.vertices[a];
            // Cross product length is twice the triangle area, so this is
            // already area-weighted.
            let n = e1.cross(e2);
            self.normals[a] += n;
            self.normals[b] += n;
            self.normals[c] += n;
        }

        for n in &mut self.normals {
            *n = n.normalize_or_zero();
        }
    }

    /// Returns a copy with vertices (and normals) transformed by `m`.
    #[must_use]
    pub fn transformed(&self, m: Mat4) -> Self {
        let normal_m = m.inverse().transpose();
        Self {
            vertices: self.vertices.iter().map(|&v| m.transform_point3(v)).collect(),
            indices: self.indices.clone(),
            normals: self
                .normals
                .iter()
                .map(|&n| normal_m.transform_vector3(n).normalize_or_zero())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> SurfaceMesh {
        SurfaceMesh::new(
            vec![
                Vec3::ZERO,
                Vec3::X,
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::Y,
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_indices() {
        assert!(SurfaceMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1]).is_err());
    }

    #[test]
    fn rejects_out_of_range_indices() {
        assert!(SurfaceMesh::new(vec![Vec3::ZERO, Vec3::X], vec![0, 1, 2]).is_err());
    }

    #[test]
    fn quad_normals_point_along_z() {
        let mut mesh = unit_quad();
        mesh.compute_vertex_normals();
        for n in &mesh.normals {
            assert!(n.abs_diff_eq(Vec3::Z, 1e-6), "normal {n:?}");
        }
    }

    #[test]
    fn bounding_box_covers_vertices() {
        let mesh = unit_quad();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn transformed_moves_bounding_box() {
        let mesh = unit_quad();
        let moved = mesh.transformed(Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
        let (min, _) = moved.bounding_box().unwrap();
        assert_eq!(min, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(moved.num_triangles(), 2);
    }
}
