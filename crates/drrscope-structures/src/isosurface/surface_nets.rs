//! Naive surface nets isosurface extraction.
//!
//! Places one vertex per sign-crossing cell at the mean of the cell's
//! edge crossings, then connects the four cells around every crossing
//! grid edge with a quad. Produces smoother, lower-triangle-count
//! surfaces than marching cubes at the cost of sharp features.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use drrscope_core::{Vec3, Volume};

use crate::surface_mesh::SurfaceMesh;

/// Corner offsets (x, y, z) in the marching-cubes numbering: x varies
/// fastest, so corner `c` sits at `(c & 1, (c >> 1) & 1, (c >> 2) & 1)`.
const CORNERS: [(usize, usize, usize); 8] = [
    (0, 0, 0),
    (1, 0, 0),
    (0, 1, 0),
    (1, 1, 0),
    (0, 0, 1),
    (1, 0, 1),
    (0, 1, 1),
    (1, 1, 1),
];

/// The 12 cell edges as corner index pairs.
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Extracts the isosurface of `volume` at `threshold`.
///
/// Vertices are in world space with area-weighted per-vertex normals.
#[must_use]
pub fn extract(volume: &Volume, threshold: f32) -> SurfaceMesh {
    let (nx, ny, nz) = volume.dims();
    let (cx, cy, cz) = (nx - 1, ny - 1, nz - 1);
    let cell_index = |i: usize, j: usize, k: usize| (i * cy + j) * cz + k;

    let mut cell_vertex = vec![u32::MAX; cx * cy * cz];
    let mut vertices: Vec<Vec3> = Vec::new();

    // Pass 1: one vertex per cell whose corners straddle the threshold,
    // at the mean of its edge crossings.
    let mut ds = [0.0_f32; 8];
    for i in 0..cx {
        for j in 0..cy {
            for k in 0..cz {
                for (c, &(dx, dy, dz)) in CORNERS.iter().enumerate() {
                    ds[c] = volume.value(i + dx, j + dy, k + dz) - threshold;
                }
                let inside = ds.iter().filter(|d| **d < 0.0).count();
                if inside == 0 || inside == 8 {
                    continue;
                }

                let mut sum = Vec3::ZERO;
                let mut count = 0_u32;
                for &(a, b) in &EDGES {
                    if (ds[a] < 0.0) == (ds[b] < 0.0) {
                        continue;
                    }
                    let t = ds[a] / (ds[a] - ds[b]);
                    let pa = CORNERS[a];
                    let pb = CORNERS[b];
                    let pa = Vec3::new(pa.0 as f32, pa.1 as f32, pa.2 as f32);
                    let pb = Vec3::new(pb.0 as f32, pb.1 as f32, pb.2 as f32);
                    sum += pa + (pb - pa) * t;
                    count += 1;
                }

                let g = Vec3::new(i as f32, j as f32, k as f32) + sum / count as f32;
                cell_vertex[cell_index(i, j, k)] = vertices.len() as u32;
                vertices.push(volume.origin() + g * volume.spacing());
            }
        }
    }

    // Pass 2: a quad around every crossing grid edge interior enough that
    // all four neighboring cells exist. The winding follows the sign of
    // the low-end node so the surface is consistently oriented.
    let mut indices: Vec<u32> = Vec::new();
    let mut emit_quad = |cells: [usize; 4], flip: bool| {
        let q = cells.map(|c| cell_vertex[c]);
        if q.iter().any(|&v| v == u32::MAX) {
            return;
        }
        let (a, b, c, d) = if flip {
            (q[0], q[3], q[2], q[1])
        } else {
            (q[0], q[1], q[2], q[3])
        };
        indices.extend_from_slice(&[a, b, c, a, c, d]);
    };

    // Edges along x
    for i in 0..cx {
        for j in 1..cy {
            for k in 1..cz {
                let a = volume.value(i, j, k) - threshold;
                let b = volume.value(i + 1, j, k) - threshold;
                if (a < 0.0) == (b < 0.0) {
                    continue;
                }
                emit_quad(
                    [
                        cell_index(i, j - 1, k - 1),
                        cell_index(i, j, k - 1),
                        cell_index(i, j, k),
                        cell_index(i, j - 1, k),
                    ],
                    a < 0.0,
                );
            }
        }
    }
    // Edges along y
    for j in 0..cy {
        for i in 1..cx {
            for k in 1..cz {
                let a = volume.value(i, j, k) - threshold;
                let b = volume.value(i, j + 1, k) - threshold;
                if (a < 0.0) == (b < 0.0) {
                    continue;
                }
                emit_quad(
                    [
                        cell_index(i - 1, j, k - 1),
                        cell_index(i - 1, j, k),
                        cell_index(i, j, k),
                        cell_index(i, j, k - 1),
                    ],
                    a < 0.0,
                );
            }
        }
    }
    // Edges along z
    for k in 0..cz {
        for i in 1..cx {
            for j in 1..cy {
                let a = volume.value(i, j, k) - threshold;
                let b = volume.value(i, j, k + 1) - threshold;
                if (a < 0.0) == (b < 0.0) {
                    continue;
                }
                emit_quad(
                    [
                        cell_index(i - 1, j - 1, k),
                        cell_index(i, j - 1, k),
                        cell_index(i, j, k),
                        cell_index(i - 1, j, k),
                    ],
                    a < 0.0,
                );
            }
        }
    }

    let mut mesh = SurfaceMesh {
        vertices,
        indices,
        normals: Vec::new(),
    };
    mesh.compute_vertex_normals();
    mesh
}
