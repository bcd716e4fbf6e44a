//! Isosurface extraction backends.
//!
//! Two backends share one contract: world-space triangle meshes of the
//! level set `volume == threshold`. Backend names parse fail-fast so an
//! unsupported name is rejected before any heavier work starts.

use std::fmt;
use std::str::FromStr;

use drrscope_core::{DrrscopeError, Result, Volume};

use crate::surface_mesh::SurfaceMesh;

mod marching_cubes;
mod surface_nets;

/// Selectable isosurface extraction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsosurfaceBackend {
    /// Classic marching cubes: one vertex per crossing edge.
    #[default]
    MarchingCubes,
    /// Naive surface nets: one vertex per crossing cell.
    SurfaceNets,
}

impl IsosurfaceBackend {
    /// Canonical backend name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            IsosurfaceBackend::MarchingCubes => "marching_cubes",
            IsosurfaceBackend::SurfaceNets => "surface_nets",
        }
    }
}

impl fmt::Display for IsosurfaceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IsosurfaceBackend {
    type Err = DrrscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "marching_cubes" => Ok(IsosurfaceBackend::MarchingCubes),
            "surface_nets" => Ok(IsosurfaceBackend::SurfaceNets),
            _ => Err(DrrscopeError::UnknownBackend(s.to_string())),
        }
    }
}

/// Extracts the isosurface of `volume` at `threshold` with the chosen
/// backend. The mesh is in world space with per-vertex normals; an empty
/// mesh (threshold outside the data range) is returned as-is.
#[must_use]
pub fn extract_isosurface(
    volume: &Volume,
    threshold: f32,
    backend: IsosurfaceBackend,
) -> SurfaceMesh {
    let mesh = match backend {
        IsosurfaceBackend::MarchingCubes => marching_cubes::extract(volume, threshold),
        IsosurfaceBackend::SurfaceNets => surface_nets::extract(volume, threshold),
    };
    log::info!(
        "{backend}: {} vertices, {} triangles at threshold {threshold}",
        mesh.vertices.len(),
        mesh.num_triangles()
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use drrscope_core::phantom;

    #[test]
    fn backend_names_round_trip() {
        for backend in [IsosurfaceBackend::MarchingCubes, IsosurfaceBackend::SurfaceNets] {
            assert_eq!(backend.name().parse::<IsosurfaceBackend>().unwrap(), backend);
        }
    }

    #[test]
    fn unknown_backend_fails_fast() {
        let err = "flying_edges".parse::<IsosurfaceBackend>();
        assert!(matches!(err, Err(DrrscopeError::UnknownBackend(_))));
    }

    #[test]
    fn both_backends_surface_the_phantom() {
        let vol = phantom(24);
        for backend in [IsosurfaceBackend::MarchingCubes, IsosurfaceBackend::SurfaceNets] {
            let mesh = extract_isosurface(&vol, 0.5, backend);
            assert!(!mesh.is_empty(), "{backend} produced an empty mesh");
            let (min, max) = mesh.bounding_box().unwrap();
            let (vmin, vmax) = vol.bounding_box();
            assert!(min.cmpge(vmin).all() && max.cmple(vmax).all());
        }
    }

    #[test]
    fn out_of_range_threshold_is_empty_not_an_error() {
        let vol = phantom(16);
        let mesh = extract_isosurface(&vol, 100.0, IsosurfaceBackend::MarchingCubes);
        assert!(mesh.is_empty());
    }
}
