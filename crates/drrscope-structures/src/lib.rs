//! Geometry for drrscope: surface meshes, isosurface extraction, and the
//! imaging rig proxies used in exported scenes.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod isosurface;
pub mod rig;
pub mod surface_mesh;

pub use isosurface::{extract_isosurface, IsosurfaceBackend};
pub use surface_mesh::SurfaceMesh;
