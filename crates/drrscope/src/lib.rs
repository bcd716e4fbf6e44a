//! drrscope: X-ray projection scene visualization.
//!
//! Loads a CT volume, renders a radiograph from a posed source/detector
//! rig, extracts an isosurface of the anatomy, and exports everything as
//! a single interactive HTML file.
//!
//! # Example
//!
//! ```no_run
//! use drrscope::{compose_drr_scene, ComposeOptions, Detector, Pose, Projector};
//!
//! fn main() -> drrscope::Result<()> {
//!     let volume = drrscope::phantom(64);
//!     let detector = Detector::new(400.0, 200, 200, 2.0, 2.0)?;
//!     let projector = Projector::new(volume, detector);
//!
//!     let scene = compose_drr_scene(&projector, &Pose::IDENTITY, &ComposeOptions::default())?;
//!     scene.write_html("scene.html")?;
//!     Ok(())
//! }
//! ```

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod compose;
mod export;
mod scene;

pub use compose::{
    compose_drr_scene, ComposeOptions, CAMERA_ELEMENT, DETECTOR_ELEMENT, ISOSURFACE_ELEMENT,
    PRINCIPAL_RAY_ELEMENT,
};
pub use scene::{Color, Scene, SceneElement};

// Re-export the pipeline building blocks so most users only need this crate.
pub use drrscope_core::{
    convert, open_nifti, phantom, DrrscopeError, EulerConvention, Pose, Result, RotationParam,
    Volume,
};
pub use drrscope_render::{Detector, Projection, Projector};
pub use drrscope_structures::{extract_isosurface, IsosurfaceBackend, SurfaceMesh};

// Math types, for callers constructing poses and colors.
pub use drrscope_core::{Mat4, Quat, Vec2, Vec3, Vec4};
