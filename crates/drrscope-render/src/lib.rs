//! Detector geometry and the CPU radiograph projector.
//!
//! [`Detector`] describes the source/detector rig, [`Projector`] binds a
//! volume to it and renders [`Projection`] images for a given pose.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod detector;
pub mod projection;
pub mod projector;

pub use detector::Detector;
pub use projection::Projection;
pub use projector::Projector;
