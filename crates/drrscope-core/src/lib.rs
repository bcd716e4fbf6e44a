//! Core types for drrscope.
//!
//! This crate provides the data model shared by the rest of the workspace:
//! - [`Volume`]: an immutable 3D intensity grid with physical spacing
//! - [`Pose`] and the [`pose::convert`] parameterization utility
//! - NIfTI loading and a synthetic [`phantom`] volume
//! - The [`DrrscopeError`] error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod io;
pub mod phantom;
pub mod pose;
pub mod volume;

pub use error::{DrrscopeError, Result};
pub use io::open_nifti;
pub use phantom::phantom;
pub use pose::{convert, EulerConvention, Pose, RotationParam};
pub use volume::Volume;

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
