//! Error types for drrscope.

use thiserror::Error;

/// The main error type for drrscope operations.
#[derive(Error, Debug)]
pub enum DrrscopeError {
    /// A volume failed validation (bad shape, non-positive spacing, ...).
    #[error("invalid volume: {0}")]
    InvalidVolume(String),

    /// A pose or pose parameterization failed validation.
    #[error("invalid pose: {0}")]
    InvalidPose(String),

    /// An Euler axis convention name was not recognized.
    #[error("unknown Euler convention '{0}'")]
    UnknownConvention(String),

    /// A rotation parameterization name was not recognized.
    #[error("unknown rotation parameterization '{0}'")]
    UnknownParameterization(String),

    /// An isosurface backend name was not recognized.
    #[error("unknown isosurface backend '{0}' (expected 'marching_cubes' or 'surface_nets')")]
    UnknownBackend(String),

    /// Detector parameters failed validation.
    #[error("invalid detector: {0}")]
    InvalidDetector(String),

    /// Isosurface extraction produced no triangles at the given threshold.
    #[error("isosurface at threshold {threshold} is empty")]
    EmptyIsosurface { threshold: f32 },

    /// A scene element with the given name already exists.
    #[error("scene element '{0}' already exists")]
    ElementExists(String),

    /// Attempted to export a scene with no elements.
    #[error("cannot export an empty scene")]
    EmptyScene,

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Failed to read a NIfTI file.
    #[error("NIfTI read error: {0}")]
    NiftiRead(String),

    /// Failed to encode an image.
    #[error("image encode error: {0}")]
    ImageEncode(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for drrscope operations.
pub type Result<T> = std::result::Result<T, DrrscopeError>;
