//! Volume loading from NIfTI files.

use std::path::Path;

use glam::Vec3;
use ndarray::Ix3;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

use crate::error::{DrrscopeError, Result};
use crate::volume::Volume;

/// Loads a 3D scan from a `.nii` / `.nii.gz` file.
///
/// Voxel values are converted to `f32` and spacing is taken from the
/// header's `pixdim` field (mm). The grid keeps the file's native
/// (x, y, z) axis order.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not 3-dimensional, or
/// carries a non-positive spacing.
pub fn open_nifti<P: AsRef<Path>>(path: P) -> Result<Volume> {
    let path = path.as_ref();
    let obj = ReaderOptions::new()
        .read_file(path)
        .map_err(|e| DrrscopeError::NiftiRead(format!("{}: {e}", path.display())))?;

    let spacing = {
        let pixdim = &obj.header().pixdim;
        Vec3::new(pixdim[1], pixdim[2], pixdim[3])
    };

    let data = obj
        .into_volume()
        .into_ndarray::<f32>()
        .map_err(|e| DrrscopeError::NiftiRead(format!("{}: {e}", path.display())))?
        .into_dimensionality::<Ix3>()
        .map_err(|e| DrrscopeError::NiftiRead(format!("{}: not a 3D volume ({e})", path.display())))?;

    // NIfTI volumes arrive in Fortran order; normalize to C layout so
    // downstream slab traversals stay cache-friendly.
    let data = data.as_standard_layout().to_owned();

    let (nx, ny, nz) = data.dim();
    log::info!(
        "loaded {} ({nx}x{ny}x{nz}, spacing {:.3}x{:.3}x{:.3} mm)",
        path.display(),
        spacing.x,
        spacing.y,
        spacing.z
    );

    Volume::new(data, spacing)
}
