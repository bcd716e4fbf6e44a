//! CT volume representation.
//!
//! A [`Volume`] is an immutable 3D scalar grid (densities or Hounsfield
//! units) with physical voxel spacing. Grid node `(i, j, k)` lies at
//! `origin + spacing * (i, j, k)` in world space, so index axes map
//! directly onto world x/y/z.

use glam::Vec3;
use ndarray::Array3;

use crate::error::{DrrscopeError, Result};

/// An immutable 3D intensity volume with physical voxel spacing.
#[derive(Debug, Clone)]
pub struct Volume {
    data: Array3<f32>,
    spacing: Vec3,
    origin: Vec3,
}

impl Volume {
    /// Creates a volume with the world origin at grid node `(0, 0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is less than 2 or any spacing
    /// component is not strictly positive and finite.
    pub fn new(data: Array3<f32>, spacing: Vec3) -> Result<Self> {
        Self::with_origin(data, spacing, Vec3::ZERO)
    }

    /// Creates a volume with an explicit world-space origin.
    pub fn with_origin(data: Array3<f32>, spacing: Vec3, origin: Vec3) -> Result<Self> {
        let (nx, ny, nz) = data.dim();
        if nx < 2 || ny < 2 || nz < 2 {
            return Err(DrrscopeError::InvalidVolume(format!(
                "all dimensions must be >= 2, got {nx}x{ny}x{nz}"
            )));
        }
        if !(spacing.is_finite() && spacing.cmpgt(Vec3::ZERO).all()) {
            return Err(DrrscopeError::InvalidVolume(format!(
                "spacing must be positive and finite, got {spacing:?}"
            )));
        }
        if !origin.is_finite() {
            return Err(DrrscopeError::InvalidVolume(format!(
                "origin must be finite, got {origin:?}"
            )));
        }
        Ok(Self {
            data,
            spacing,
            origin,
        })
    }

    /// Grid dimensions (number of nodes per axis).
    #[must_use]
    pub fn dims(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Voxel spacing in mm per axis.
    #[must_use]
    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    /// World-space position of grid node `(0, 0, 0)`.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Physical extent: distance from the first to the last node per axis.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn extent(&self) -> Vec3 {
        let (nx, ny, nz) = self.dims();
        self.spacing * Vec3::new((nx - 1) as f32, (ny - 1) as f32, (nz - 1) as f32)
    }

    /// World-space center (isocenter) of the grid.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.origin + self.extent() * 0.5
    }

    /// World-space axis-aligned bounding box as `(min, max)`.
    #[must_use]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        (self.origin, self.origin + self.extent())
    }

    /// Value at grid node `(i, j, k)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn value(&self, i: usize, j: usize, k: usize) -> f32 {
        self.data[(i, j, k)]
    }

    /// Minimum and maximum values over the whole grid.
    #[must_use]
    pub fn value_range(&self) -> (f32, f32) {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for &v in &self.data {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        (lo, hi)
    }

    /// Trilinearly interpolated value at a world-space point.
    ///
    /// Points outside the grid sample as `0.0`, so line integrals through
    /// the volume see empty space beyond its boundary.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample(&self, p: Vec3) -> f32 {
        let g = (p - self.origin) / self.spacing;
        let (nx, ny, nz) = self.dims();
        let max = Vec3::new((nx - 1) as f32, (ny - 1) as f32, (nz - 1) as f32);
        if !g.is_finite() || g.cmplt(Vec3::ZERO).any() || g.cmpgt(max).any() {
            return 0.0;
        }

        // Clamp the lower cell corner so points exactly on the far face
        // still fall in a valid cell.
        let i0 = (g.x.floor() as usize).min(nx - 2);
        let j0 = (g.y.floor() as usize).min(ny - 2);
        let k0 = (g.z.floor() as usize).min(nz - 2);
        let f = g - Vec3::new(i0 as f32, j0 as f32, k0 as f32);

        let c000 = self.data[(i0, j0, k0)];
        let c100 = self.data[(i0 + 1, j0, k0)];
        let c010 = self.data[(i0, j0 + 1, k0)];
        let c110 = self.data[(i0 + 1, j0 + 1, k0)];
        let c001 = self.data[(i0, j0, k0 + 1)];
        let c101 = self.data[(i0 + 1, j0, k0 + 1)];
        let c011 = self.data[(i0, j0 + 1, k0 + 1)];
        let c111 = self.data[(i0 + 1, j0 + 1, k0 + 1)];

        let c00 = c000 * (1.0 - f.x) + c100 * f.x;
        let c10 = c010 * (1.0 - f.x) + c110 * f.x;
        let c01 = c001 * (1.0 - f.x) + c101 * f.x;
        let c11 = c011 * (1.0 - f.x) + c111 * f.x;

        let c0 = c00 * (1.0 - f.y) + c10 * f.y;
        let c1 = c01 * (1.0 - f.y) + c11 * f.y;

        c0 * (1.0 - f.z) + c1 * f.z
    }

    /// Returns the same grid with the origin shifted so the isocenter is
    /// the world origin. This is the convention the imaging rig assumes.
    #[must_use]
    pub fn centered(self) -> Self {
        let origin = -self.extent() * 0.5;
        Self { origin, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_ramp() -> Volume {
        // value(i, j, k) = i, spacing 1 → sample(p).x should be p.x
        let data = Array3::from_shape_fn((4, 4, 4), |(i, _, _)| i as f32);
        Volume::new(data, Vec3::ONE).unwrap()
    }

    #[test]
    fn rejects_degenerate_shapes() {
        let data = Array3::zeros((1, 4, 4));
        assert!(Volume::new(data, Vec3::ONE).is_err());
    }

    #[test]
    fn rejects_bad_spacing() {
        let data = Array3::zeros((4, 4, 4));
        assert!(Volume::new(data.clone(), Vec3::new(1.0, 0.0, 1.0)).is_err());
        assert!(Volume::new(data, Vec3::new(1.0, -2.0, 1.0)).is_err());
    }

    #[test]
    fn extent_and_center() {
        let data = Array3::zeros((5, 3, 2));
        let vol = Volume::new(data, Vec3::new(2.0, 1.0, 4.0)).unwrap();
        assert_eq!(vol.extent(), Vec3::new(8.0, 2.0, 4.0));
        assert_eq!(vol.center(), Vec3::new(4.0, 1.0, 2.0));
    }

    #[test]
    fn sample_interpolates_linearly() {
        let vol = unit_ramp();
        assert!((vol.sample(Vec3::new(1.5, 0.5, 0.5)) - 1.5).abs() < 1e-6);
        assert!((vol.sample(Vec3::new(2.25, 2.0, 3.0)) - 2.25).abs() < 1e-6);
    }

    #[test]
    fn sample_outside_is_zero() {
        let vol = unit_ramp();
        assert_eq!(vol.sample(Vec3::new(-0.1, 0.0, 0.0)), 0.0);
        assert_eq!(vol.sample(Vec3::new(0.0, 3.1, 0.0)), 0.0);
        assert_eq!(vol.sample(Vec3::splat(100.0)), 0.0);
    }

    #[test]
    fn sample_on_far_face_is_valid() {
        let vol = unit_ramp();
        assert!((vol.sample(Vec3::new(3.0, 3.0, 3.0)) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn centered_moves_isocenter_to_origin() {
        let data = Array3::zeros((5, 5, 5));
        let vol = Volume::new(data, Vec3::splat(2.0)).unwrap().centered();
        assert_eq!(vol.center(), Vec3::ZERO);
        assert_eq!(vol.origin(), Vec3::splat(-4.0));
    }
}
