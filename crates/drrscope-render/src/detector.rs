//! Flat-panel detector geometry.
//!
//! The canonical rig lives in "rig space" with the isocenter at the
//! origin: the X-ray source sits at `(0, 0, -sdd/2)` and the detector
//! plane is centered at `(0, 0, +sdd/2)` with its normal along +z.
//! Pixel columns run along +x and pixel rows along -y, so row 0 / col 0
//! is the top-left pixel when looking from the source. A [`Pose`] maps
//! rig space into world space.

use drrscope_core::{DrrscopeError, Pose, Result, Vec3};

/// Geometry of the source/detector pair.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    sdd: f32,
    height: usize,
    width: usize,
    delx: f32,
    dely: f32,
}

impl Detector {
    /// Creates a detector.
    ///
    /// # Arguments
    /// * `sdd` - Source-to-detector distance in mm.
    /// * `height`, `width` - Image size in pixels.
    /// * `delx`, `dely` - Pixel spacing in mm (column and row pitch).
    ///
    /// # Errors
    ///
    /// Returns an error if `sdd` or a pixel spacing is not strictly
    /// positive and finite, or if either image dimension is zero.
    pub fn new(sdd: f32, height: usize, width: usize, delx: f32, dely: f32) -> Result<Self> {
        if !(sdd.is_finite() && sdd > 0.0) {
            return Err(DrrscopeError::InvalidDetector(format!(
                "source-to-detector distance must be positive, got {sdd}"
            )));
        }
        if height == 0 || width == 0 {
            return Err(DrrscopeError::InvalidDetector(format!(
                "image dimensions must be non-zero, got {height}x{width}"
            )));
        }
        if !(delx.is_finite() && delx > 0.0 && dely.is_finite() && dely > 0.0) {
            return Err(DrrscopeError::InvalidDetector(format!(
                "pixel spacing must be positive, got {delx}x{dely}"
            )));
        }
        Ok(Self {
            sdd,
            height,
            width,
            delx,
            dely,
        })
    }

    /// Source-to-detector distance in mm.
    #[must_use]
    pub fn sdd(&self) -> f32 {
        self.sdd
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Physical detector size in mm as `(width, height)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn physical_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.delx,
            self.height as f32 * self.dely,
        )
    }

    /// World-space source position under the given pose.
    #[must_use]
    pub fn source(&self, pose: &Pose) -> Vec3 {
        pose.apply_point(Vec3::new(0.0, 0.0, -self.sdd * 0.5))
    }

    /// World-space detector center under the given pose.
    #[must_use]
    pub fn center(&self, pose: &Pose) -> Vec3 {
        pose.apply_point(Vec3::new(0.0, 0.0, self.sdd * 0.5))
    }

    /// World-space detector plane corners under the given pose, ordered
    /// top-left, top-right, bottom-right, bottom-left (as seen from the
    /// source, matching image row/column order).
    #[must_use]
    pub fn corners(&self, pose: &Pose) -> [Vec3; 4] {
        let (w, h) = self.physical_size();
        let (hx, hy) = (w * 0.5, h * 0.5);
        let z = self.sdd * 0.5;
        [
            pose.apply_point(Vec3::new(-hx, hy, z)),
            pose.apply_point(Vec3::new(hx, hy, z)),
            pose.apply_point(Vec3::new(hx, -hy, z)),
            pose.apply_point(Vec3::new(-hx, -hy, z)),
        ]
    }

    /// World-space center of pixel `(row, col)` under the given pose.
    ///
    /// # Panics
    ///
    /// Panics if the pixel index is out of range.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pixel_target(&self, row: usize, col: usize, pose: &Pose) -> Vec3 {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of range for {}x{} detector",
            self.height,
            self.width
        );
        let x = (col as f32 + 0.5 - self.width as f32 * 0.5) * self.delx;
        let y = (self.height as f32 * 0.5 - row as f32 - 0.5) * self.dely;
        pose.apply_point(Vec3::new(x, y, self.sdd * 0.5))
    }

    /// The principal ray (source to detector center) under the given pose.
    #[must_use]
    pub fn principal_ray(&self, pose: &Pose) -> [Vec3; 2] {
        [self.source(pose), self.center(pose)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drrscope_core::{EulerConvention, Quat};

    #[test]
    fn rejects_bad_parameters() {
        assert!(Detector::new(0.0, 100, 100, 1.0, 1.0).is_err());
        assert!(Detector::new(1000.0, 0, 100, 1.0, 1.0).is_err());
        assert!(Detector::new(1000.0, 100, 100, -1.0, 1.0).is_err());
        assert!(Detector::new(f32::NAN, 100, 100, 1.0, 1.0).is_err());
    }

    #[test]
    fn identity_pose_geometry() {
        let det = Detector::new(1000.0, 200, 100, 2.0, 2.0).unwrap();
        let pose = Pose::IDENTITY;
        assert_eq!(det.source(&pose), Vec3::new(0.0, 0.0, -500.0));
        assert_eq!(det.center(&pose), Vec3::new(0.0, 0.0, 500.0));

        // Pixel centers of the corner pixels sit half a pitch inside the
        // physical corners.
        let tl = det.pixel_target(0, 0, &pose);
        assert_eq!(tl, Vec3::new(-99.0, 199.0, 500.0));
        let br = det.pixel_target(199, 99, &pose);
        assert_eq!(br, Vec3::new(99.0, -199.0, 500.0));
    }

    #[test]
    fn corners_follow_translation() {
        let det = Detector::new(400.0, 10, 10, 1.0, 1.0).unwrap();
        let shift = Vec3::new(10.0, -5.0, 3.0);
        let base = det.corners(&Pose::IDENTITY);
        let moved = det.corners(&Pose::new(Quat::IDENTITY, shift));
        for (b, m) in base.iter().zip(moved.iter()) {
            assert!((*b + shift).abs_diff_eq(*m, 1e-5));
        }
    }

    #[test]
    fn principal_ray_passes_through_isocenter_when_unrotated() {
        let det = Detector::new(800.0, 64, 64, 1.0, 1.0).unwrap();
        let pose = Pose::from_euler(
            Vec3::new(0.4, 0.0, 1.2),
            EulerConvention::Zxy,
            Vec3::ZERO,
        );
        let [s, c] = det.principal_ray(&pose);
        // With no translation the segment midpoint is the isocenter.
        assert!(((s + c) * 0.5).abs_diff_eq(Vec3::ZERO, 1e-4));
        assert!(((c - s).length() - 800.0).abs() < 1e-3);
    }
}
