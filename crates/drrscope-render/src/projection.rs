//! Rendered projection images.

use std::path::Path;

use drrscope_core::{DrrscopeError, Result};
use image::GrayImage;

/// A rendered radiograph: per-pixel line integrals through the volume.
///
/// Stored row-major, row 0 at the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Projection {
    pub(crate) fn new(width: usize, height: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw line integrals, row-major.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Value at pixel `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the pixel index is out of range.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.height && col < self.width);
        self.data[row * self.width + col]
    }

    /// Minimum and maximum line integral.
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

    /// Windows the projection to 8 bits for texturing or preview.
    ///
    /// The full value range maps linearly onto `0..=255`; a constant image
    /// maps to 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn normalized(&self) -> Vec<u8> {
        let (lo, hi) = self.value_range();
        let span = hi - lo;
        if !(span.is_finite() && span > 0.0) {
            return vec![0; self.data.len()];
        }
        self.data
            .iter()
            .map(|&v| (((v - lo) / span) * 255.0).round() as u8)
            .collect()
    }

    /// Converts to an 8-bit grayscale image.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_raw(self.width as u32, self.height as u32, self.normalized())
            .expect("buffer length matches dimensions")
    }

    /// Saves an 8-bit grayscale PNG preview.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_image()
            .save(path.as_ref())
            .map_err(|e| DrrscopeError::ImageEncode(e.to_string()))
    }
}
