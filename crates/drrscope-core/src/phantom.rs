//! Synthetic test volume.

use glam::Vec3;
use ndarray::Array3;

use crate::volume::Volume;

/// Builds a deterministic synthetic density phantom.
///
/// An ellipsoidal "body" of soft tissue encloses a dense spherical shell
/// with an off-center high-density core, giving the projector and both
/// isosurface backends nontrivial structure without any external data.
/// Densities are in arbitrary units in `[0, 1]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn phantom(n: usize) -> Volume {
    let n = n.max(8);
    let spacing = Vec3::splat(1.5);
    let center = Vec3::splat((n - 1) as f32 / 2.0);
    let half = (n - 1) as f32 / 2.0;

    let body_radii = Vec3::new(0.85, 0.70, 0.80) * half;
    let shell_center = center + Vec3::new(0.0, 0.05, 0.0) * half;
    let shell_outer = 0.45 * half;
    let shell_inner = 0.38 * half;
    let core_center = center + Vec3::new(0.18, -0.10, 0.12) * half;
    let core_radius = 0.12 * half;

    let data = Array3::from_shape_fn((n, n, n), |(i, j, k)| {
        let p = Vec3::new(i as f32, j as f32, k as f32);

        let q = (p - center) / body_radii;
        if q.length_squared() > 1.0 {
            return 0.0;
        }
        let mut density = 0.15;

        let r = (p - shell_center).length();
        if r <= shell_outer && r >= shell_inner {
            density = 0.9;
        } else if r < shell_inner {
            density = 0.05;
        }

        if (p - core_center).length() <= core_radius {
            density = 1.0;
        }

        density
    });

    // Shape and spacing are valid by construction.
    Volume::new(data, spacing).expect("phantom construction is infallible")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phantom_is_deterministic() {
        let a = phantom(32);
        let b = phantom(32);
        for i in 0..32 {
            for j in 0..32 {
                for k in 0..32 {
                    assert_eq!(a.value(i, j, k), b.value(i, j, k));
                }
            }
        }
    }

    #[test]
    fn phantom_has_structure() {
        let vol = phantom(32);
        let (lo, hi) = vol.value_range();
        assert_eq!(lo, 0.0);
        assert!((hi - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn phantom_clamps_tiny_sizes() {
        let vol = phantom(2);
        assert_eq!(vol.dims(), (8, 8, 8));
    }
}
