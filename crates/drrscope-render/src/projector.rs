//! CPU radiograph projector.
//!
//! Integrates volume density along source-to-pixel rays: each ray is
//! clipped against the volume bounding box and sampled trilinearly at a
//! fixed sub-voxel step, accumulating `density * step_length`. There is
//! no scatter or attenuation model; the output is the plain line integral.

use drrscope_core::{Pose, Vec3, Volume};
use rayon::prelude::*;

use crate::detector::Detector;
use crate::projection::Projection;

/// A renderer handle binding a volume to a detector.
///
/// The volume is re-centered so its isocenter coincides with the rig's
/// rotation center at the world origin.
#[derive(Debug, Clone)]
pub struct Projector {
    volume: Volume,
    detector: Detector,
    step: f32,
}

impl Projector {
    /// Creates a projector from a volume and detector geometry.
    #[must_use]
    pub fn new(volume: Volume, detector: Detector) -> Self {
        let volume = volume.centered();
        let spacing = volume.spacing();
        // Half the smallest voxel pitch keeps the quadrature error well
        // below the 8-bit windowing used for display.
        let step = 0.5 * spacing.x.min(spacing.y).min(spacing.z);
        log::debug!(
            "projector: volume {:?}, detector {}x{} px, sdd {} mm, step {step} mm",
            volume.dims(),
            detector.height(),
            detector.width(),
            detector.sdd()
        );
        Self {
            volume,
            detector,
            step,
        }
    }

    /// The (re-centered) volume this projector integrates through.
    #[must_use]
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// The detector geometry.
    #[must_use]
    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Renders a radiograph for the given pose.
    ///
    /// Rows are rendered in parallel; the result is deterministic for a
    /// fixed volume, detector and pose.
    #[must_use]
    pub fn render(&self, pose: &Pose) -> Projection {
        let height = self.detector.height();
        let width = self.detector.width();
        let source = self.detector.source(pose);

        let mut data = vec![0.0_f32; width * height];
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, px) in out.iter_mut().enumerate() {
                    let target = self.detector.pixel_target(row, col, pose);
                    *px = self.integrate(source, target);
                }
            });

        Projection::new(width, height, data)
    }

    /// Line integral of the volume along the segment from `source` toward
    /// `target`, restricted to the volume bounding box.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn integrate(&self, source: Vec3, target: Vec3) -> f32 {
        let dir = (target - source).normalize_or_zero();
        if dir == Vec3::ZERO {
            return 0.0;
        }

        let Some((t_near, t_far)) = clip_to_aabb(source, dir, self.volume.bounding_box()) else {
            return 0.0;
        };

        let span = t_far - t_near;
        let steps = (span / self.step).ceil().max(1.0) as usize;
        let dt = span / steps as f32;

        // Midpoint rule over the clipped segment.
        let mut sum = 0.0;
        for s in 0..steps {
            let t = t_near + (s as f32 + 0.5) * dt;
            sum += self.volume.sample(source + dir * t);
        }
        sum * dt
    }
}

/// Clips the ray `origin + t * dir` (t >= 0) against an AABB, returning
/// the entry and exit parameters, or `None` if the ray misses the box.
fn clip_to_aabb(origin: Vec3, dir: Vec3, (bb_min, bb_max): (Vec3, Vec3)) -> Option<(f32, f32)> {
    let mut t_near = 0.0_f32;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        let (lo, hi) = (bb_min[axis], bb_max[axis]);
        if d.abs() < f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (t1, t2) = ((lo - o) / d, (hi - o) / d);
        let (t1, t2) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        t_near = t_near.max(t1);
        t_far = t_far.min(t2);
        if t_near > t_far {
            return None;
        }
    }

    Some((t_near, t_far))
}
