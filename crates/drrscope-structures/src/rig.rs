//! Imaging rig geometry for visualization.
//!
//! Builds the scene proxies for a posed source/detector pair: the camera
//! frustum (source apex to detector corners), the detector plane quad,
//! and the principal ray.

use drrscope_core::{Pose, Vec3};
use drrscope_render::Detector;

use crate::surface_mesh::SurfaceMesh;

/// Pyramid from the X-ray source to the four detector corners.
///
/// Triangles: the four side faces plus the detector-plane base.
#[must_use]
pub fn camera_frustum(detector: &Detector, pose: &Pose) -> SurfaceMesh {
    let apex = detector.source(pose);
    let [tl, tr, br, bl] = detector.corners(pose);
    let vertices = vec![apex, tl, tr, br, bl];
    let indices = vec![
        0, 1, 2, // sides
        0, 2, 3,
        0, 3, 4,
        0, 4, 1,
        1, 3, 2, // base
        1, 4, 3,
    ];
    let mut mesh = SurfaceMesh::new(vertices, indices).expect("frustum indices are static");
    mesh.compute_vertex_normals();
    mesh
}

/// Two-triangle quad over the detector plane, wound so its normal faces
/// the source. Corner order matches [`Detector::corners`]: top-left,
/// top-right, bottom-right, bottom-left in image orientation, which is
/// also the texture coordinate order for a rendered projection.
#[must_use]
pub fn detector_plane(detector: &Detector, pose: &Pose) -> SurfaceMesh {
    let corners = detector.corners(pose).to_vec();
    let indices = vec![0, 1, 2, 0, 2, 3];
    let mut mesh = SurfaceMesh::new(corners, indices).expect("quad indices are static");
    mesh.compute_vertex_normals();
    mesh
}

/// The source-to-detector-center segment.
#[must_use]
pub fn principal_ray(detector: &Detector, pose: &Pose) -> [Vec3; 2] {
    detector.principal_ray(pose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drrscope_core::{EulerConvention, Quat};

    fn detector() -> Detector {
        Detector::new(1000.0, 100, 100, 2.0, 2.0).unwrap()
    }

    #[test]
    fn frustum_apex_is_the_source() {
        let det = detector();
        let pose = Pose::from_euler(
            Vec3::new(0.2, 0.5, -0.3),
            EulerConvention::Zxy,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let frustum = camera_frustum(&det, &pose);
        assert_eq!(frustum.vertices[0], det.source(&pose));
        assert_eq!(frustum.num_triangles(), 6);
    }

    #[test]
    fn detector_plane_normal_faces_the_source() {
        let det = detector();
        let pose = Pose::IDENTITY;
        let plane = detector_plane(&det, &pose);
        // Source is at -z; the quad normal must have negative z.
        for n in &plane.normals {
            assert!(n.z < 0.0, "normal {n:?} does not face the source");
        }
    }

    #[test]
    fn principal_ray_spans_the_sdd() {
        let det = detector();
        let pose = Pose::new(Quat::from_rotation_z(1.0), Vec3::new(0.0, 5.0, 0.0));
        let [s, c] = principal_ray(&det, &pose);
        assert!(((c - s).length() - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn translation_moves_the_whole_rig() {
        let det = detector();
        let shift = Vec3::new(25.0, -10.0, 4.0);
        let a = camera_frustum(&det, &Pose::IDENTITY);
        let b = camera_frustum(&det, &Pose::new(Quat::IDENTITY, shift));
        for (va, vb) in a.vertices.iter().zip(b.vertices.iter()) {
            assert!((*va + shift).abs_diff_eq(*vb, 1e-5));
        }
    }
}
