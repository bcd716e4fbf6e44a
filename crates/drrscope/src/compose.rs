//! End-to-end scene composition.
//!
//! Wires the pipeline together for the common case: one volume, one
//! detector, one pose. The sequence is strictly ordered - backend parsing
//! fails before any mesh extraction or rendering starts, and a failure at
//! any step yields `Err` before a scene (and therefore a file) exists.

use drrscope_core::{DrrscopeError, Pose, Result};
use drrscope_render::Projector;
use drrscope_structures::{extract_isosurface, rig, IsosurfaceBackend};

use crate::scene::{Color, Scene};

/// Options for [`compose_drr_scene`].
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Intensity threshold for the isosurface.
    pub threshold: f32,
    /// Isosurface backend name (`"marching_cubes"` or `"surface_nets"`).
    pub backend: String,
    /// Isosurface mesh color.
    pub mesh_color: Color,
    /// Log per-step progress at info level.
    pub verbose: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            backend: IsosurfaceBackend::MarchingCubes.name().to_string(),
            // Bone-like tint for the anatomy mesh.
            mesh_color: [0.89, 0.85, 0.76, 1.0],
            verbose: false,
        }
    }
}

/// Element names used by [`compose_drr_scene`].
pub const ISOSURFACE_ELEMENT: &str = "isosurface";
pub const CAMERA_ELEMENT: &str = "camera";
pub const DETECTOR_ELEMENT: &str = "detector";
pub const PRINCIPAL_RAY_ELEMENT: &str = "principal-ray";

/// Composes the four-element radiograph scene: the isosurface of the
/// projector's volume, the camera frustum, the detector plane textured
/// with a freshly rendered projection, and the principal ray.
///
/// The isosurface depends only on the volume; the pose positions the rig
/// elements exclusively.
///
/// # Errors
///
/// Returns an error if the backend name is unknown (before anything is
/// extracted or rendered) or if the isosurface is empty at the chosen
/// threshold.
pub fn compose_drr_scene(
    projector: &Projector,
    pose: &Pose,
    options: &ComposeOptions,
) -> Result<Scene> {
    let backend: IsosurfaceBackend = options.backend.parse()?;

    if options.verbose {
        log::info!(
            "composing scene: backend {backend}, threshold {}",
            options.threshold
        );
    }

    let surface = extract_isosurface(projector.volume(), options.threshold, backend);
    if surface.is_empty() {
        return Err(DrrscopeError::EmptyIsosurface {
            threshold: options.threshold,
        });
    }

    let detector = projector.detector();
    let projection = projector.render(pose);
    if options.verbose {
        let (lo, hi) = projection.value_range();
        log::info!(
            "rendered {}x{} projection, line integrals in [{lo:.3}, {hi:.3}]",
            projection.height(),
            projection.width()
        );
    }

    let mut scene = Scene::new();
    scene.add_mesh(ISOSURFACE_ELEMENT, surface, options.mesh_color)?;
    scene.add_mesh(
        CAMERA_ELEMENT,
        rig::camera_frustum(detector, pose),
        [0.25, 0.45, 0.95, 0.25],
    )?;
    scene.add_textured_quad(
        DETECTOR_ELEMENT,
        detector.corners(pose),
        detector.width(),
        detector.height(),
        projection.normalized(),
    )?;
    let [source, center] = rig::principal_ray(detector, pose);
    scene.add_lines(
        PRINCIPAL_RAY_ELEMENT,
        vec![source, center],
        [0.95, 0.35, 0.25, 1.0],
        2.0,
    )?;

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneElement;
    use drrscope_core::{phantom, Vec3};
    use drrscope_render::Detector;

    fn projector() -> Projector {
        let det = Detector::new(300.0, 16, 16, 4.0, 4.0).unwrap();
        Projector::new(phantom(20), det)
    }

    #[test]
    fn scene_has_four_canonical_elements() {
        let scene =
            compose_drr_scene(&projector(), &Pose::IDENTITY, &ComposeOptions::default()).unwrap();
        assert_eq!(scene.len(), 4);
        for name in [
            ISOSURFACE_ELEMENT,
            CAMERA_ELEMENT,
            DETECTOR_ELEMENT,
            PRINCIPAL_RAY_ELEMENT,
        ] {
            assert!(scene.contains(name), "missing element '{name}'");
        }
    }

    #[test]
    fn unknown_backend_fails_before_anything_else() {
        let options = ComposeOptions {
            backend: "flying_edges".to_string(),
            ..ComposeOptions::default()
        };
        let err = compose_drr_scene(&projector(), &Pose::IDENTITY, &options);
        assert!(matches!(err, Err(DrrscopeError::UnknownBackend(_))));
    }

    #[test]
    fn out_of_range_threshold_is_an_error() {
        let options = ComposeOptions {
            threshold: 1e6,
            ..ComposeOptions::default()
        };
        let err = compose_drr_scene(&projector(), &Pose::IDENTITY, &options);
        assert!(matches!(err, Err(DrrscopeError::EmptyIsosurface { .. })));
    }

    #[test]
    fn surface_nets_backend_composes_too() {
        let options = ComposeOptions {
            backend: "surface_nets".to_string(),
            ..ComposeOptions::default()
        };
        let scene = compose_drr_scene(&projector(), &Pose::IDENTITY, &options).unwrap();
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn detector_element_carries_the_projection_texture() {
        let scene =
            compose_drr_scene(&projector(), &Pose::IDENTITY, &ComposeOptions::default()).unwrap();
        let Some(SceneElement::TexturedQuad { width, height, pixels, .. }) =
            scene.get(DETECTOR_ELEMENT)
        else {
            panic!("detector element is not a textured quad");
        };
        assert_eq!((*width, *height), (16, 16));
        assert_eq!(pixels.len(), 256);
        // The phantom projects to a non-constant image.
        assert!(pixels.iter().any(|&p| p != pixels[0]));
    }

    #[test]
    fn translation_moves_rig_but_not_isosurface() {
        let proj = projector();
        let options = ComposeOptions::default();
        let a = compose_drr_scene(&proj, &Pose::IDENTITY, &options).unwrap();
        let shifted = Pose::new(drrscope_core::Quat::IDENTITY, Vec3::new(40.0, 0.0, 0.0));
        let b = compose_drr_scene(&proj, &shifted, &options).unwrap();

        let (Some(SceneElement::Mesh { mesh: iso_a, .. }), Some(SceneElement::Mesh { mesh: iso_b, .. })) =
            (a.get(ISOSURFACE_ELEMENT), b.get(ISOSURFACE_ELEMENT))
        else {
            panic!("isosurface elements missing");
        };
        assert_eq!(iso_a, iso_b);

        let (
            Some(SceneElement::TexturedQuad { corners: det_a, .. }),
            Some(SceneElement::TexturedQuad { corners: det_b, .. }),
        ) = (a.get(DETECTOR_ELEMENT), b.get(DETECTOR_ELEMENT))
        else {
            panic!("detector elements missing");
        };
        assert_ne!(det_a, det_b);
    }
}
