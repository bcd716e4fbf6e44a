//! End-to-end pipeline behavior: determinism of export, fail-fast backend
//! selection, pose isolation, and export-after-assembly ordering.

use std::path::PathBuf;

use drrscope::{
    compose_drr_scene, phantom, ComposeOptions, Detector, DrrscopeError, Pose, Projector, Quat,
    SceneElement, Vec3, DETECTOR_ELEMENT, ISOSURFACE_ELEMENT,
};

fn test_projector() -> Projector {
    let detector = Detector::new(300.0, 24, 24, 3.0, 3.0).unwrap();
    Projector::new(phantom(24), detector)
}

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("drrscope_{name}_{}.html", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn identical_inputs_export_identical_files() {
    let projector = test_projector();
    let pose = Pose::new(Quat::from_rotation_y(0.6), Vec3::new(5.0, -3.0, 0.0));
    let options = ComposeOptions::default();

    let path_a = temp_path("determinism_a");
    let path_b = temp_path("determinism_b");
    compose_drr_scene(&projector, &pose, &options)
        .unwrap()
        .write_html(&path_a)
        .unwrap();
    compose_drr_scene(&projector, &pose, &options)
        .unwrap()
        .write_html(&path_b)
        .unwrap();

    let a = std::fs::read(&path_a).unwrap();
    let b = std::fs::read(&path_b).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a, b, "export is not deterministic");

    let _ = std::fs::remove_file(&path_a);
    let _ = std::fs::remove_file(&path_b);
}

#[test]
fn unsupported_backend_fails_before_rendering() {
    let projector = test_projector();
    let options = ComposeOptions {
        backend: "dual_contouring".to_string(),
        ..ComposeOptions::default()
    };
    let err = compose_drr_scene(&projector, &Pose::IDENTITY, &options);
    assert!(matches!(err, Err(DrrscopeError::UnknownBackend(_))));
}

#[test]
fn translation_changes_detector_but_not_isosurface() {
    let projector = test_projector();
    let options = ComposeOptions::default();

    let base = compose_drr_scene(&projector, &Pose::IDENTITY, &options).unwrap();
    let moved = compose_drr_scene(
        &projector,
        &Pose::new(Quat::IDENTITY, Vec3::new(30.0, 10.0, -5.0)),
        &options,
    )
    .unwrap();

    let iso = |scene: &drrscope::Scene| match scene.get(ISOSURFACE_ELEMENT) {
        Some(SceneElement::Mesh { mesh, .. }) => mesh.clone(),
        _ => panic!("missing isosurface"),
    };
    let det = |scene: &drrscope::Scene| match scene.get(DETECTOR_ELEMENT) {
        Some(SceneElement::TexturedQuad { corners, .. }) => *corners,
        _ => panic!("missing detector"),
    };

    assert_eq!(iso(&base), iso(&moved));
    assert_ne!(det(&base), det(&moved));
}

#[test]
fn failed_composition_never_creates_a_file() {
    let projector = test_projector();
    let path = temp_path("no_partial_output");
    let options = ComposeOptions {
        backend: "flying_edges".to_string(),
        ..ComposeOptions::default()
    };

    let result = compose_drr_scene(&projector, &Pose::IDENTITY, &options)
        .and_then(|scene| scene.write_html(&path));
    assert!(result.is_err());
    assert!(!path.exists(), "a file was created despite the failure");
}

#[test]
fn successful_export_contains_all_four_elements() {
    let projector = test_projector();
    let path = temp_path("full_scene");
    let scene = compose_drr_scene(&projector, &Pose::IDENTITY, &ComposeOptions::default()).unwrap();
    assert_eq!(scene.len(), 4);
    scene.write_html(&path).unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    for name in ["isosurface", "camera", "detector", "principal-ray"] {
        assert!(html.contains(name), "exported HTML is missing '{name}'");
    }
    let _ = std::fs::remove_file(&path);
}
