//! Demo: render a radiograph of the built-in phantom and export the full
//! rig scene (isosurface, camera frustum, textured detector, principal
//! ray) to an interactive HTML file.

use std::f32::consts::PI;

use drrscope::{
    compose_drr_scene, convert, phantom, ComposeOptions, Detector, EulerConvention, Projector,
    RotationParam, Vec3,
};

fn main() -> drrscope::Result<()> {
    env_logger::init();

    let volume = phantom(64);
    let detector = Detector::new(400.0, 200, 200, 1.2, 1.2)?;
    let projector = Projector::new(volume, detector);

    // A slightly oblique view, the way a C-arm would be parked.
    let pose = convert(
        &[PI / 2.0, 0.0, PI / 8.0],
        Vec3::ZERO,
        RotationParam::EulerAngles,
        Some(EulerConvention::Zxy),
    )?;

    let options = ComposeOptions {
        threshold: 0.5,
        verbose: true,
        ..ComposeOptions::default()
    };
    let scene = compose_drr_scene(&projector, &pose, &options)?;
    scene.write_html("drr_scene.html")?;

    println!("wrote drr_scene.html ({} elements)", scene.len());
    Ok(())
}
