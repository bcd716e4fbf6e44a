//! Demo: load a CT scan from a NIfTI file and export its radiograph
//! scene. Usage:
//!
//! ```text
//! cargo run --example nifti_scene_demo -- path/to/scan.nii.gz [threshold]
//! ```

use drrscope::{
    compose_drr_scene, open_nifti, ComposeOptions, Detector, Pose, Projector, Quat, Vec3,
};

fn main() -> drrscope::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: nifti_scene_demo <scan.nii[.gz]> [threshold]");
        std::process::exit(2);
    };
    // Bone in Hounsfield units unless overridden.
    let threshold = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(300.0_f32);

    let volume = open_nifti(&path)?;
    let extent = volume.extent();
    let sdd = 2.0 * extent.length();
    let detector = Detector::new(sdd, 256, 256, extent.y / 192.0, extent.y / 192.0)?;
    let projector = Projector::new(volume, detector);

    let pose = Pose::new(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2), Vec3::ZERO);
    let options = ComposeOptions {
        threshold,
        backend: "surface_nets".to_string(),
        verbose: true,
        ..ComposeOptions::default()
    };

    let scene = compose_drr_scene(&projector, &pose, &options)?;
    scene.write_html("nifti_scene.html")?;
    println!("wrote nifti_scene.html");
    Ok(())
}
