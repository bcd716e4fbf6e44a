//! Single-file HTML export.
//!
//! The scene is serialized to JSON and spliced into an embedded viewer
//! template (inline WebGL, no external assets), so the exported file is
//! fully self-contained and identical scenes export byte-identically.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use drrscope_core::{DrrscopeError, Result};
use image::GrayImage;
use serde::Serialize;

use crate::scene::{Scene, SceneElement};

const TEMPLATE: &str = include_str!("assets/viewer.html");

#[derive(Serialize)]
struct SceneDoc<'a> {
    bounds: [[f32; 3]; 2],
    elements: Vec<ElementDoc<'a>>,
}

#[derive(Serialize)]
struct ElementDoc<'a> {
    name: &'a str,
    kind: &'static str,
    positions: Vec<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    normals: Vec<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    indices: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    texture: Option<TextureDoc>,
}

#[derive(Serialize)]
struct TextureDoc {
    width: usize,
    height: usize,
    png: String,
}

/// Renders the complete HTML document for a scene.
pub(crate) fn render_html(scene: &Scene) -> Result<String> {
    let (min, max) = scene
        .bounding_box()
        .ok_or(DrrscopeError::EmptyScene)?;
    let doc = SceneDoc {
        bounds: [min.to_array(), max.to_array()],
        elements: scene
            .iter()
            .map(|(name, element)| element_doc(name, element))
            .collect::<Result<Vec<_>>>()?,
    };

    let json = serde_json::to_string(&doc)?;
    // Keep the payload safe inside a <script> block.
    let json = json.replace("</", "<\\/");

    Ok(TEMPLATE
        .replace("__TITLE__", "drrscope scene")
        .replace("__SCENE_JSON__", &json))
}

fn element_doc<'a>(name: &'a str, element: &SceneElement) -> Result<ElementDoc<'a>> {
    let doc = match element {
        SceneElement::Mesh { mesh, color } => {
            // Exported meshes always carry normals for shading.
            let normals = if mesh.normals.len() == mesh.vertices.len() {
                flatten(&mesh.normals)
            } else {
                let mut with_normals = mesh.clone();
                with_normals.compute_vertex_normals();
                flatten(&with_normals.normals)
            };
            ElementDoc {
                name,
                kind: "mesh",
                positions: flatten(&mesh.vertices),
                normals,
                indices: mesh.indices.clone(),
                color: Some(*color),
                width: None,
                texture: None,
            }
        }
        SceneElement::Lines {
            points,
            color,
            width,
        } => ElementDoc {
            name,
            kind: "lines",
            positions: flatten(points),
            normals: Vec::new(),
            indices: Vec::new(),
            color: Some(*color),
            width: Some(*width),
            texture: None,
        },
        SceneElement::TexturedQuad {
            corners,
            width,
            height,
            pixels,
        } => ElementDoc {
            name,
            kind: "textured_quad",
            positions: flatten(corners),
            normals: Vec::new(),
            indices: Vec::new(),
            color: None,
            width: None,
            texture: Some(TextureDoc {
                width: *width,
                height: *height,
                png: encode_png(*width, *height, pixels)?,
            }),
        },
    };
    Ok(doc)
}

fn flatten(points: &[drrscope_core::Vec3]) -> Vec<f32> {
    points.iter().flat_map(|p| p.to_array()).collect()
}

/// Encodes grayscale pixels as a base64 PNG payload.
#[allow(clippy::cast_possible_truncation)]
fn encode_png(width: usize, height: usize, pixels: &[u8]) -> Result<String> {
    let img = GrayImage::from_raw(width as u32, height as u32, pixels.to_vec())
        .ok_or(DrrscopeError::SizeMismatch {
            expected: width * height,
            actual: pixels.len(),
        })?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| DrrscopeError::ImageEncode(e.to_string()))?;
    Ok(BASE64.encode(buf))
}
