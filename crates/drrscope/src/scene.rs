//! Scene assembly.
//!
//! A [`Scene`] collects named geometric elements in insertion order and
//! serializes them to a standalone HTML viewer. Names are unique across
//! the scene; adding under a taken name is an error.

use std::path::Path;

use drrscope_core::{DrrscopeError, Result, Vec3};
use drrscope_structures::SurfaceMesh;

use crate::export;

/// RGBA color, components in `[0, 1]`.
pub type Color = [f32; 4];

/// One renderable element of a scene.
#[derive(Debug, Clone)]
pub enum SceneElement {
    /// A shaded triangle mesh.
    Mesh { mesh: SurfaceMesh, color: Color },
    /// Line segments: consecutive point pairs, constant color.
    Lines {
        points: Vec<Vec3>,
        color: Color,
        width: f32,
    },
    /// A quad textured with a grayscale image. Corners are ordered
    /// top-left, top-right, bottom-right, bottom-left in image space.
    TexturedQuad {
        corners: [Vec3; 4],
        width: usize,
        height: usize,
        pixels: Vec<u8>,
    },
}

impl SceneElement {
    /// Iterates over the element's points for bounds computation.
    fn points(&self) -> Box<dyn Iterator<Item = Vec3> + '_> {
        match self {
            SceneElement::Mesh { mesh, .. } => Box::new(mesh.vertices.iter().copied()),
            SceneElement::Lines { points, .. } => Box::new(points.iter().copied()),
            SceneElement::TexturedQuad { corners, .. } => Box::new(corners.iter().copied()),
        }
    }
}

/// An ordered collection of named scene elements.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<(String, SceneElement)>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shaded mesh under a unique name.
    pub fn add_mesh(&mut self, name: impl Into<String>, mesh: SurfaceMesh, color: Color) -> Result<()> {
        self.insert(name.into(), SceneElement::Mesh { mesh, color })
    }

    /// Adds line segments (consecutive point pairs) under a unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count is odd or the name is taken.
    pub fn add_lines(
        &mut self,
        name: impl Into<String>,
        points: Vec<Vec3>,
        color: Color,
        width: f32,
    ) -> Result<()> {
        if points.len() % 2 != 0 {
            return Err(DrrscopeError::SizeMismatch {
                expected: points.len() + 1,
                actual: points.len(),
            });
        }
        self.insert(
            name.into(),
            SceneElement::Lines {
                points,
                color,
                width,
            },
        )
    }

    /// Adds a grayscale-textured quad under a unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels.len() != width * height` or the name
    /// is taken.
    pub fn add_textured_quad(
        &mut self,
        name: impl Into<String>,
        corners: [Vec3; 4],
        width: usize,
        height: usize,
        pixels: Vec<u8>,
    ) -> Result<()> {
        if pixels.len() != width * height {
            return Err(DrrscopeError::SizeMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        self.insert(
            name.into(),
            SceneElement::TexturedQuad {
                corners,
                width,
                height,
                pixels,
            },
        )
    }

    fn insert(&mut self, name: String, element: SceneElement) -> Result<()> {
        if self.contains(&name) {
            return Err(DrrscopeError::ElementExists(name));
        }
        log::debug!("scene: added element '{name}'");
        self.elements.push((name, element));
        Ok(())
    }

    /// Returns an element by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SceneElement> {
        self.elements
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    /// Returns true if an element with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.elements.iter().any(|(n, _)| n == name)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the scene has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over `(name, element)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SceneElement)> {
        self.elements.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Bounding box over all element points, or `None` if empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;
        for (_, element) in &self.elements {
            for p in element.points() {
                min = min.min(p);
                max = max.max(p);
                any = true;
            }
        }
        any.then_some((min, max))
    }

    /// Serializes the scene into a self-contained interactive HTML file.
    ///
    /// The document is rendered fully in memory and written with a single
    /// filesystem call, so a serialization failure leaves nothing behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene is empty, serialization fails, or
    /// the file cannot be written.
    pub fn write_html<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.is_empty() {
            return Err(DrrscopeError::EmptyScene);
        }
        let html = export::render_html(self)?;
        std::fs::write(path.as_ref(), html)?;
        log::info!(
            "scene: wrote {} element(s) to {}",
            self.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}
