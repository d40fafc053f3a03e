//! Scene description consumed by the tracer.

use crate::geometry::Geometry;
use crate::{AmbientLight, Color, Geometries, LightSource, BLACK};

/// Everything the tracer needs to shade a ray.
///
/// Built once with a [`SceneBuilder`] and read-only afterwards.
#[derive(Debug)]
pub struct Scene {
    name: String,
    background: Color,
    ambient_light: AmbientLight,
    geometries: Geometries,
    lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Start building a scene.
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder {
            scene: Scene {
                name: name.into(),
                background: BLACK,
                ambient_light: AmbientLight::NONE,
                geometries: Geometries::new(),
                lights: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    #[inline]
    pub fn ambient_light(&self) -> &AmbientLight {
        &self.ambient_light
    }

    #[inline]
    pub fn geometries(&self) -> &Geometries {
        &self.geometries
    }

    #[inline]
    pub fn lights(&self) -> &[Box<dyn LightSource>] {
        &self.lights
    }
}

/// Staged construction of a [`Scene`].
#[derive(Debug)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn background(mut self, background: Color) -> Self {
        self.scene.background = background;
        self
    }

    pub fn ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.scene.ambient_light = ambient_light;
        self
    }

    /// Append one geometry.
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.scene.geometries.add(geometry);
        self
    }

    /// Append several geometries.
    pub fn geometries(mut self, geometries: impl IntoIterator<Item = Geometry>) -> Self {
        self.scene.geometries.extend(geometries);
        self
    }

    /// Append a light source.
    pub fn light(mut self, light: impl LightSource + 'static) -> Self {
        self.scene.lights.push(Box::new(light));
        self
    }

    pub fn build(self) -> Scene {
        log::debug!(
            "Scene '{}': {} geometries, {} lights",
            self.scene.name,
            self.scene.geometries.len(),
            self.scene.lights.len()
        );
        self.scene
    }
}
