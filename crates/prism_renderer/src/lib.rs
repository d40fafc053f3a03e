//! Prism Renderer - recursive CPU ray tracing.
//!
//! A Whitted-style ray tracer: Phong local shading with transparency-aware
//! shadow rays, plus recursive reflection and refraction.
//!
//! The pipeline, leaves first:
//!
//! - **Geometry**: planes, spheres, triangles/polygons, tubes, cylinders
//! - **Scene**: a linear-scan geometry container, lights, background
//! - **Tracer**: recursive color resolution per ray
//! - **Camera**: per-pixel rays with grid or adaptive supersampling
//! - **Renderer**: a worker pool pulling pixels from a shared scheduler
//!
//! # Example
//!
//! ```ignore
//! let scene = Scene::builder("demo").geometry(sphere).light(light).build();
//! let tracer = BasicRayTracer::new(&scene);
//! let image = ImageBuffer::new(500, 500);
//! Renderer::builder().camera(camera).tracer(&tracer).sink(&image).build()?.render()?;
//! ```

mod camera;
mod color;
mod config;
mod error;
pub mod geometry;
mod geometries;
mod light;
mod material;
mod renderer;
mod sampling;
mod scene;
mod scheduler;
mod sink;
mod tracer;

pub use camera::{Camera, CameraBuilder};
pub use color::{lower_than, Color, Factor, BLACK};
pub use config::SamplingConfig;
pub use error::{RenderError, RenderResult};
pub use geometries::Geometries;
pub use geometry::{
    Cylinder, GeoPoint, Geometry, Intersectable, Plane, Polygon, Shape, Sphere, Triangle, Tube,
};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use renderer::{Renderer, RendererBuilder};
pub use scene::{Scene, SceneBuilder};
pub use scheduler::{Pixel, PixelScheduler};
pub use sink::{color_to_rgba, ImageBuffer, PixelSink};
pub use tracer::{BasicRayTracer, RayTracer, MAX_CALC_COLOR_LEVEL, MIN_CALC_COLOR_K};

/// Re-export the math types from prism_math
pub use prism_math::{DVec3, GeometryError, GeometryResult, Point, Ray, Vector};
