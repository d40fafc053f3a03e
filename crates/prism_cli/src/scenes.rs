//! Built-in demo scenes.
//!
//! Colors use the 0-255 scale. Each scene comes with a camera framing it;
//! sampling is configured by the caller.

use clap::ValueEnum;
use prism_renderer::{
    AmbientLight, Camera, CameraBuilder, Color, Geometry, GeometryResult, Material, Point, Scene,
    Sphere, SpotLight, Triangle, Vector,
};

const BLUE: Color = Color::new(0.0, 0.0, 255.0);
const RED: Color = Color::new(255.0, 0.0, 0.0);
const WHITE: Color = Color::new(255.0, 255.0, 255.0);

/// Scene selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DemoScene {
    /// A translucent sphere around an opaque one, lit by a spot light
    #[default]
    TwoSpheres,
    /// Nested spheres in front of two mirrors
    Mirrors,
    /// A translucent sphere casting a partial shadow on two triangles
    TransparentShadow,
}

impl DemoScene {
    /// Build the scene and a camera looking at it.
    pub fn build(self) -> GeometryResult<(Scene, CameraBuilder)> {
        match self {
            DemoScene::TwoSpheres => two_spheres(),
            DemoScene::Mirrors => mirrors(),
            DemoScene::TransparentShadow => transparent_shadow(),
        }
    }
}

fn camera_on_z(z: f64, size: f64, distance: f64) -> CameraBuilder {
    Camera::builder()
        .position(Point::new(0.0, 0.0, z))
        .direction(Vector::NEG_Z, Vector::Y)
        .view_plane_size(size, size)
        .view_plane_distance(distance)
}

fn two_spheres() -> GeometryResult<(Scene, CameraBuilder)> {
    let scene = Scene::builder("two spheres")
        .geometry(
            Geometry::new(Sphere::new(Point::new(0.0, 0.0, -50.0), 50.0)?)
                .with_emission(BLUE)
                .with_material(Material::new().with_kd(0.4).with_ks(0.3).with_shininess(100).with_kt(0.3)),
        )
        .geometry(
            Geometry::new(Sphere::new(Point::new(0.0, 0.0, -50.0), 25.0)?)
                .with_emission(RED)
                .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(100)),
        )
        .light(
            SpotLight::new(
                Color::new(1000.0, 600.0, 0.0),
                Point::new(-100.0, -100.0, 500.0),
                Vector::new(-1.0, -1.0, -2.0)?,
            )
            .with_kl(0.0004)
            .with_kq(0.0000006),
        )
        .build();

    Ok((scene, camera_on_z(1000.0, 150.0, 1000.0)))
}

fn mirrors() -> GeometryResult<(Scene, CameraBuilder)> {
    let mirror_a = Point::new(1500.0, -1500.0, -1500.0);
    let mirror_b = Point::new(-1500.0, 1500.0, -1500.0);
    let gray = Color::splat(20.0);

    let scene = Scene::builder("mirrors")
        .ambient_light(AmbientLight::uniform(WHITE, 0.1))
        .geometry(
            Geometry::new(Sphere::new(Point::new(-950.0, -900.0, -1000.0), 400.0)?)
                .with_emission(Color::new(0.0, 50.0, 100.0))
                .with_material(
                    Material::new()
                        .with_kd(0.25)
                        .with_ks(0.25)
                        .with_shininess(20)
                        .with_kt_rgb(Color::new(0.5, 0.0, 0.0)),
                ),
        )
        .geometry(
            Geometry::new(Sphere::new(Point::new(-950.0, -900.0, -1000.0), 200.0)?)
                .with_emission(Color::new(100.0, 50.0, 20.0))
                .with_material(Material::new().with_kd(0.25).with_ks(0.25).with_shininess(20)),
        )
        .geometry(
            Geometry::new(Triangle::new(mirror_a, mirror_b, Point::new(670.0, 670.0, 3000.0))?)
                .with_emission(gray)
                .with_material(Material::new().with_kr(1.0)),
        )
        .geometry(
            Geometry::new(Triangle::new(mirror_a, mirror_b, Point::new(-1500.0, -1500.0, -2000.0))?)
                .with_emission(gray)
                .with_material(Material::new().with_kr_rgb(Color::new(0.5, 0.0, 0.4))),
        )
        .light(
            SpotLight::new(
                Color::new(1020.0, 400.0, 400.0),
                Point::new(-750.0, -750.0, -150.0),
                Vector::new(-1.0, -1.0, -4.0)?,
            )
            .with_kl(0.00001)
            .with_kq(0.000005),
        )
        .build();

    Ok((scene, camera_on_z(10000.0, 2500.0, 10000.0)))
}

fn transparent_shadow() -> GeometryResult<(Scene, CameraBuilder)> {
    let floor = Material::new().with_kd(0.5).with_ks(0.5).with_shininess(60);
    let corner = Point::new(-150.0, -150.0, -115.0);
    let far = Point::new(75.0, 75.0, -150.0);

    let scene = Scene::builder("transparent shadow")
        .ambient_light(AmbientLight::uniform(WHITE, 0.15))
        .geometry(
            Geometry::new(Triangle::new(corner, Point::new(150.0, -150.0, -135.0), far)?)
                .with_material(floor),
        )
        .geometry(
            Geometry::new(Triangle::new(corner, Point::new(-70.0, 70.0, -140.0), far)?)
                .with_material(floor),
        )
        .geometry(
            Geometry::new(Sphere::new(Point::new(60.0, 50.0, -50.0), 30.0)?)
                .with_emission(BLUE)
                .with_material(Material::new().with_kd(0.2).with_ks(0.2).with_shininess(30).with_kt(0.6)),
        )
        .light(
            SpotLight::new(
                Color::new(700.0, 400.0, 400.0),
                Point::new(60.0, 50.0, 0.0),
                Vector::NEG_Z,
            )
            .with_kl(4e-5)
            .with_kq(2e-7),
        )
        .build();

    Ok((scene, camera_on_z(1000.0, 200.0, 1000.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_renderer::{BasicRayTracer, RayTracer};

    #[test]
    fn test_all_scenes_build() {
        for scene in DemoScene::value_variants() {
            let (scene, camera) = scene.build().unwrap();
            assert!(!scene.geometries().is_empty());
            assert_eq!(scene.lights().len(), 1);
            assert!(camera.build().is_ok());
        }
    }

    #[test]
    fn test_two_spheres_center_hits() {
        let (scene, camera) = DemoScene::TwoSpheres.build().unwrap();
        let camera = camera.build().unwrap();
        let tracer = BasicRayTracer::new(&scene);

        let center = tracer.trace_ray(&camera.construct_ray(5, 5, 2, 2).unwrap());
        let corner = tracer.trace_ray(&camera.construct_ray(5, 5, 0, 0).unwrap());
        assert_ne!(center, scene.background());
        assert_eq!(corner, scene.background());
    }
}
