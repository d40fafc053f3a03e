//! Geometric primitives and ray intersection.
//!
//! Shapes are a closed set of variants ([`Shape`]) dispatched through the
//! [`Intersectable`] trait. A [`Geometry`] pairs a shape with its emission
//! and material, and produces [`GeoPoint`] hit records that borrow it.

mod cylinder;
mod plane;
mod polygon;
mod sphere;
mod tube;

pub use cylinder::Cylinder;
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use sphere::Sphere;
pub use tube::Tube;

use crate::{Color, Material, BLACK};
use prism_math::{GeometryResult, Located, Point, Ray, Vector};

/// Ray intersection and surface normals for a single shape.
pub trait Intersectable {
    /// Unit normal at a point on the surface.
    fn normal_at(&self, point: Point) -> GeometryResult<Vector>;

    /// All intersection points along the ray, ordered near to far.
    ///
    /// An empty vector means the ray misses.
    fn intersect(&self, ray: &Ray) -> Vec<Point>;
}

/// The closed set of supported shapes.
#[derive(Debug, Clone)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Intersectable for Shape {
    fn normal_at(&self, point: Point) -> GeometryResult<Vector> {
        match self {
            Shape::Plane(s) => s.normal_at(point),
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Triangle(s) => s.normal_at(point),
            Shape::Polygon(s) => s.normal_at(point),
            Shape::Tube(s) => s.normal_at(point),
            Shape::Cylinder(s) => s.normal_at(point),
        }
    }

    fn intersect(&self, ray: &Ray) -> Vec<Point> {
        match self {
            Shape::Plane(s) => s.intersect(ray),
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Triangle(s) => s.intersect(ray),
            Shape::Polygon(s) => s.intersect(ray),
            Shape::Tube(s) => s.intersect(ray),
            Shape::Cylinder(s) => s.intersect(ray),
        }
    }
}

macro_rules! impl_into_shape {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Shape {
                fn from(shape: $ty) -> Self {
                    Shape::$ty(shape)
                }
            }
        )*
    };
}

impl_into_shape!(Plane, Sphere, Triangle, Polygon, Tube, Cylinder);

/// A shape placed in a scene, with its emission and surface material.
#[derive(Debug, Clone)]
pub struct Geometry {
    shape: Shape,
    emission: Color,
    material: Material,
}

impl Geometry {
    /// Create a black, default-material geometry.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            emission: BLACK,
            material: Material::default(),
        }
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn emission(&self) -> Color {
        self.emission
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Unit normal at a point on the surface.
    pub fn normal_at(&self, point: Point) -> GeometryResult<Vector> {
        self.shape.normal_at(point)
    }

    /// Hit records for every intersection with the ray, near to far.
    pub fn intersect(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        self.shape
            .intersect(ray)
            .into_iter()
            .map(|point| GeoPoint::new(self, point))
            .collect()
    }
}

/// An intersection point paired with the geometry that produced it.
///
/// The geometry is borrowed, never owned: hit records live no longer than
/// the scene they were produced from.
#[derive(Debug, Clone, Copy)]
pub struct GeoPoint<'a> {
    pub geometry: &'a Geometry,
    pub point: Point,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a Geometry, point: Point) -> Self {
        Self { geometry, point }
    }

    /// Surface normal of the owning geometry at this point.
    pub fn normal(&self) -> GeometryResult<Vector> {
        self.geometry.normal_at(self.point)
    }
}

impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.geometry, other.geometry) && self.point == other.point
    }
}

impl Located for GeoPoint<'_> {
    fn location(&self) -> Point {
        self.point
    }
}
