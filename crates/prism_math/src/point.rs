use std::ops::Add;

use crate::{GeometryResult, Vector};
use glam::DVec3;

/// A location in 3D space.
///
/// Points carry no validity constraint; any triple of reals is a point.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point(DVec3);

impl Point {
    /// The origin (0, 0, 0).
    pub const ZERO: Point = Point(DVec3::ZERO);

    /// Create a new point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Wrap a raw glam vector as a point.
    #[inline]
    pub const fn from_dvec3(v: DVec3) -> Self {
        Self(v)
    }

    /// The raw coordinates.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Vector from `other` to `self`.
    ///
    /// Fails with [`GeometryError::ZeroVector`](crate::GeometryError::ZeroVector)
    /// when both points coincide.
    pub fn subtract(&self, other: &Point) -> GeometryResult<Vector> {
        Vector::from_dvec3(self.0 - other.0)
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        self.0.distance_squared(other.0)
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.as_dvec3())
    }
}

impl From<DVec3> for Point {
    fn from(v: DVec3) -> Self {
        Self(v)
    }
}

/// Anything that sits at a point in space, such as an intersection record.
pub trait Located {
    fn location(&self) -> Point;
}

impl Located for Point {
    fn location(&self) -> Point {
        *self
    }
}
