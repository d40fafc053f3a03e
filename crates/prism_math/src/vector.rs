use std::ops::Neg;

use crate::{GeometryError, GeometryResult};
use glam::DVec3;

/// A non-zero direction or displacement.
///
/// A vector can never have all three components exactly zero. Every
/// operation that could produce such a vector returns a
/// [`GeometryError`] instead.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector(DVec3);

impl Vector {
    pub const X: Vector = Vector(DVec3::X);
    pub const Y: Vector = Vector(DVec3::Y);
    pub const Z: Vector = Vector(DVec3::Z);
    pub const NEG_X: Vector = Vector(DVec3::NEG_X);
    pub const NEG_Y: Vector = Vector(DVec3::NEG_Y);
    pub const NEG_Z: Vector = Vector(DVec3::NEG_Z);

    /// Create a new vector, rejecting (0, 0, 0).
    pub fn new(x: f64, y: f64, z: f64) -> GeometryResult<Self> {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    /// Wrap a raw glam vector, rejecting the zero vector and infinite or
    /// NaN components.
    pub fn from_dvec3(v: DVec3) -> GeometryResult<Self> {
        if !v.is_finite() {
            Err(GeometryError::NonFinite)
        } else if v == DVec3::ZERO {
            Err(GeometryError::ZeroVector)
        } else {
            Ok(Self(v))
        }
    }

    /// The raw components.
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

    /// Vector sum. Fails when the operands cancel out.
    pub fn add(&self, other: &Vector) -> GeometryResult<Vector> {
        Self::from_dvec3(self.0 + other.0)
    }

    /// Scale by a scalar. Fails when `factor` is zero.
    pub fn scale(&self, factor: f64) -> GeometryResult<Vector> {
        Self::from_dvec3(self.0 * factor)
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product. Fails on parallel operands.
    pub fn cross(&self, other: &Vector) -> GeometryResult<Vector> {
        let c = self.0.cross(other.0);
        if c == DVec3::ZERO {
            Err(GeometryError::ParallelVectors)
        } else {
            Self::from_dvec3(c)
        }
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    /// Euclidean length, without overflow or underflow of the squared sum.
    pub fn length(&self) -> f64 {
        let scale = self.max_abs();
        (self.0 / scale).length() * scale
    }

    /// A new unit-length vector with the same direction.
    ///
    /// Components are first divided by the largest absolute component, so
    /// the squared sum stays within [1, 3] at any magnitude. Division
    /// rather than reciprocal multiplication keeps exact multiples
    /// normalizing to bit-identical results.
    pub fn normalize(&self) -> Vector {
        let scaled = self.0 / self.max_abs();
        Self(scaled / scaled.length())
    }

    /// Largest absolute component; positive for any valid vector.
    #[inline]
    fn max_abs(&self) -> f64 {
        self.0.abs().max_element()
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Self(-self.0)
    }
}

impl From<Vector> for DVec3 {
    fn from(v: Vector) -> Self {
        v.0
    }
}
