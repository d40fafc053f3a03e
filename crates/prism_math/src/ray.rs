use crate::{is_zero, Located, Point, Vector};

/// Offset applied to the origin of secondary rays so they do not
/// re-intersect the surface they start on.
pub const DELTA: f64 = 0.1;

/// A half-line with an origin and a unit-length direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point,
    /// Always unit length
    direction: Vector,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a secondary ray leaving a surface at `point`.
    ///
    /// The origin is moved by [`DELTA`] along `normal`, toward the side
    /// that `direction` points to.
    pub fn with_offset(point: Point, direction: Vector, normal: Vector) -> Self {
        let nv = normal.dot(&direction);
        let shift = if nv > 0.0 { DELTA } else { -DELTA };
        let origin = Point::from_dvec3(point.as_dvec3() + normal.as_dvec3() * shift);
        Self::new(origin, direction)
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Get the ray's unit direction.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Compute a point along the ray at parameter t.
    ///
    /// Returns the origin itself when `t` is (almost) zero.
    pub fn at(&self, t: f64) -> Point {
        if is_zero(t) {
            self.origin
        } else {
            Point::from_dvec3(self.origin.as_dvec3() + self.direction.as_dvec3() * t)
        }
    }

    /// Pick the item closest to the ray origin. Ties keep the first item.
    pub fn find_closest<T: Located>(&self, items: impl IntoIterator<Item = T>) -> Option<T> {
        let mut closest = None;
        let mut min_distance = f64::INFINITY;
        for item in items {
            let distance = item.location().distance_squared(&self.origin);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(item);
            }
        }
        closest
    }
}
