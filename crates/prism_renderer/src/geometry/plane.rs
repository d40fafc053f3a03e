use crate::geometry::Intersectable;
use prism_math::{align_negligible, is_zero, GeometryError, GeometryResult, Point, Ray, Vector};

/// An infinite plane given by a reference point and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    q0: Point,
    normal: Vector,
}

impl Plane {
    /// Create a plane from a point on it and a normal (normalized here).
    pub fn new(q0: Point, normal: Vector) -> Self {
        Self {
            q0,
            normal: normal.normalize(),
        }
    }

    /// Create the plane through three points.
    ///
    /// Fails if any two points coincide or all three are collinear.
    pub fn from_points(p1: Point, p2: Point, p3: Point) -> GeometryResult<Self> {
        let coincident = |_| GeometryError::Degenerate("plane points coincide".into());
        let v1 = p1.subtract(&p2).map_err(coincident)?;
        let v2 = p1.subtract(&p3).map_err(coincident)?;
        let normal = v1
            .cross(&v2)
            .map_err(|_| GeometryError::Degenerate("plane points are collinear".into()))?;
        Ok(Self::new(p1, normal))
    }

    #[inline]
    pub fn q0(&self) -> Point {
        self.q0
    }

    #[inline]
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Ray parameter of the intersection, if the ray crosses the plane ahead
    /// of its origin.
    pub(crate) fn hit_parameter(&self, ray: &Ray) -> Option<f64> {
        let nv = self.normal.dot(&ray.direction());
        // Parallel to the plane
        if is_zero(nv) {
            return None;
        }
        // Origin on the reference point
        let to_q0 = self.q0.subtract(&ray.origin()).ok()?;
        let t = align_negligible(self.normal.dot(&to_q0) / nv, to_q0.length());
        (t > 0.0).then_some(t)
    }
}

impl Intersectable for Plane {
    fn normal_at(&self, _point: Point) -> GeometryResult<Vector> {
        Ok(self.normal)
    }

    fn intersect(&self, ray: &Ray) -> Vec<Point> {
        self.hit_parameter(ray)
            .map(|t| ray.at(t))
            .into_iter()
            .collect()
    }
}
