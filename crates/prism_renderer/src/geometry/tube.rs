use crate::geometry::Intersectable;
use glam::DVec3;
use prism_math::{
    align_negligible, ensure_positive, is_zero, GeometryResult, Point, Ray, Vector,
};

/// An infinite cylindrical surface around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    /// Create a new tube. The radius must be positive.
    pub fn new(axis: Ray, radius: f64) -> GeometryResult<Self> {
        Ok(Self {
            axis,
            radius: ensure_positive("tube radius", radius)?,
        })
    }

    #[inline]
    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Positive ray parameters where the ray crosses the surface, ascending.
    pub(crate) fn side_parameters(&self, ray: &Ray) -> Vec<f64> {
        let va = self.axis.direction().as_dvec3();
        let v = ray.direction().as_dvec3();
        let dp = ray.origin().as_dvec3() - self.axis.origin().as_dvec3();

        // Work in the plane perpendicular to the axis
        let v_perp = v - va * v.dot(va);
        let dp_perp = dp - va * dp.dot(va);

        let a = v_perp.length_squared();
        // Parallel to the axis
        if is_zero(a) {
            return Vec::new();
        }
        let b = 2.0 * v_perp.dot(dp_perp);
        let c = dp_perp.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        let magnitude = (b * b).max((4.0 * a * c).abs());
        if align_negligible(discriminant, magnitude) <= 0.0 {
            return Vec::new();
        }

        let sqrtd = discriminant.sqrt();
        let scale = dp_perp.length().max(self.radius);
        [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)]
            .into_iter()
            .map(|t| align_negligible(t, scale))
            .filter(|t| *t > 0.0)
            .collect()
    }
}

impl Intersectable for Tube {
    fn normal_at(&self, point: Point) -> GeometryResult<Vector> {
        let p0 = self.axis.origin();
        if point == p0 {
            return Ok(self.axis.direction());
        }

        let va = self.axis.direction().as_dvec3();
        let t = va.dot(point.as_dvec3() - p0.as_dvec3());
        // Closest point on the axis
        let o = if t != 0.0 {
            p0.as_dvec3() + va * t
        } else {
            p0.as_dvec3()
        };
        Ok(point.subtract(&Point::from_dvec3(o))?.normalize())
    }

    fn intersect(&self, ray: &Ray) -> Vec<Point> {
        self.side_parameters(ray)
            .into_iter()
            .map(|t| ray.at(t))
            .collect()
    }
}

/// Distance of `p` along the axis from the axis origin.
#[inline]
pub(crate) fn axial_offset(axis: &Ray, p: DVec3) -> f64 {
    axis.direction().as_dvec3().dot(p - axis.origin().as_dvec3())
}
