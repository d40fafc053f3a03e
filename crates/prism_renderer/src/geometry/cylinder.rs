use crate::geometry::{tube::axial_offset, Intersectable, Plane, Tube};
use prism_math::{
    align_negligible, ensure_positive, is_negligible, GeometryResult, Point, Ray, Vector,
};

/// A closed, finite cylinder: a [`Tube`] cut at `0` and `height` along its
/// axis, with flat end caps.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    /// Create a new cylinder. Radius and height must be positive.
    pub fn new(axis: Ray, radius: f64, height: f64) -> GeometryResult<Self> {
        Ok(Self {
            tube: Tube::new(axis, radius)?,
            height: ensure_positive("cylinder height", height)?,
        })
    }

    #[inline]
    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Centers of the bottom and top caps.
    fn cap_centers(&self) -> [Point; 2] {
        let axis = self.tube.axis();
        let top = axis.origin().as_dvec3() + axis.direction().as_dvec3() * self.height;
        [axis.origin(), Point::from_dvec3(top)]
    }
}

impl Intersectable for Cylinder {
    fn normal_at(&self, point: Point) -> GeometryResult<Vector> {
        let axis = self.tube.axis();
        let offset = axial_offset(axis, point.as_dvec3());
        if is_negligible(offset, self.height) {
            return Ok(-axis.direction());
        }
        if is_negligible(offset - self.height, self.height) {
            return Ok(axis.direction());
        }
        self.tube.normal_at(point)
    }

    fn intersect(&self, ray: &Ray) -> Vec<Point> {
        let axis = self.tube.axis();
        let radius = self.tube.radius();

        let mut ts: Vec<f64> = self
            .tube
            .side_parameters(ray)
            .into_iter()
            .filter(|&t| {
                let offset = align_negligible(axial_offset(axis, ray.at(t).as_dvec3()), self.height);
                offset > 0.0 && align_negligible(offset - self.height, self.height) < 0.0
            })
            .collect();

        for center in self.cap_centers() {
            let cap = Plane::new(center, axis.direction());
            if let Some(t) = cap.hit_parameter(ray) {
                let p = ray.at(t);
                let r_squared = radius * radius;
                if align_negligible(p.distance_squared(&center) - r_squared, r_squared) < 0.0 {
                    ts.push(t);
                }
            }
        }

        ts.sort_by(f64::total_cmp);
        ts.into_iter().map(|t| ray.at(t)).collect()
    }
}
