use crate::geometry::Intersectable;
use prism_math::{align_negligible, ensure_positive, GeometryResult, Point, Ray, Vector};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point, radius: f64) -> GeometryResult<Self> {
        Ok(Self {
            center,
            radius: ensure_positive("sphere radius", radius)?,
        })
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    fn normal_at(&self, point: Point) -> GeometryResult<Vector> {
        Ok(point.subtract(&self.center)?.normalize())
    }

    fn intersect(&self, ray: &Ray) -> Vec<Point> {
        // A ray starting at the center leaves through exactly one point
        let Ok(to_center) = self.center.subtract(&ray.origin()) else {
            return vec![ray.at(self.radius)];
        };

        // Rounding noise in the squared terms grows with the origin's distance
        let distance_squared = to_center.length_squared();
        let scale = distance_squared.sqrt().max(self.radius);

        let tm = to_center.dot(&ray.direction());
        let d_squared = distance_squared - tm * tm;
        let th_squared = self.radius * self.radius - d_squared;
        if align_negligible(th_squared, scale * scale) <= 0.0 {
            return Vec::new();
        }

        let th = th_squared.sqrt();
        let far = align_negligible(tm + th, scale);
        if far <= 0.0 {
            return Vec::new();
        }
        let near = align_negligible(tm - th, scale);
        if near <= 0.0 {
            vec![ray.at(far)]
        } else {
            vec![ray.at(near), ray.at(far)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z).unwrap()
    }

    fn sphere() -> Sphere {
        Sphere::new(Point::new(1.0, 0.0, 0.0), 1.0).unwrap()
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(&b) < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        assert!(Sphere::new(Point::ZERO, 0.0).is_err());
        assert!(Sphere::new(Point::ZERO, -1.0).is_err());
    }

    #[test]
    fn test_normal() {
        let s = Sphere::new(Point::ZERO, 1.0).unwrap();
        assert_eq!(s.normal_at(Point::new(0.0, 0.0, 1.0)).unwrap(), Vector::Z);
    }

    #[test]
    fn test_ray_misses() {
        let ray = Ray::new(Point::new(-1.0, 0.0, 0.0), v(1.0, 1.0, 0.0));
        assert!(sphere().intersect(&ray).is_empty());
    }

    #[test]
    fn test_ray_crosses_twice() {
        let ray = Ray::new(Point::new(-1.0, 0.0, 0.0), v(3.0, 1.0, 0.0));
        let hits = sphere().intersect(&ray);
        assert_eq!(hits.len(), 2);
        assert_close(hits[0], Point::new(0.0651530771650466, 0.355051025721682, 0.0));
        assert_close(hits[1], Point::new(1.53484692283495, 0.844948974278318, 0.0));
    }

    #[test]
    fn test_ray_starts_inside() {
        let ray = Ray::new(Point::new(1.5, 0.5, 0.0), v(1.0, 0.0, 0.0));
        let hits = sphere().intersect(&ray);
        assert_eq!(hits.len(), 1);
        assert_close(hits[0], Point::new(1.0 + 0.75f64.sqrt(), 0.5, 0.0));
    }

    #[test]
    fn test_ray_after_sphere() {
        let ray = Ray::new(Point::new(3.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
        assert!(sphere().intersect(&ray).is_empty());
    }

    #[test]
    fn test_ray_through_center_is_symmetric() {
        let s = sphere();
        let ray = Ray::new(Point::new(-2.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
        let hits = s.intersect(&ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], Point::new(0.0, 0.0, 0.0));
        assert_eq!(hits[1], Point::new(2.0, 0.0, 0.0));
        assert!((hits[0].distance(&s.center()) - 1.0).abs() < 1e-10);
        assert!((hits[1].distance(&s.center()) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_ray_starts_at_center() {
        let ray = Ray::new(Point::new(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0));
        assert_eq!(sphere().intersect(&ray), vec![Point::new(1.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_ray_tangent_misses() {
        let ray = Ray::new(Point::new(0.0, 1.0, 0.0), v(1.0, 0.0, 0.0));
        assert!(sphere().intersect(&ray).is_empty());
    }

    #[test]
    fn test_ray_starts_on_surface_going_in() {
        let ray = Ray::new(Point::new(1.0, -1.0, 0.0), v(0.0, 1.0, 0.0));
        assert_eq!(sphere().intersect(&ray), vec![Point::new(1.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_far_away_sphere() {
        // Ray along (0.6, 0.8, 0), sphere centers about 1e6 away
        let dir = v(3.0, 4.0, 0.0);
        let ray = Ray::new(Point::ZERO, dir);

        let hit = Sphere::new(Point::new(600000.0, 800000.0, 0.0), 1000.0).unwrap();
        let hits = hit.intersect(&ray);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance(&Point::new(599400.0, 799200.0, 0.0)) < 1e-6);
        assert!(hits[1].distance(&Point::new(600600.0, 800800.0, 0.0)) < 1e-6);

        // Offset sideways by exactly the radius
        let tangent = Sphere::new(Point::new(599200.0, 800600.0, 0.0), 1000.0).unwrap();
        assert!(tangent.intersect(&ray).is_empty());
    }

    #[test]
    fn test_large_sphere_origin_on_surface() {
        let s = Sphere::new(Point::ZERO, 1e6).unwrap();
        let on_surface = Point::new(600000.0, 800000.0, 0.0);

        let leaving = Ray::new(on_surface, v(3.0, 4.0, 0.0));
        assert!(s.intersect(&leaving).is_empty());

        let entering = Ray::new(on_surface, v(-3.0, -4.0, 0.0));
        let hits = s.intersect(&entering);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].distance(&Point::new(-600000.0, -800000.0, 0.0)) < 1e-6);
    }
}
