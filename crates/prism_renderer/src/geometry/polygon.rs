use crate::geometry::{Intersectable, Plane};
use glam::DVec3;
use prism_math::{is_negligible, is_zero, GeometryError, GeometryResult, Point, Ray, Vector};

/// A convex, planar polygon.
///
/// Vertices are given in order around the boundary. Construction checks
/// that they are coplanar and form a convex shape.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::Degenerate(
                "a polygon needs at least three vertices".into(),
            ));
        }

        // Fails on coincident or collinear leading vertices
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if vertices.len() == 3 {
            return Ok(Self { vertices, plane });
        }

        let n = plane.normal();
        let count = vertices.len();
        let edge = |from: usize, to: usize| {
            vertices[to]
                .subtract(&vertices[from])
                .map_err(|_| GeometryError::Degenerate("polygon has repeated vertices".into()))
        };
        let turn = |a: &Vector, b: &Vector| {
            a.cross(b)
                .map(|c| c.dot(&n))
                .map_err(|_| GeometryError::Degenerate("polygon has collinear edges".into()))
        };

        // Every consecutive pair of edges must turn the same way
        let mut edge1 = edge(count - 2, count - 1)?;
        let mut edge2 = edge(count - 1, 0)?;
        let positive = turn(&edge1, &edge2)? > 0.0;
        for i in 1..count {
            let offset = vertices[i].as_dvec3() - vertices[0].as_dvec3();
            if !is_negligible(offset.dot(n.as_dvec3()), offset.length()) {
                return Err(GeometryError::Degenerate(
                    "polygon vertices are not coplanar".into(),
                ));
            }

            edge1 = edge2;
            edge2 = edge(i - 1, i)?;
            if positive != (turn(&edge1, &edge2)? > 0.0) {
                return Err(GeometryError::Degenerate("polygon is not convex".into()));
            }
        }

        Ok(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }
}

impl Intersectable for Polygon {
    fn normal_at(&self, _point: Point) -> GeometryResult<Vector> {
        Ok(self.plane.normal())
    }

    fn intersect(&self, ray: &Ray) -> Vec<Point> {
        let hits = self.plane.intersect(ray);
        if hits.is_empty() {
            return hits;
        }

        let p0 = ray.origin().as_dvec3();
        let dir = ray.direction().as_dvec3();
        let count = self.vertices.len();

        // Signed side of the ray against each edge's wedge; all must agree
        let mut sign = 0.0;
        for i in 0..count {
            let vi = self.vertices[i].as_dvec3() - p0;
            let vj = self.vertices[(i + 1) % count].as_dvec3() - p0;
            let normal = vi.cross(vj);
            if normal == DVec3::ZERO {
                return Vec::new();
            }
            let s = dir.dot(normal.normalize());
            if is_zero(s) {
                return Vec::new();
            }
            if i == 0 {
                sign = s.signum();
            } else if s.signum() != sign {
                return Vec::new();
            }
        }
        hits
    }
}

/// A triangle: a three-vertex [`Polygon`].
#[derive(Debug, Clone)]
pub struct Triangle(Polygon);

impl Triangle {
    /// Create a triangle. Fails on coincident or collinear vertices.
    pub fn new(p1: Point, p2: Point, p3: Point) -> GeometryResult<Self> {
        Polygon::new(vec![p1, p2, p3]).map(Self)
    }

    pub fn vertices(&self) -> &[Point] {
        self.0.vertices()
    }
}

impl Intersectable for Triangle {
    fn normal_at(&self, point: Point) -> GeometryResult<Vector> {
        self.0.normal_at(point)
    }

    fn intersect(&self, ray: &Ray) -> Vec<Point> {
        self.0.intersect(ray)
    }
}
