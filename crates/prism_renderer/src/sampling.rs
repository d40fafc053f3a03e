//! Per-pixel supersampling.
//!
//! Sub-samples are addressed on the camera's continuous pixel grid, so
//! `(col + 0.5, row + 0.5)` is the pixel center.

use std::collections::HashMap;

use crate::{color, Camera, Color, RayTracer, RenderResult};
use prism_math::Ray;

/// Trace an `n × n` uniform grid of sub-pixel rays and average them.
pub(crate) fn grid(
    camera: &Camera,
    tracer: &dyn RayTracer,
    nx: u32,
    ny: u32,
    col: u32,
    row: u32,
    n: u32,
) -> RenderResult<Color> {
    let step = 1.0 / n as f64;
    let mut rays: Vec<Ray> = Vec::with_capacity(n as usize * n as usize);
    for j in 0..n {
        for i in 0..n {
            let x = col as f64 + (i as f64 + 0.5) * step;
            let y = row as f64 + (j as f64 + 0.5) * step;
            rays.push(camera.ray_through(nx, ny, x, y)?);
        }
    }
    Ok(tracer.trace_rays(&rays))
}

/// Adaptive corner subdivision, at most `max_depth` levels deep.
///
/// A square whose four corner samples are exactly equal takes that color.
/// Otherwise it is split into quadrants, down to squares of side
/// `2^-max_depth` pixels whose corners are averaged. Corner samples are
/// memoized for the duration of one pixel.
pub(crate) fn adaptive(
    camera: &Camera,
    tracer: &dyn RayTracer,
    nx: u32,
    ny: u32,
    col: u32,
    row: u32,
    max_depth: u32,
) -> RenderResult<Color> {
    let mut sampler = AdaptiveSampler {
        camera,
        tracer,
        nx,
        ny,
        col,
        row,
        resolution: 1 << max_depth,
        samples: HashMap::new(),
    };
    let span = sampler.resolution;
    sampler.subdivide(0, 0, span)
}

/// One pixel's adaptive sampling state.
///
/// Sample points sit on an integer lattice of `resolution + 1` points per
/// side, so shared corners hash to the same key.
struct AdaptiveSampler<'a> {
    camera: &'a Camera,
    tracer: &'a dyn RayTracer,
    nx: u32,
    ny: u32,
    col: u32,
    row: u32,
    resolution: u32,
    samples: HashMap<(u32, u32), Color>,
}

impl AdaptiveSampler<'_> {
    fn sample(&mut self, i: u32, j: u32) -> RenderResult<Color> {
        if let Some(color) = self.samples.get(&(i, j)) {
            return Ok(*color);
        }
        let scale = self.resolution as f64;
        let x = self.col as f64 + i as f64 / scale;
        let y = self.row as f64 + j as f64 / scale;
        let ray = self.camera.ray_through(self.nx, self.ny, x, y)?;
        let color = self.tracer.trace_ray(&ray);
        self.samples.insert((i, j), color);
        Ok(color)
    }

    fn subdivide(&mut self, i: u32, j: u32, span: u32) -> RenderResult<Color> {
        let corners = [
            self.sample(i, j)?,
            self.sample(i + span, j)?,
            self.sample(i, j + span)?,
            self.sample(i + span, j + span)?,
        ];

        if corners.iter().all(|c| *c == corners[0]) {
            return Ok(corners[0]);
        }
        if span == 1 {
            return Ok(color::reduce(corners.iter().sum(), corners.len()));
        }

        let half = span / 2;
        let quadrants = [
            self.subdivide(i, j, half)?,
            self.subdivide(i + half, j, half)?,
            self.subdivide(i, j + half, half)?,
            self.subdivide(i + half, j + half, half)?,
        ];
        Ok(color::reduce(quadrants.iter().sum(), quadrants.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BLACK;
    use prism_math::{Point, Vector};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Returns one fixed color and counts how often it was asked.
    struct CountingTracer {
        color: Color,
        calls: AtomicUsize,
    }

    impl CountingTracer {
        fn new(color: Color) -> Self {
            Self { color, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RayTracer for CountingTracer {
        fn trace_ray(&self, _ray: &Ray) -> Color {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.color
        }
    }

    /// Returns a distinct color for every call and records each ray.
    struct UniqueTracer {
        rays: Mutex<Vec<Ray>>,
    }

    impl RayTracer for UniqueTracer {
        fn trace_ray(&self, ray: &Ray) -> Color {
            let mut rays = self.rays.lock().unwrap();
            rays.push(*ray);
            Color::splat(rays.len() as f64)
        }
    }

    /// Left half of the view plane is black, the right half white.
    struct SplitTracer;

    impl RayTracer for SplitTracer {
        fn trace_ray(&self, ray: &Ray) -> Color {
            if ray.direction().x() < 0.0 {
                BLACK
            } else {
                Color::splat(255.0)
            }
        }
    }

    fn camera() -> Camera {
        Camera::builder()
            .position(Point::ZERO)
            .direction(Vector::NEG_Z, Vector::Y)
            .view_plane_size(2.0, 2.0)
            .view_plane_distance(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_grid_traces_n_squared_rays() {
        let tracer = CountingTracer::new(Color::new(10.0, 20.0, 30.0));
        let color = grid(&camera(), &tracer, 4, 4, 1, 2, 3).unwrap();
        assert_eq!(tracer.calls(), 9);
        assert!((color - Color::new(10.0, 20.0, 30.0)).length() < 1e-9);
    }

    #[test]
    fn test_grid_rays_stay_inside_pixel() {
        let tracer = UniqueTracer { rays: Mutex::new(Vec::new()) };
        grid(&camera(), &tracer, 2, 2, 1, 0, 2).unwrap();

        // Pixel (1, 0) covers x in (0, 1) and y in (0, 1) on the view plane
        for ray in tracer.rays.lock().unwrap().iter() {
            let d = ray.direction().as_dvec3();
            let hit = d / -d.z;
            assert!(hit.x > 0.0 && hit.x < 1.0, "x = {}", hit.x);
            assert!(hit.y > 0.0 && hit.y < 1.0, "y = {}", hit.y);
        }
    }

    #[test]
    fn test_adaptive_uniform_pixel_uses_corners_only() {
        let tracer = CountingTracer::new(Color::new(1.0, 2.0, 3.0));
        let color = adaptive(&camera(), &tracer, 5, 5, 2, 2, 4).unwrap();
        assert_eq!(tracer.calls(), 4);
        assert_eq!(color, Color::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_adaptive_reuses_shared_corners() {
        let tracer = UniqueTracer { rays: Mutex::new(Vec::new()) };
        adaptive(&camera(), &tracer, 1, 1, 0, 0, 1).unwrap();

        // One level of subdivision samples a 3x3 lattice, each point once
        assert_eq!(tracer.rays.lock().unwrap().len(), 9);
    }

    #[test]
    fn test_adaptive_sample_count_is_bounded_by_depth() {
        let tracer = UniqueTracer { rays: Mutex::new(Vec::new()) };
        adaptive(&camera(), &tracer, 1, 1, 0, 0, 3).unwrap();
        assert_eq!(tracer.rays.lock().unwrap().len(), 81);
    }

    #[test]
    fn test_adaptive_edge_pixel_blends() {
        // Pixel 1 of 3 straddles the black/white boundary at x = 0
        let color = adaptive(&camera(), &SplitTracer, 3, 1, 1, 0, 3).unwrap();
        assert!(color.x > 0.0 && color.x < 255.0);

        let flat = adaptive(&camera(), &SplitTracer, 3, 1, 0, 0, 3).unwrap();
        assert_eq!(flat, BLACK);
    }
}
