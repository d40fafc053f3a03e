//! Camera for ray generation.

use crate::sampling;
use crate::{Color, RayTracer, RenderError, RenderResult, SamplingConfig};
use prism_math::{ensure_positive, is_zero, GeometryError, Point, Ray, Vector};

/// Pinhole camera looking through a rectangular view plane.
///
/// Produced by [`CameraBuilder`]; immutable once built, so it can be shared
/// by every render worker.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point,

    // Orthonormal basis
    to: Vector,
    up: Vector,
    right: Vector,

    // View plane
    width: f64,
    height: f64,
    distance: f64,

    sampling: SamplingConfig,
}

impl Camera {
    /// Start building a camera.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn to(&self) -> Vector {
        self.to
    }

    #[inline]
    pub fn up(&self) -> Vector {
        self.up
    }

    #[inline]
    pub fn right(&self) -> Vector {
        self.right
    }

    /// View plane width and height.
    pub fn view_plane_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn view_plane_distance(&self) -> f64 {
        self.distance
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Ray through the center of pixel `(col, row)` of an `nx × ny` grid.
    ///
    /// Row 0 is the top of the view plane.
    pub fn construct_ray(&self, nx: u32, ny: u32, col: u32, row: u32) -> RenderResult<Ray> {
        if nx == 0 || ny == 0 {
            return Err(RenderError::InvalidConfiguration(format!(
                "resolution must be non-zero, got {nx}x{ny}"
            )));
        }
        if col >= nx || row >= ny {
            return Err(RenderError::InvalidConfiguration(format!(
                "pixel ({col}, {row}) outside {nx}x{ny} grid"
            )));
        }
        self.ray_through(nx, ny, col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Ray through a continuous position on the pixel grid, where `(0, 0)`
    /// is the top-left corner of the view plane and `(nx, ny)` the
    /// bottom-right.
    pub(crate) fn ray_through(&self, nx: u32, ny: u32, x: f64, y: f64) -> RenderResult<Ray> {
        let rx = self.width / nx as f64;
        let ry = self.height / ny as f64;
        let xj = (x - nx as f64 / 2.0) * rx;
        let yi = -(y - ny as f64 / 2.0) * ry;

        let pc = self.position.as_dvec3() + self.to.as_dvec3() * self.distance;
        let pij = pc + self.right.as_dvec3() * xj + self.up.as_dvec3() * yi;
        let direction = Vector::from_dvec3(pij - self.position.as_dvec3())?;
        Ok(Ray::new(self.position, direction))
    }

    /// Color of pixel `(col, row)` using the configured sampling mode.
    pub fn render_pixel(
        &self,
        tracer: &dyn RayTracer,
        nx: u32,
        ny: u32,
        col: u32,
        row: u32,
    ) -> RenderResult<Color> {
        // Validates the resolution and pixel coordinates
        let center = self.construct_ray(nx, ny, col, row)?;

        if self.sampling.adaptive {
            sampling::adaptive(self, tracer, nx, ny, col, row, self.sampling.max_adaptive_depth)
        } else if self.sampling.anti_aliasing > 1 {
            sampling::grid(self, tracer, nx, ny, col, row, self.sampling.anti_aliasing)
        } else {
            Ok(tracer.trace_ray(&center))
        }
    }
}

/// Staged construction of a [`Camera`].
///
/// Position, direction pair, view plane size and distance are required.
#[derive(Debug, Clone, Default)]
pub struct CameraBuilder {
    position: Option<Point>,
    direction: Option<(Vector, Vector)>,
    size: Option<(f64, f64)>,
    distance: Option<f64>,
    sampling: SamplingConfig,
}

impl CameraBuilder {
    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the viewing direction and the up vector. They must be orthogonal.
    pub fn direction(mut self, to: Vector, up: Vector) -> Self {
        self.direction = Some((to, up));
        self
    }

    pub fn view_plane_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn view_plane_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Replace the whole sampling configuration.
    pub fn sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Rays per pixel side for grid supersampling.
    pub fn anti_aliasing(mut self, factor: u32) -> Self {
        self.sampling.anti_aliasing = factor;
        self
    }

    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.sampling.adaptive = adaptive;
        self
    }

    pub fn max_adaptive_depth(mut self, depth: u32) -> Self {
        self.sampling.max_adaptive_depth = depth;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.sampling.threads = threads;
        self
    }

    /// Log render progress every `secs` seconds.
    pub fn progress_interval(mut self, secs: f64) -> Self {
        self.sampling.progress_interval_secs = Some(secs);
        self
    }

    /// Validate and produce the camera.
    pub fn build(self) -> RenderResult<Camera> {
        let position = self
            .position
            .ok_or(RenderError::MissingConfiguration("camera position"))?;
        let (to, up) = self
            .direction
            .ok_or(RenderError::MissingConfiguration("camera direction"))?;
        let (width, height) = self
            .size
            .ok_or(RenderError::MissingConfiguration("view plane size"))?;
        let distance = self
            .distance
            .ok_or(RenderError::MissingConfiguration("view plane distance"))?;

        let to = to.normalize();
        let up = up.normalize();
        if !is_zero(to.dot(&up)) {
            return Err(GeometryError::Degenerate(
                "camera direction vectors must be orthogonal".into(),
            )
            .into());
        }
        let right = to.cross(&up)?.normalize();

        ensure_positive("view plane width", width)?;
        ensure_positive("view plane height", height)?;
        ensure_positive("view plane distance", distance)?;
        self.sampling.validate()?;

        log::debug!(
            "Camera at {:?} looking {:?}, view plane {}x{} at {}",
            position.as_dvec3(),
            to.as_dvec3(),
            width,
            height,
            distance
        );

        Ok(Camera {
            position,
            to,
            up,
            right,
            width,
            height,
            distance,
            sampling: self.sampling,
        })
    }
}
