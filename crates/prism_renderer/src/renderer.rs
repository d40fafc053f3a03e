//! Render driver.
//!
//! Runs a fixed pool of workers over a shared [`PixelScheduler`]. Each
//! worker traces its claimed pixel and writes it straight to the sink.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crate::{Camera, Color, Pixel, PixelScheduler, PixelSink, RayTracer, RenderError, RenderResult};

/// Renders one image from a camera and tracer into a sink.
pub struct Renderer<'a> {
    camera: Camera,
    tracer: &'a dyn RayTracer,
    sink: &'a dyn PixelSink,
}

impl<'a> Renderer<'a> {
    /// Start building a renderer.
    pub fn builder() -> RendererBuilder<'a> {
        RendererBuilder::default()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Render every pixel of the sink.
    ///
    /// The first error raised by any worker stops the remaining workers and
    /// is returned; the sink contents are then incomplete.
    pub fn render(&self) -> RenderResult<()> {
        let (nx, ny) = self.resolution()?;
        let sampling = self.camera.sampling();
        let threads = sampling.threads;

        let mode = if sampling.adaptive {
            format!("adaptive (depth {})", sampling.max_adaptive_depth)
        } else if sampling.anti_aliasing > 1 {
            format!("{0}x{0} grid", sampling.anti_aliasing)
        } else {
            "single ray".to_string()
        };
        log::info!("Rendering {nx}x{ny} on {threads} thread(s), {mode} sampling");
        let start = Instant::now();

        let mut scheduler = PixelScheduler::new(nx, ny);
        if let Some(interval) = sampling.progress_interval() {
            scheduler = scheduler.with_progress_interval(interval);
        }

        if threads <= 1 {
            self.render_worker(&scheduler, nx, ny)?;
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("prism-render-{i}"))
                .build()?;

            let first_error: Mutex<Option<RenderError>> = Mutex::new(None);
            pool.scope(|s| {
                for _ in 0..threads {
                    s.spawn(|_| {
                        if let Err(err) = self.render_worker(&scheduler, nx, ny) {
                            scheduler.drain();
                            let mut slot = first_error.lock().unwrap_or_else(PoisonError::into_inner);
                            slot.get_or_insert(err);
                        }
                    });
                }
            });

            if let Some(err) = first_error.into_inner().unwrap_or_else(PoisonError::into_inner) {
                log::error!("Render aborted: {err}");
                return Err(err);
            }
        }

        log::info!(
            "Render complete: {} pixels in {:.2?}",
            scheduler.completed(),
            start.elapsed()
        );
        Ok(())
    }

    /// Overwrite every `interval`-th row and column with `color`.
    pub fn print_grid(&self, interval: u32, color: Color) -> RenderResult<()> {
        if interval == 0 {
            return Err(RenderError::InvalidConfiguration(
                "grid interval must be at least 1".into(),
            ));
        }
        let (nx, ny) = self.resolution()?;
        for row in 0..ny {
            for col in 0..nx {
                if col % interval == 0 || row % interval == 0 {
                    self.sink.write_pixel(col, row, color);
                }
            }
        }
        Ok(())
    }

    fn resolution(&self) -> RenderResult<(u32, u32)> {
        match self.sink.resolution() {
            (0, _) | (_, 0) => Err(RenderError::InvalidConfiguration(
                "sink resolution must be non-zero".into(),
            )),
            resolution => Ok(resolution),
        }
    }

    fn render_worker(&self, scheduler: &PixelScheduler, nx: u32, ny: u32) -> RenderResult<()> {
        while let Some(Pixel { col, row }) = scheduler.next_pixel() {
            let color = self.camera.render_pixel(self.tracer, nx, ny, col, row)?;
            self.sink.write_pixel(col, row, color);
            scheduler.pixel_done();
        }
        Ok(())
    }
}

/// Staged construction of a [`Renderer`]. Camera, tracer and sink are all
/// required.
#[derive(Default)]
pub struct RendererBuilder<'a> {
    camera: Option<Camera>,
    tracer: Option<&'a dyn RayTracer>,
    sink: Option<&'a dyn PixelSink>,
}

impl<'a> RendererBuilder<'a> {
    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn tracer(mut self, tracer: &'a dyn RayTracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn sink(mut self, sink: &'a dyn PixelSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> RenderResult<Renderer<'a>> {
        Ok(Renderer {
            camera: self.camera.ok_or(RenderError::MissingConfiguration("camera"))?,
            tracer: self.tracer.ok_or(RenderError::MissingConfiguration("ray tracer"))?,
            sink: self.sink.ok_or(RenderError::MissingConfiguration("pixel sink"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicRayTracer, Geometry, ImageBuffer, Scene, Sphere, BLACK};
    use prism_math::{Point, Ray, Vector};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    struct ConstantTracer(Color);

    impl RayTracer for ConstantTracer {
        fn trace_ray(&self, _ray: &Ray) -> Color {
            self.0
        }
    }

    /// Counts writes per pixel.
    struct CountingSink {
        width: u32,
        height: u32,
        writes: Vec<AtomicU32>,
    }

    impl CountingSink {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                writes: (0..width * height).map(|_| AtomicU32::new(0)).collect(),
            }
        }
    }

    impl PixelSink for CountingSink {
        fn resolution(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn write_pixel(&self, col: u32, row: u32, _color: Color) {
            self.writes[(row * self.width + col) as usize].fetch_add(1, Ordering::SeqCst);
        }
    }

    fn camera(threads: usize) -> Camera {
        Camera::builder()
            .position(Point::ZERO)
            .direction(Vector::NEG_Z, Vector::Y)
            .view_plane_size(2.0, 2.0)
            .view_plane_distance(1.0)
            .threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_reports_missing_parts() {
        let tracer = ConstantTracer(BLACK);
        let image = ImageBuffer::new(1, 1);

        let err = Renderer::builder().tracer(&tracer).sink(&image).build().err().unwrap();
        assert!(matches!(err, RenderError::MissingConfiguration("camera")));

        let err = Renderer::builder().camera(camera(1)).sink(&image).build().err().unwrap();
        assert!(matches!(err, RenderError::MissingConfiguration("ray tracer")));

        let err = Renderer::builder().camera(camera(1)).tracer(&tracer).build().err().unwrap();
        assert!(matches!(err, RenderError::MissingConfiguration("pixel sink")));
    }

    #[test]
    fn test_render_fills_every_pixel() {
        init_logger();
        let tracer = ConstantTracer(Color::new(10.0, 20.0, 30.0));
        let image = ImageBuffer::new(8, 5);

        Renderer::builder()
            .camera(camera(1))
            .tracer(&tracer)
            .sink(&image)
            .build()
            .unwrap()
            .render()
            .unwrap();

        for row in 0..5 {
            for col in 0..8 {
                assert_eq!(image.get(col, row), Some(Color::new(10.0, 20.0, 30.0)));
            }
        }
    }

    #[test]
    fn test_parallel_render_writes_each_pixel_once() {
        init_logger();
        let tracer = ConstantTracer(Color::ONE);
        let sink = CountingSink::new(31, 17);

        Renderer::builder()
            .camera(camera(4))
            .tracer(&tracer)
            .sink(&sink)
            .build()
            .unwrap()
            .render()
            .unwrap();

        assert!(sink.writes.iter().all(|w| w.load(Ordering::SeqCst) == 1));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        init_logger();
        let scene = Scene::builder("ball")
            .background(Color::splat(7.0))
            .geometry(
                Geometry::new(Sphere::new(Point::new(0.0, 0.0, -3.0), 1.0).unwrap())
                    .with_emission(Color::new(200.0, 0.0, 0.0)),
            )
            .build();
        let tracer = BasicRayTracer::new(&scene);

        let sequential = ImageBuffer::new(9, 9);
        let parallel = ImageBuffer::new(9, 9);
        for (threads, image) in [(1, &sequential), (3, &parallel)] {
            Renderer::builder()
                .camera(camera(threads))
                .tracer(&tracer)
                .sink(image)
                .build()
                .unwrap()
                .render()
                .unwrap();
        }

        assert_eq!(sequential.to_rgba8(), parallel.to_rgba8());
        assert_eq!(sequential.get(4, 4), Some(Color::new(200.0, 0.0, 0.0)));
        assert_eq!(sequential.get(0, 0), Some(Color::splat(7.0)));
    }

    #[test]
    fn test_zero_resolution_is_rejected() {
        let tracer = ConstantTracer(BLACK);
        let image = ImageBuffer::new(0, 4);
        let renderer = Renderer::builder()
            .camera(camera(1))
            .tracer(&tracer)
            .sink(&image)
            .build()
            .unwrap();
        assert!(matches!(renderer.render(), Err(RenderError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_print_grid() {
        let tracer = ConstantTracer(BLACK);
        let image = ImageBuffer::new(5, 5);
        let renderer = Renderer::builder()
            .camera(camera(1))
            .tracer(&tracer)
            .sink(&image)
            .build()
            .unwrap();

        renderer.print_grid(2, Color::splat(255.0)).unwrap();
        assert_eq!(image.get(0, 3), Some(Color::splat(255.0)));
        assert_eq!(image.get(3, 2), Some(Color::splat(255.0)));
        assert_eq!(image.get(1, 1), Some(BLACK));
        assert_eq!(image.get(3, 3), Some(BLACK));
        assert!(renderer.print_grid(0, BLACK).is_err());
    }
}
