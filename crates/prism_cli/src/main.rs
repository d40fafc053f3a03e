//! Prism - render a demo scene to a PNG file.

mod scenes;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use prism_renderer::{BasicRayTracer, Color, ImageBuffer, Renderer};

use scenes::DemoScene;
use settings::{Dimensions, SamplingArgs};

#[derive(Parser, Debug)]
#[command(version, about = "Render a demo scene with the Prism ray tracer")]
pub struct Args {
    #[arg(long, value_enum, default_value_t)]
    /// Scene selector
    scene: DemoScene,

    #[arg(short, long, default_value = "500x500")]
    /// Image dimension in format `width`x`height`
    dimensions: Dimensions,

    #[arg(short, long, default_value = "render.png")]
    /// Output PNG path
    output: PathBuf,

    #[arg(long)]
    /// Overlay a yellow grid line every N pixels
    grid: Option<u32>,

    #[command(flatten)]
    sampling: SamplingArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let sampling = args.sampling.resolve()?;

    log::info!("Building scene {:?}", args.scene);
    let (scene, camera) = args.scene.build().context("Failed to build demo scene")?;
    let camera = camera
        .sampling(sampling)
        .build()
        .context("Invalid camera configuration")?;

    let tracer = BasicRayTracer::new(&scene);
    let image = ImageBuffer::new(args.dimensions.width, args.dimensions.height);
    let renderer = Renderer::builder()
        .camera(camera)
        .tracer(&tracer)
        .sink(&image)
        .build()?;

    renderer.render().context("Render failed")?;
    if let Some(interval) = args.grid {
        renderer.print_grid(interval, Color::new(255.0, 255.0, 0.0))?;
    }

    save_png(&image, &args.output)?;
    log::info!("Wrote {} ({})", args.output.display(), args.dimensions);
    Ok(())
}

fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let rgba = image::RgbaImage::from_raw(image.width(), image.height(), image.to_rgba8())
        .context("Image buffer size mismatch")?;
    rgba.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
