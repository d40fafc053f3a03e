//! Render settings: JSON file plus command-line overrides.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prism_renderer::SamplingConfig;

/// Image size in the form `width`x`height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::str::FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((a, b)) = s.split_once('x') else {
            return Err(anyhow::anyhow!("Incorrect format, expected WIDTHxHEIGHT"));
        };
        let width: u32 = a.trim().parse()?;
        let height: u32 = b.trim().parse()?;
        if width == 0 || height == 0 {
            return Err(anyhow::anyhow!("Dimensions must be non-zero"));
        }
        Ok(Dimensions { width, height })
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Sampling options. Flags given here win over the settings file.
#[derive(clap::Args, Debug, Default)]
pub struct SamplingArgs {
    /// JSON file with sampling settings
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Worker threads
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Rays per pixel side for grid supersampling
    #[arg(short, long)]
    pub anti_aliasing: Option<u32>,

    /// Use adaptive supersampling
    #[arg(long)]
    pub adaptive: bool,

    /// Maximum adaptive subdivision depth
    #[arg(long)]
    pub max_adaptive_depth: Option<u32>,

    /// Seconds between progress reports
    #[arg(long)]
    pub progress: Option<f64>,
}

impl SamplingArgs {
    /// Settings file (or defaults) with the command-line flags applied.
    pub fn resolve(&self) -> Result<SamplingConfig> {
        let mut config = match &self.settings {
            Some(path) => load_sampling(path)?,
            None => SamplingConfig::default(),
        };

        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(factor) = self.anti_aliasing {
            config.anti_aliasing = factor;
        }
        if self.adaptive {
            config.adaptive = true;
        }
        if let Some(depth) = self.max_adaptive_depth {
            config.max_adaptive_depth = depth;
        }
        if let Some(secs) = self.progress {
            config.progress_interval_secs = Some(secs);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Read a [`SamplingConfig`] from a JSON file. Missing fields take defaults.
pub fn load_sampling(path: &Path) -> Result<SamplingConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let config: SamplingConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    log::debug!("Loaded settings from {}: {:?}", path.display(), config);
    Ok(config)
}
