//! Sampling and scheduling configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{RenderError, RenderResult};

/// Deepest adaptive subdivision accepted; the sample grid is 2^depth per side.
const MAX_ADAPTIVE_DEPTH_LIMIT: u32 = 16;

/// Largest grid supersampling factor accepted, in rays per pixel side.
const MAX_ANTI_ALIASING: u32 = 256;

/// How each pixel is sampled and how many workers render the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Rays per pixel side for fixed-grid supersampling (1 = center ray only)
    pub anti_aliasing: u32,
    /// Use adaptive corner subdivision instead of the fixed grid
    pub adaptive: bool,
    /// Maximum number of adaptive subdivision levels
    pub max_adaptive_depth: u32,
    /// Number of worker threads
    pub threads: usize,
    /// Seconds between progress log lines, `None` disables progress output
    pub progress_interval_secs: Option<f64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            anti_aliasing: 1,
            adaptive: false,
            max_adaptive_depth: 3,
            threads: 1,
            progress_interval_secs: None,
        }
    }
}

impl SamplingConfig {
    /// Check that every field is within its allowed range.
    pub fn validate(&self) -> RenderResult<()> {
        if !(1..=MAX_ANTI_ALIASING).contains(&self.anti_aliasing) {
            return Err(RenderError::InvalidConfiguration(format!(
                "anti-aliasing factor must be in 1..={MAX_ANTI_ALIASING}, got {}",
                self.anti_aliasing
            )));
        }
        if !(1..=MAX_ADAPTIVE_DEPTH_LIMIT).contains(&self.max_adaptive_depth) {
            return Err(RenderError::InvalidConfiguration(format!(
                "max adaptive depth must be in 1..={MAX_ADAPTIVE_DEPTH_LIMIT}, got {}",
                self.max_adaptive_depth
            )));
        }
        if self.threads == 0 {
            return Err(RenderError::InvalidConfiguration(
                "thread count must be at least 1".into(),
            ));
        }
        if let Some(secs) = self.progress_interval_secs {
            if !(secs.is_finite() && secs > 0.0) {
                return Err(RenderError::InvalidConfiguration(format!(
                    "progress interval must be a positive number of seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }

    /// Progress reporting interval, if enabled.
    pub fn progress_interval(&self) -> Option<Duration> {
        self.progress_interval_secs.map(Duration::from_secs_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SamplingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_fields() {
        let aa = SamplingConfig { anti_aliasing: 0, ..Default::default() };
        assert!(matches!(aa.validate(), Err(RenderError::InvalidConfiguration(_))));

        let threads = SamplingConfig { threads: 0, ..Default::default() };
        assert!(threads.validate().is_err());

        let depth = SamplingConfig { max_adaptive_depth: 0, ..Default::default() };
        assert!(depth.validate().is_err());

        let interval = SamplingConfig { progress_interval_secs: Some(-1.0), ..Default::default() };
        assert!(interval.validate().is_err());
    }

    #[test]
    fn test_anti_aliasing_upper_bound() {
        let max = SamplingConfig { anti_aliasing: MAX_ANTI_ALIASING, ..Default::default() };
        assert!(max.validate().is_ok());

        let huge = SamplingConfig { anti_aliasing: u32::MAX, ..Default::default() };
        assert!(matches!(huge.validate(), Err(RenderError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: SamplingConfig =
            serde_json::from_str(r#"{ "adaptive": true, "threads": 4 }"#).unwrap();
        assert!(config.adaptive);
        assert_eq!(config.threads, 4);
        assert_eq!(config.anti_aliasing, 1);
        assert_eq!(config.max_adaptive_depth, 3);
        assert_eq!(config.progress_interval(), None);
    }
}
