//! Color and coefficient triplets.

use glam::DVec3;

/// RGB intensity. Real-valued and unclamped until output; 255 is a full
/// channel.
pub type Color = DVec3;

/// Per-channel weighting triplet, each channel nominally in [0, 1].
pub type Factor = DVec3;

/// No light.
pub const BLACK: Color = DVec3::ZERO;

/// True if every channel of `k` is below `threshold`.
#[inline]
pub fn lower_than(k: Factor, threshold: f64) -> bool {
    k.x < threshold && k.y < threshold && k.z < threshold
}

/// Average of `sum` over `n` samples.
#[inline]
pub fn reduce(sum: Color, n: usize) -> Color {
    sum / n as f64
}
