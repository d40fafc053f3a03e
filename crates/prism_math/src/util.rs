//! Tolerance helpers shared by every intersection routine.

/// Scalars with a magnitude below this are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is indistinguishable from zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Returns true if `x` is negligible relative to `magnitude`.
///
/// The tolerance grows with the magnitude of the operands so that large
/// scenes do not lose intersections to rounding noise.
#[inline]
pub fn is_negligible(x: f64, magnitude: f64) -> bool {
    x.abs() < EPSILON * magnitude.abs().max(1.0)
}

/// Snaps `x` to exactly zero when it is negligible relative to `magnitude`.
#[inline]
pub fn align_negligible(x: f64, magnitude: f64) -> f64 {
    if is_negligible(x, magnitude) {
        0.0
    } else {
        x
    }
}

/// Snaps near-zero values to exactly zero, otherwise returns `x` unchanged.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-12));
        assert!(is_zero(-1e-12));
        assert!(!is_zero(1e-6));
    }

    #[test]
    fn test_align_zero() {
        assert_eq!(align_zero(1e-13), 0.0);
        assert_eq!(align_zero(-1e-13), 0.0);
        assert_eq!(align_zero(0.5), 0.5);
    }

    #[test]
    fn test_is_negligible_scales() {
        // 1e-7 is noise next to a magnitude of 1e6, but not next to 1
        assert!(is_negligible(1e-7, 1e6));
        assert!(!is_negligible(1e-7, 1.0));
        assert!(is_negligible(1e-11, 0.001));
    }

    #[test]
    fn test_align_negligible() {
        assert_eq!(align_negligible(1e-5, 1e6), 0.0);
        assert_eq!(align_negligible(1e-5, 1.0), 1e-5);
        assert_eq!(align_negligible(-3.0, 1e6), -3.0);
    }
}
