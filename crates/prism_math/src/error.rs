use thiserror::Error;

/// Errors raised when a geometric value would violate its invariants.
///
/// These are construction-time failures: callers treat them as
/// programming errors, never as "the ray missed".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("vector has a non-finite component")]
    NonFinite,

    #[error("vectors are parallel, cross product is zero")]
    ParallelVectors,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("{what} must be positive, got {value}")]
    NotPositive { what: &'static str, value: f64 },
}

/// Result type for geometric constructions.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Reject non-positive (or NaN) scalar parameters.
pub fn ensure_positive(what: &'static str, value: f64) -> GeometryResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NotPositive { what, value })
    }
}
