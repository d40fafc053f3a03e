use prism_math::GeometryError;
use thiserror::Error;

/// Errors that abort a render invocation.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("missing configuration: {0}")]
    MissingConfiguration(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for camera and render operations.
pub type RenderResult<T> = Result<T, RenderError>;
