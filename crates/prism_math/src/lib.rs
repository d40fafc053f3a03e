//! Prism math - exact geometric primitives for the Prism ray tracer.
//!
//! Points, non-zero vectors and unit-direction rays backed by `glam::DVec3`.
//! Constructions that would yield a zero vector are rejected with a
//! [`GeometryError`] instead of being silently patched up.

// Re-export glam for convenience
pub use glam::DVec3;

mod error;
mod point;
mod ray;
pub mod util;
mod vector;

pub use error::{ensure_positive, GeometryError, GeometryResult};
pub use point::{Located, Point};
pub use ray::{Ray, DELTA};
pub use util::{align_negligible, align_zero, is_negligible, is_zero, EPSILON};
pub use vector::Vector;
