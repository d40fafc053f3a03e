//! Composite geometry container.

use crate::geometry::{GeoPoint, Geometry};
use prism_math::Ray;

/// An append-only list of geometries queried as one.
///
/// Intersection is a linear scan over every member; there is no spatial
/// acceleration, so cost grows with the number of members.
#[derive(Debug, Clone, Default)]
pub struct Geometries {
    items: Vec<Geometry>,
}

impl Geometries {
    /// Create a new empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a geometry.
    pub fn add(&mut self, geometry: Geometry) {
        self.items.push(geometry);
    }

    /// Get the number of geometries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the container is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.items.iter()
    }

    /// Hits from every member, concatenated in member order.
    ///
    /// No ordering by distance is applied; an empty vector means no member
    /// was hit.
    pub fn intersect(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        self.items.iter().flat_map(|g| g.intersect(ray)).collect()
    }
}

impl From<Vec<Geometry>> for Geometries {
    fn from(items: Vec<Geometry>) -> Self {
        Self { items }
    }
}

impl Extend<Geometry> for Geometries {
    fn extend<T: IntoIterator<Item = Geometry>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}
