//! Ray representation for intersection testing.
//!
//! A ray is defined as r(t) = origin + t * direction, a semi-infinite line
//! in 3D space.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Camera rays always carry a unit direction, so intersection distances are
/// directly comparable across primitives without renormalization.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,

    /// Direction vector of the ray, unit length for camera rays.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute the point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}
