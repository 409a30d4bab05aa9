//! Scene model: a camera plus a bounded, ordered collection of primitives.

use glam::Vec3A;

use crate::camera::Camera;
use crate::error::{Error, Result};

/// Maximum number of spheres and planes a scene may hold.
pub const MAX_PRIMITIVES: usize = 128;

/// Geometric primitive carrying a flat diffuse color.
///
/// The color is returned verbatim on any hit; no lighting is applied.
/// Channels are nominally in [0, 1] but are not clamped at parse time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Sphere defined by center position and radius.
    Sphere {
        /// Flat diffuse color.
        color: Vec3A,
        /// Center of the sphere in world coordinates.
        position: Vec3A,
        /// Sphere radius. A zero radius is a degenerate sphere that only
        /// grazes rays at an exact tangent point.
        radius: f32,
    },
    /// Infinite plane through a point, with a unit normal.
    Plane {
        /// Flat diffuse color.
        color: Vec3A,
        /// A point on the plane.
        position: Vec3A,
        /// Plane normal, normalized at parse time.
        normal: Vec3A,
    },
}

impl Primitive {
    /// The primitive's flat diffuse color.
    pub fn color(&self) -> Vec3A {
        match self {
            Self::Sphere { color, .. } | Self::Plane { color, .. } => *color,
        }
    }
}

/// A parsed scene: one camera plus primitives in file order.
///
/// File order matters: when two primitives intersect a ray at exactly the
/// same distance, the earlier one wins. The collection is read-only after
/// parsing.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// The scene camera.
    pub camera: Camera,
    /// Primitives in the order they appeared in the scene file.
    pub primitives: Vec<Primitive>,
}

impl Scene {
    /// Append a primitive, enforcing the [`MAX_PRIMITIVES`] capacity.
    pub fn push(&mut self, primitive: Primitive) -> Result<()> {
        if self.primitives.len() >= MAX_PRIMITIVES {
            return Err(Error::Format(format!(
                "scene exceeds the {MAX_PRIMITIVES}-primitive limit"
            )));
        }
        self.primitives.push(primitive);
        Ok(())
    }
}
