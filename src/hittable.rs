//! Ray-primitive intersection engine.
//!
//! Distances are measured along the ray's (assumed unit) direction, so
//! results are directly comparable across primitive types. A miss is the
//! normal outcome, reported as `None`, never as an error.

use glam::Vec3A;

use crate::ray::Ray;
use crate::scene::Primitive;

/// Minimum accepted hit distance.
///
/// Excludes solutions at or behind the ray origin, and doubles as the
/// parallelism cutoff for ray/plane tests.
pub const EPSILON: f32 = 1e-6;

/// Nearest positive intersection distance of the ray with a primitive.
///
/// The ray direction must be a unit vector; it is not normalized here.
pub fn intersect(ray: &Ray, primitive: &Primitive) -> Option<f32> {
    match primitive {
        Primitive::Sphere { position, radius, .. } => hit_sphere(ray, *position, *radius),
        Primitive::Plane { position, normal, .. } => hit_plane(ray, *position, *normal),
    }
}

/// Classic ray/sphere quadratic.
///
/// Prefers the near root; falls back to the far root when the near one is
/// at or behind the origin (ray starting inside the sphere).
fn hit_sphere(ray: &Ray, center: Vec3A, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let t0 = (-b - sqrtd) / (2.0 * a);
    if t0 > EPSILON {
        return Some(t0);
    }
    let t1 = (-b + sqrtd) / (2.0 * a);
    (t1 > EPSILON).then_some(t1)
}

/// Ray/plane test against an infinite plane through `point`.
///
/// Rays parallel to the plane (|dot(N, D)| below [`EPSILON`]) never hit.
fn hit_plane(ray: &Ray, point: Vec3A, normal: Vec3A) -> Option<f32> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < EPSILON {
        return None;
    }

    let t = normal.dot(point - ray.origin) / denom;
    (t > EPSILON).then_some(t)
}
