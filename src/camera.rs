//! Camera for ray generation and scene rendering.

use glam::Vec3A;
use image::{Rgb, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::hittable;
use crate::ray::Ray;
use crate::scene::Primitive;

/// Pinhole camera fixed at the origin, looking down -Z.
///
/// Only the extent of the view plane at distance 1 is configurable; there
/// is no rotation or translation support. Both dimensions default to zero
/// straight out of the parser and are resolved to 1.0 by
/// [`Camera::resolve_defaults`] before rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    /// View-plane width.
    pub width: f32,
    /// View-plane height.
    pub height: f32,
}

impl Camera {
    /// Replace unset (zero) view-plane dimensions with 1.0.
    ///
    /// Scene files may omit the camera block or leave a dimension at zero;
    /// the render loop requires both to be strictly positive. This is a
    /// post-parse policy, applied once after the whole scene is read.
    pub fn resolve_defaults(&mut self) {
        if self.width == 0.0 {
            self.width = 1.0;
        }
        if self.height == 0.0 {
            self.height = 1.0;
        }
    }

    /// Render the scene into an 8-bit RGB pixel buffer.
    ///
    /// Casts one ray through the center of every pixel and resolves the
    /// nearest-hit primitive's diffuse color; pixels that hit nothing stay
    /// black. Pixels are independent, so the loop runs in parallel.
    pub fn render(
        &self,
        primitives: &[Primitive],
        image_width: u32,
        image_height: u32,
    ) -> RgbImage {
        let mut image = RgbImage::new(image_width, image_height);

        info!("Rendering on {} CPU cores...", rayon::current_num_threads());
        let render_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(image_width) * u64::from(image_height));
        pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}").unwrap());

        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let ray = self.pixel_ray(i, j, image_width, image_height);
            *pixel = match nearest_hit(&ray, primitives) {
                Some(primitive) => Rgb(color_to_rgb8(primitive.color())),
                None => Rgb([0, 0, 0]),
            };
            pb.inc(1);
        });

        pb.finish();
        info!("Image rendered in {:.2?}", render_start.elapsed());

        image
    }

    /// Camera ray through the center of pixel (i, j).
    ///
    /// The pixel center is mapped onto the view plane at distance 1 along
    /// -Z, left-to-right and top-to-bottom; the direction is normalized so
    /// intersection distances compare across primitives.
    fn pixel_ray(&self, i: u32, j: u32, image_width: u32, image_height: u32) -> Ray {
        let u = (i as f32 + 0.5) / image_width as f32;
        let v = (j as f32 + 0.5) / image_height as f32;
        let direction = Vec3A::new(
            -self.width / 2.0 + u * self.width,
            self.height / 2.0 - v * self.height,
            -1.0,
        )
        .normalize();
        Ray::new(Vec3A::ZERO, direction)
    }
}

/// Nearest primitive hit by the ray, if any.
///
/// Scans in scene order tracking the minimum positive distance. The strict
/// `<` comparison keeps the first-parsed primitive on exact distance ties.
fn nearest_hit<'a>(ray: &Ray, primitives: &'a [Primitive]) -> Option<&'a Primitive> {
    let mut closest_so_far = f32::INFINITY;
    let mut nearest = None;

    for primitive in primitives {
        if let Some(t) = hittable::intersect(ray, primitive) {
            if t < closest_so_far {
                closest_so_far = t;
                nearest = Some(primitive);
            }
        }
    }

    nearest
}

/// Convert a [0, 1] float color to 8-bit channels.
///
/// Out-of-range channels are clamped before the rounding conversion.
fn color_to_rgb8(color: Vec3A) -> [u8; 3] {
    [
        (color.x.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.y.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.z.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}
