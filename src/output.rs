//! Image output in the ASCII PPM (`P3`) format.
//!
//! The format is plain text: a `P3` header with dimensions and the 255
//! sample maximum, then one `r g b` line per pixel in row-major order, top
//! row first. Lossless for 8-bit channel values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;
use log::info;

use crate::error::Result;

/// Write the pixel buffer to `writer` as ASCII PPM.
pub fn write_ppm<W: Write>(writer: &mut W, image: &RgbImage) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for pixel in image.pixels() {
        writeln!(writer, "{} {} {}", pixel[0], pixel[1], pixel[2])?;
    }

    Ok(())
}

/// Save the pixel buffer to `path` as ASCII PPM.
///
/// A write failure is fatal to the run and is propagated as
/// [`crate::error::Error::Io`].
pub fn save_image_as_ppm(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, image)?;
    writer.flush()?;

    info!("Image saved as {}", path.display());
    Ok(())
}
