//! Streaming parser for the `img410scene` description format.
//!
//! The format is whitespace-tokenized. At the top level, `camera`, `sphere`
//! and `plane` open an object block and `end` terminates the scene; any
//! other top-level token is skipped. Inside a block, tokens ending in `:`
//! are property keys and the first token carrying a trailing `;` closes the
//! block. Unknown keys are skipped, which leaves their values on the stream
//! to be rescanned as candidate keys; scene files in the wild rely on this
//! tolerance, so it is preserved rather than tightened.

use std::io::BufRead;
use std::str::SplitWhitespace;

use glam::Vec3A;
use log::debug;

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::scene::{Primitive, Scene};

/// Leading magic token every scene file must carry.
pub const MAGIC: &str = "img410scene";

/// Parse a complete scene from a reader.
///
/// Fails with [`Error::Io`] when the input cannot be read and with
/// [`Error::Format`] on a malformed scene. On error the partial scene is
/// discarded.
pub fn parse<R: BufRead>(mut input: R) -> Result<Scene> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    parse_str(&text)
}

/// Parse a complete scene from an in-memory string.
pub fn parse_str(text: &str) -> Result<Scene> {
    let mut tokens = text.split_whitespace();

    if tokens.next() != Some(MAGIC) {
        return Err(Error::Format(format!("missing '{MAGIC}' magic token")));
    }

    let mut scene = Scene::default();
    while let Some(token) = tokens.next() {
        match token {
            "camera" => scene.camera = parse_camera(&mut tokens)?,
            "sphere" => {
                let sphere = parse_sphere(&mut tokens)?;
                scene.push(sphere)?;
            }
            "plane" => {
                let plane = parse_plane(&mut tokens)?;
                scene.push(plane)?;
            }
            "end" => break,
            other => debug!("Skipping unknown top-level token '{}'", other),
        }
    }

    Ok(scene)
}

/// A scanned token with any block-closing `;` suffix stripped off.
struct Scanned<'a> {
    token: &'a str,
    /// True when the raw token ended in `;`, which closes the object block.
    closes: bool,
}

fn scan<'a>(tokens: &mut SplitWhitespace<'a>) -> Option<Scanned<'a>> {
    let raw = tokens.next()?;
    match raw.strip_suffix(';') {
        Some(token) => Some(Scanned { token, closes: true }),
        None => Some(Scanned { token: raw, closes: false }),
    }
}

/// Read one float value for a recognized key.
///
/// Sets `closes` when the value token carried the block-closing `;`.
fn read_f32(tokens: &mut SplitWhitespace, closes: &mut bool) -> Result<f32> {
    let scanned = scan(tokens)
        .ok_or_else(|| Error::Format("unexpected end of input while reading a value".into()))?;
    let value = scanned
        .token
        .parse::<f32>()
        .map_err(|_| Error::Format(format!("expected a number, found '{}'", scanned.token)))?;
    if scanned.closes {
        *closes = true;
    }
    Ok(value)
}

/// Read up to three float components for a recognized key.
///
/// A `;`-terminated component closes the block early; components not read
/// keep the per-object default of zero.
fn read_vec3(tokens: &mut SplitWhitespace, closes: &mut bool) -> Result<Vec3A> {
    let mut components = [0.0f32; 3];
    for slot in &mut components {
        *slot = read_f32(tokens, closes)?;
        if *closes {
            break;
        }
    }
    Ok(Vec3A::from_array(components))
}

fn parse_camera(tokens: &mut SplitWhitespace) -> Result<Camera> {
    let mut camera = Camera::default();

    while let Some(scanned) = scan(tokens) {
        if scanned.closes {
            break;
        }
        let mut closes = false;
        if let Some(key) = scanned.token.strip_suffix(':') {
            match key {
                "width" => camera.width = read_f32(tokens, &mut closes)?,
                "height" => camera.height = read_f32(tokens, &mut closes)?,
                other => debug!("Skipping unknown camera key '{}'", other),
            }
        }
        if closes {
            break;
        }
    }

    Ok(camera)
}

fn parse_sphere(tokens: &mut SplitWhitespace) -> Result<Primitive> {
    let mut color = Vec3A::ZERO;
    let mut position = Vec3A::ZERO;
    let mut radius = 0.0;

    while let Some(scanned) = scan(tokens) {
        if scanned.closes {
            break;
        }
        let mut closes = false;
        if let Some(key) = scanned.token.strip_suffix(':') {
            match key {
                "c_diff" => color = read_vec3(tokens, &mut closes)?,
                "position" => position = read_vec3(tokens, &mut closes)?,
                "radius" => radius = read_f32(tokens, &mut closes)?,
                other => debug!("Skipping unknown sphere key '{}'", other),
            }
        }
        if closes {
            break;
        }
    }

    Ok(Primitive::Sphere { color, position, radius })
}

fn parse_plane(tokens: &mut SplitWhitespace) -> Result<Primitive> {
    let mut color = Vec3A::ZERO;
    let mut position = Vec3A::ZERO;
    let mut normal = Vec3A::ZERO;

    while let Some(scanned) = scan(tokens) {
        if scanned.closes {
            break;
        }
        let mut closes = false;
        if let Some(key) = scanned.token.strip_suffix(':') {
            match key {
                "c_diff" => color = read_vec3(tokens, &mut closes)?,
                "position" => position = read_vec3(tokens, &mut closes)?,
                "normal" => {
                    // Normalized immediately on read; a near-zero normal is
                    // left unchanged instead of divided by its length.
                    let raw = read_vec3(tokens, &mut closes)?;
                    normal = raw.try_normalize().unwrap_or(raw);
                }
                other => debug!("Skipping unknown plane key '{}'", other),
            }
        }
        if closes {
            break;
        }
    }

    Ok(Primitive::Plane { color, position, normal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MAX_PRIMITIVES;

    #[test]
    fn parses_a_full_scene_in_file_order() {
        let scene = parse_str(
            "img410scene\n\
             camera\n  width: 2.0 height: 1.5;\n\
             sphere\n  c_diff: 1 0 0 position: 0 0 -5 radius: 2;\n\
             plane\n  c_diff: 0 1 0 position: 0 -1 0 normal: 0 2 0;\n\
             end\n",
        )
        .unwrap();

        assert_eq!(scene.camera.width, 2.0);
        assert_eq!(scene.camera.height, 1.5);
        assert_eq!(scene.primitives.len(), 2);
        assert_eq!(
            scene.primitives[0],
            Primitive::Sphere {
                color: Vec3A::new(1.0, 0.0, 0.0),
                position: Vec3A::new(0.0, 0.0, -5.0),
                radius: 2.0,
            }
        );
        // The plane normal is normalized as it is read.
        assert_eq!(
            scene.primitives[1],
            Primitive::Plane {
                color: Vec3A::new(0.0, 1.0, 0.0),
                position: Vec3A::new(0.0, -1.0, 0.0),
                normal: Vec3A::new(0.0, 1.0, 0.0),
            }
        );
    }

    #[test]
    fn rejects_missing_magic() {
        assert!(matches!(parse_str("scene sphere;"), Err(Error::Format(_))));
        assert!(matches!(parse_str(""), Err(Error::Format(_))));
    }

    #[test]
    fn unspecified_fields_keep_defaults() {
        let scene = parse_str("img410scene sphere radius: 1; end").unwrap();
        assert_eq!(
            scene.primitives[0],
            Primitive::Sphere {
                color: Vec3A::ZERO,
                position: Vec3A::ZERO,
                radius: 1.0,
            }
        );
        // Camera never declared: raw zeros until the post-parse policy runs.
        assert_eq!(scene.camera.width, 0.0);
        assert_eq!(scene.camera.height, 0.0);
    }

    #[test]
    fn near_zero_plane_normal_is_left_unchanged() {
        let scene = parse_str("img410scene plane normal: 0 0 0; end").unwrap();
        let Primitive::Plane { normal, .. } = scene.primitives[0] else {
            panic!("expected a plane");
        };
        assert_eq!(normal, Vec3A::ZERO);
    }

    #[test]
    fn unknown_top_level_tokens_are_skipped() {
        let scene = parse_str("img410scene fog noise sphere radius: 1; end").unwrap();
        assert_eq!(scene.primitives.len(), 1);
    }

    #[test]
    fn unknown_keys_leave_values_to_rescan() {
        // `glow:` is unknown; its value `0.3` is rescanned as a candidate
        // key and skipped, then `radius:` is picked up normally.
        let scene = parse_str("img410scene sphere glow: 0.3 radius: 2; end").unwrap();
        let Primitive::Sphere { radius, .. } = scene.primitives[0] else {
            panic!("expected a sphere");
        };
        assert_eq!(radius, 2.0);
    }

    #[test]
    fn semicolon_on_a_value_closes_the_block() {
        let scene = parse_str(
            "img410scene sphere position: 1 2; sphere radius: 3; end",
        )
        .unwrap();
        assert_eq!(scene.primitives.len(), 2);
        // The closed read keeps the components seen so far.
        assert_eq!(
            scene.primitives[0],
            Primitive::Sphere {
                color: Vec3A::ZERO,
                position: Vec3A::new(1.0, 2.0, 0.0),
                radius: 0.0,
            }
        );
    }

    #[test]
    fn detached_semicolon_closes_the_block() {
        let scene = parse_str("img410scene sphere radius: 2 ; end").unwrap();
        let Primitive::Sphere { radius, .. } = scene.primitives[0] else {
            panic!("expected a sphere");
        };
        assert_eq!(radius, 2.0);
    }

    #[test]
    fn blocks_after_end_are_never_read() {
        let scene = parse_str("img410scene sphere radius: 1; end sphere radius: 2;").unwrap();
        assert_eq!(scene.primitives.len(), 1);
    }

    #[test]
    fn malformed_number_is_a_format_error() {
        assert!(matches!(
            parse_str("img410scene sphere radius: fat;"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn truncated_value_read_is_a_format_error() {
        assert!(matches!(
            parse_str("img410scene sphere radius:"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn primitive_count_overflow_is_a_format_error() {
        let mut text = String::from(MAGIC);
        for _ in 0..=MAX_PRIMITIVES {
            text.push_str(" sphere radius: 1;");
        }
        text.push_str(" end");
        assert!(matches!(parse_str(&text), Err(Error::Format(_))));
    }

    #[test]
    fn later_camera_block_replaces_the_earlier_one() {
        let scene = parse_str(
            "img410scene camera width: 4 height: 3; camera width: 2; end",
        )
        .unwrap();
        // Defaults are per block: the second camera never sets height.
        assert_eq!(scene.camera.width, 2.0);
        assert_eq!(scene.camera.height, 0.0);
    }
}
