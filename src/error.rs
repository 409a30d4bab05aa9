//! Error taxonomy for scene loading and image output.

use std::io;

use thiserror::Error;

/// A fatal condition for the current render run.
///
/// Both variants are unrecoverable: the binary reports them and exits with
/// a non-zero status. A ray missing every primitive is a normal outcome and
/// is never represented here.
#[derive(Debug, Error)]
pub enum Error {
    /// The scene file could not be read, or the image could not be written.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The scene file violates the `img410scene` format: missing magic
    /// token, malformed numeric value, truncated value read, or more than
    /// [`crate::scene::MAX_PRIMITIVES`] primitives.
    #[error("format error: {0}")]
    Format(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
